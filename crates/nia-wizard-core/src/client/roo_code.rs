//! Roo Code (VS Code extension) client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::cline::extension_settings_path;
use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct RooCodeClient;

impl RooCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for RooCodeClient {
    fn name(&self) -> &'static str {
        "Roo Code"
    }

    fn id(&self) -> &'static str {
        "roo-code"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(extension_settings_path(
            ctx,
            "rooveterinaryinc.roo-cline",
            "mcp_settings.json",
        ))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        match registration {
            ServerRegistration::Remote { .. } => registration.to_typed_value("stdio", "streamable-http"),
            ServerRegistration::Local { .. } => registration.to_value(),
        }
    }
}
