//! Kilo Code (VS Code extension) client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::cline::extension_settings_path;
use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct KiloCodeClient;

impl KiloCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for KiloCodeClient {
    fn name(&self) -> &'static str {
        "Kilo Code"
    }

    fn id(&self) -> &'static str {
        "kilo-code"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(extension_settings_path(
            ctx,
            "kilocode.kilo-code",
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
