//! Continue.dev client implementation.
//!
//! Continue keeps a single server under `experimental`, wrapped in a
//! `modelContextProtocolServer.transport` object.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct ContinueClient;

impl ContinueClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for ContinueClient {
    fn name(&self) -> &'static str {
        "Continue.dev"
    }

    fn id(&self) -> &'static str {
        "continue"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.continue.dev/customize/mcp-tools")
    }

    fn server_property(&self) -> &'static str {
        "experimental"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".continue").join("config.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        json!({
            "modelContextProtocolServer": {
                "transport": registration.to_typed_value("stdio", "http"),
            },
        })
    }
}
