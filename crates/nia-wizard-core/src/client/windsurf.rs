//! Windsurf (Codeium) client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct WindsurfClient;

impl WindsurfClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for WindsurfClient {
    fn name(&self) -> &'static str {
        "Windsurf"
    }

    fn id(&self) -> &'static str {
        "windsurf"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(match ctx.platform {
            Platform::Windows => ctx
                .app_data_dir()
                .join("Codeium")
                .join("windsurf")
                .join("mcp_config.json"),
            Platform::MacOs => ctx
                .home_dir
                .join(".codeium")
                .join("windsurf")
                .join("mcp_config.json"),
            Platform::Linux | Platform::Other => ctx
                .home_dir
                .join(".config")
                .join("windsurf")
                .join("mcp.json"),
        })
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        match registration {
            ServerRegistration::Remote { url, headers } => json!({
                "serverUrl": url,
                "headers": headers,
            }),
            local => local.to_value(),
        }
    }
}
