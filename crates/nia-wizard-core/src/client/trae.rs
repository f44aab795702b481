//! Trae client implementation.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe};
use crate::config::codec::ConfigFormat;

#[derive(Debug, Default)]
pub struct TraeClient;

impl TraeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for TraeClient {
    fn name(&self) -> &'static str {
        "Trae"
    }

    fn id(&self) -> &'static str {
        "trae"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.trae.ai/ide/model-context-protocol")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::JsonWithComments)
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(match ctx.platform {
            Platform::MacOs | Platform::Windows => ctx
                .app_support_dir()
                .join("Trae")
                .join("User")
                .join("mcp.json"),
            Platform::Linux | Platform::Other => {
                ctx.home_dir.join(".config").join("trae").join("mcp.json")
            }
        })
    }
}
