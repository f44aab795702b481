//! BoltAI client implementation (macOS only).

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe, require_platform};

#[derive(Debug, Default)]
pub struct BoltAiClient;

impl BoltAiClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for BoltAiClient {
    fn name(&self) -> &'static str {
        "BoltAI"
    }

    fn id(&self) -> &'static str {
        "boltai"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        if ctx.platform != Platform::MacOs {
            return Ok(false);
        }
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        require_platform(self.name(), ctx, &[Platform::MacOs])?;
        Ok(ctx.app_support_dir().join("BoltAI").join("mcp.json"))
    }
}
