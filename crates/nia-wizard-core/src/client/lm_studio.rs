//! LM Studio client implementation.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, probe};

#[derive(Debug, Default)]
pub struct LmStudioClient;

impl LmStudioClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for LmStudioClient {
    fn name(&self) -> &'static str {
        "LM Studio"
    }

    fn id(&self) -> &'static str {
        "lm-studio"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".lmstudio").join("mcp.json"))
    }
}
