//! Amazon Q Developer CLI client implementation.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, probe};

#[derive(Debug, Default)]
pub struct AmazonQClient;

impl AmazonQClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for AmazonQClient {
    fn name(&self) -> &'static str {
        "Amazon Q"
    }

    fn id(&self) -> &'static str {
        "amazon-q"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".aws").join("amazonq").join("mcp.json"))
    }
}
