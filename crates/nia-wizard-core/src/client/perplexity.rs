//! Perplexity Desktop client implementation (macOS only).

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe, require_platform};

#[derive(Debug, Default)]
pub struct PerplexityClient;

impl PerplexityClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for PerplexityClient {
    fn name(&self) -> &'static str {
        "Perplexity Desktop"
    }

    fn id(&self) -> &'static str {
        "perplexity"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.perplexity.ai/guides/mcp-server")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local (stdio) mode, macOS only")
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
        Ok(ctx.app_support_dir().join("Perplexity").join("mcp.json"))
    }
}
