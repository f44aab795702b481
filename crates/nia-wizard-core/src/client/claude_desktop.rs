//! Claude Desktop client implementation.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, Platform, require_platform};

const SUPPORTED: &[Platform] = &[Platform::MacOs, Platform::Windows];

#[derive(Debug, Default)]
pub struct ClaudeDesktopClient;

impl ClaudeDesktopClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for ClaudeDesktopClient {
    fn name(&self) -> &'static str {
        "Claude Desktop"
    }

    fn id(&self) -> &'static str {
        "claude-desktop"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://modelcontextprotocol.io/quickstart/user")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local (stdio) mode")
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        if !SUPPORTED.contains(&ctx.platform) {
            return Ok(false);
        }
        let config_dir = ctx.app_support_dir().join("Claude");
        Ok(config_dir.is_dir())
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        require_platform(self.name(), ctx, SUPPORTED)?;
        Ok(ctx
            .app_support_dir()
            .join("Claude")
            .join("claude_desktop_config.json"))
    }
}
