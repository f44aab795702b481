//! JetBrains IDEs client implementation.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, McpClient, probe};

#[derive(Debug, Default)]
pub struct JetBrainsClient;

impl JetBrainsClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for JetBrainsClient {
    fn name(&self) -> &'static str {
        "JetBrains"
    }

    fn id(&self) -> &'static str {
        "jetbrains"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://www.jetbrains.com/help/idea/mcp-server.html")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local (stdio) mode")
    }

    fn supports_remote(&self) -> bool {
        false
    }

    // IDE settings live apart from the MCP file.
    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::any_exists(&[
            ctx.home_dir.join(".config").join("JetBrains"),
            ctx.home_dir
                .join("Library")
                .join("Application Support")
                .join("JetBrains"),
        ]))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".jetbrains").join("mcp.json"))
    }
}
