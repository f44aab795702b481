//! VS Code (GitHub Copilot) client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct VsCodeClient;

impl VsCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for VsCodeClient {
    fn name(&self) -> &'static str {
        "VS Code"
    }

    fn id(&self) -> &'static str {
        "vscode"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://code.visualstudio.com/docs/copilot/chat/mcp-servers")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::JsonWithComments)
    }

    // VS Code uses "servers" instead of "mcpServers"
    fn server_property(&self) -> &'static str {
        "servers"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx
            .app_support_dir()
            .join("Code")
            .join("User")
            .join("mcp.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        // - stdio: { "type": "stdio", "command": "...", "args": [...], "env": {...} }
        // - http: { "type": "http", "url": "...", "headers": {...} }
        registration.to_typed_value("stdio", "http")
    }
}
