//! Google Antigravity client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct AntigravityClient;

impl AntigravityClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for AntigravityClient {
    fn name(&self) -> &'static str {
        "Google Antigravity"
    }

    fn id(&self) -> &'static str {
        "antigravity"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://developers.google.com/gemini-code-assist/docs/use-mcp-servers")
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        let dir = match ctx.platform {
            Platform::Windows => ctx.app_data_dir().join("Gemini").join("Antigravity"),
            Platform::Linux => ctx.home_dir.join(".config").join("gemini").join("antigravity"),
            Platform::MacOs | Platform::Other => ctx.home_dir.join(".gemini").join("antigravity"),
        };
        Ok(dir.join("mcp_config.json"))
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
