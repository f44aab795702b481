//! Gemini CLI client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

/// Gemini CLI negotiates streamable HTTP only when both types are accepted.
const ACCEPT: &str = "application/json, text/event-stream";

#[derive(Debug, Default)]
pub struct GeminiCliClient;

impl GeminiCliClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for GeminiCliClient {
    fn name(&self) -> &'static str {
        "Gemini CLI"
    }

    fn id(&self) -> &'static str {
        "gemini-cli"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://googlegemini.com/docs/gemini-cli/tools/mcp-server")
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".gemini").join("settings.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        match registration {
            ServerRegistration::Remote { url, headers } => {
                let mut headers = headers.clone();
                headers.insert("Accept".to_string(), ACCEPT.to_string());
                json!({
                    "httpUrl": url,
                    "headers": headers,
                })
            }
            local => local.to_value(),
        }
    }
}
