//! Qwen Code client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct QwenCodeClient;

impl QwenCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for QwenCodeClient {
    fn name(&self) -> &'static str {
        "Qwen Code"
    }

    fn id(&self) -> &'static str {
        "qwen-code"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".qwen").join("settings.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        match registration {
            ServerRegistration::Remote { url, headers } => json!({
                "httpUrl": url,
                "headers": headers,
            }),
            local => local.to_value(),
        }
    }
}
