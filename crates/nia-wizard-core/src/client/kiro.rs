//! Kiro client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, merge_fields, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct KiroClient;

impl KiroClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for KiroClient {
    fn name(&self) -> &'static str {
        "Kiro"
    }

    fn id(&self) -> &'static str {
        "kiro"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://kiro.dev/docs/mcp/")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local (stdio) mode")
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".kiro").join("mcp.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        merge_fields(
            registration.to_value(),
            json!({
                "disabled": false,
                "autoApprove": [],
            }),
        )
    }
}
