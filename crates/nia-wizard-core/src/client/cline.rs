//! Cline (VS Code extension) client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, merge_fields, probe};
use crate::mcp::registration::ServerRegistration;

/// Tools Cline may call without asking.
const ALWAYS_ALLOW: &[&str] = &[
    "index",
    "search",
    "manage_resource",
    "nia_web_search",
    "nia_deep_research_agent",
];

/// Settings file kept by a VS Code extension in its global storage.
pub(crate) fn extension_settings_path(ctx: &ClientContext, extension: &str, file: &str) -> PathBuf {
    ctx.app_support_dir()
        .join("Code")
        .join("User")
        .join("globalStorage")
        .join(extension)
        .join("settings")
        .join(file)
}

#[derive(Debug, Default)]
pub struct ClineClient;

impl ClineClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for ClineClient {
    fn name(&self) -> &'static str {
        "Cline"
    }

    fn id(&self) -> &'static str {
        "cline"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.cline.bot/mcp/configuring-mcp-servers")
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(extension_settings_path(
            ctx,
            "saoudrizwan.claude-dev",
            "cline_mcp_settings.json",
        ))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        let base = json!({
            "alwaysAllow": ALWAYS_ALLOW,
            "disabled": false,
        });
        let transport = match registration {
            ServerRegistration::Remote { .. } => registration.to_typed_value("stdio", "streamableHttp"),
            ServerRegistration::Local { .. } => registration.to_value(),
        };
        merge_fields(base, transport)
    }
}
