//! Zed client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::{
    ClientContext, ClientError, McpClient, Platform, merge_fields, probe, require_platform,
};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::ServerRegistration;

const SUPPORTED: &[Platform] = &[Platform::MacOs, Platform::Linux];

#[derive(Debug, Default)]
pub struct ZedClient;

impl ZedClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for ZedClient {
    fn name(&self) -> &'static str {
        "Zed"
    }

    fn id(&self) -> &'static str {
        "zed"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://zed.dev/docs/ai/mcp")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local (stdio) mode")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::JsonWithComments)
    }

    fn server_property(&self) -> &'static str {
        "context_servers"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        if !SUPPORTED.contains(&ctx.platform) {
            return Ok(false);
        }
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        require_platform(self.name(), ctx, SUPPORTED)?;
        // macOS ignores XDG_CONFIG_HOME.
        let config_root = match ctx.platform {
            Platform::MacOs => ctx.home_dir.join(".config"),
            _ => ctx.xdg_config_dir(),
        };
        Ok(config_root.join("zed").join("settings.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        merge_fields(serde_json::json!({"source": "custom"}), registration.to_value())
    }
}
