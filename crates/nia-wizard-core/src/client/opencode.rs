//! Opencode client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct OpenCodeClient;

impl OpenCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for OpenCodeClient {
    fn name(&self) -> &'static str {
        "Opencode"
    }

    fn id(&self) -> &'static str {
        "opencode"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://opencode.ai/docs/mcp-servers/")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Also available as dedicated plugin: bunx nia-opencode@latest install")
    }

    fn server_property(&self) -> &'static str {
        "mcp"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".opencode").join("config.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        // Opencode wants the command and its arguments as one array.
        match registration {
            ServerRegistration::Remote { url, headers } => json!({
                "type": "remote",
                "url": url,
                "headers": headers,
                "enabled": true,
            }),
            ServerRegistration::Local { env, .. } => json!({
                "type": "local",
                "command": registration.command_line().unwrap_or_default(),
                "env": env,
                "enabled": true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::registration::{ApiKey, InstallMode, ServerConfigBuilder};

    #[test]
    fn local_entry_uses_command_array() {
        let key = ApiKey::parse("nk_abc").expect("valid key");
        let registration = ServerConfigBuilder::default().build(&key, InstallMode::Local);
        let value = OpenCodeClient::new().shape_registration(&registration);

        assert_eq!(value["type"], "local");
        assert_eq!(
            value["command"],
            json!(["pipx", "run", "--no-cache", "nia-mcp-server"])
        );
        assert_eq!(value["env"]["NIA_API_KEY"], "nk_abc");
        assert_eq!(value["enabled"], true);
        assert!(value.get("args").is_none());
    }
}
