//! Augment Code client implementation.
//!
//! Augment reads its servers from VS Code's user settings, as an array of
//! named entries under the literal key `augment.advanced`.

use std::path::PathBuf;

use anyhow::{Context, bail};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::client::{ClientContext, ClientError, McpClient, file, merge_fields};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

#[derive(Debug, Default)]
pub struct AugmentClient;

impl AugmentClient {
    pub fn new() -> Self {
        Self
    }

    fn servers(&self, existing: Option<Value>) -> anyhow::Result<Vec<Value>> {
        match existing {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => bail!(
                "{} in {} settings is not an array",
                self.registration_path().join("."),
                self.name()
            ),
        }
    }

    /// Rewrite the server list with `update`, writing only when it changed.
    fn update_servers(
        &self,
        ctx: &ClientContext,
        create: bool,
        update: impl FnOnce(&mut Vec<Value>),
    ) -> anyhow::Result<()> {
        let (path, codec) = file::open(self, ctx)?;
        if !create && !path.exists() {
            return Ok(());
        }
        let doc = codec
            .read(&path)
            .with_context(|| format!("Failed to read {} config", self.name()))?;
        let key_path = self.registration_path();
        let existing = codec.get_key_path(&doc, &key_path)?;
        let before = self.servers(existing)?;

        let mut servers = before.clone();
        update(&mut servers);
        if servers == before && !create {
            return Ok(());
        }

        let updated = codec
            .set_key_path(&doc, &key_path, &Value::Array(servers))
            .with_context(|| format!("Failed to update {}", path.display()))?;
        if updated != doc {
            codec.write(&path, &updated)?;
            info!(client = self.name(), path = %path.display(), "server list updated");
        }
        Ok(())
    }
}

fn is_registration(entry: &Value) -> bool {
    entry.get("name").and_then(Value::as_str) == Some(SERVER_NAME)
}

impl McpClient for AugmentClient {
    fn name(&self) -> &'static str {
        "Augment Code"
    }

    fn id(&self) -> &'static str {
        "augment"
    }

    fn note(&self) -> Option<&'static str> {
        Some("Not auto-detected; select it explicitly to configure")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::JsonWithComments)
    }

    fn server_property(&self) -> &'static str {
        "augment.advanced"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, _ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(false)
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".vscode").join("settings.json"))
    }

    fn registration_path(&self) -> Vec<&'static str> {
        vec![self.server_property(), "mcpServers"]
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        merge_fields(json!({ "name": SERVER_NAME }), registration.to_value())
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        match file::read_registration(self, ctx).and_then(|found| self.servers(found)) {
            Ok(servers) => servers.iter().any(is_registration),
            Err(err) => {
                debug!(client = self.name(), error = %format!("{err:#}"), "installation check failed");
                false
            }
        }
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let entry = self.build_registration(request);
        InstallOutcome::from_result(self.update_servers(ctx, true, |servers| {
            servers.retain(|server| !is_registration(server));
            servers.push(entry);
        }))
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        InstallOutcome::from_result(self.update_servers(ctx, false, |servers| {
            servers.retain(|server| !is_registration(server));
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Platform;
    use crate::mcp::registration::{ApiKey, InstallMode, ServerConfigBuilder};
    use tempfile::TempDir;

    #[test]
    fn add_keeps_other_named_servers_and_comments() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux);
        let settings = temp.path().join(".vscode/settings.json");
        std::fs::create_dir_all(settings.parent().expect("parent")).expect("mkdir");
        std::fs::write(
            &settings,
            "{\n  // editor\n  \"editor.tabSize\": 2,\n  \"augment.advanced\": {\n    \"mcpServers\": [{\"name\": \"other\", \"command\": \"x\"}]\n  }\n}\n",
        )
        .expect("write settings");

        let client = AugmentClient::new();
        let key = ApiKey::parse("nk_abc").expect("valid key");
        let builder = ServerConfigBuilder::default();
        let request = InstallRequest::new(&key, InstallMode::Remote, &builder);

        assert!(client.add(&ctx, &request).is_success());
        assert!(client.add(&ctx, &request).is_success());
        assert!(client.is_installed(&ctx));

        let text = std::fs::read_to_string(&settings).expect("read settings");
        assert!(text.contains("// editor"));
        assert_eq!(text.matches("\"nia\"").count(), 1);
        assert!(text.contains("\"other\""));

        assert!(client.remove(&ctx).is_success());
        assert!(!client.is_installed(&ctx));
        let text = std::fs::read_to_string(&settings).expect("read settings");
        assert!(text.contains("\"other\""));
        assert!(!text.contains("\"nia\""));
    }

    #[test]
    fn remove_without_settings_file_succeeds() {
        let temp = TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), Platform::Linux);

        assert!(AugmentClient::new().remove(&ctx).is_success());
        assert!(!temp.path().join(".vscode").exists());
    }
}
