//! Mistral Vibe CLI client implementation.
//!
//! Vibe lists servers as `[[mcp_servers]]` tables identified by `name`.
//! The config file is created by Vibe itself; it is never created here.

use std::path::PathBuf;

use anyhow::Context;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::client::{ClientContext, ClientError, McpClient};
use crate::config::codec::{ConfigCodec, ConfigFormat, TomlCodec};
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

#[derive(Debug, Default)]
pub struct VibeClient {
    codec: TomlCodec,
}

impl VibeClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing_config(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        let path = self.config_path(ctx)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(ClientError::ConfigMissing {
                client: self.name(),
                path,
            })
        }
    }

    fn upsert(&self, ctx: &ClientContext, entry: &Value) -> anyhow::Result<()> {
        let path = self.existing_config(ctx)?;
        let doc = self
            .codec
            .read(&path)
            .with_context(|| format!("Failed to read {} config", self.name()))?;
        let entry = entry.as_object().cloned().unwrap_or_default();
        let updated = self
            .codec
            .upsert_named_entry(&doc, self.server_property(), SERVER_NAME, &entry)
            .with_context(|| format!("Failed to update {}", path.display()))?;
        if updated != doc {
            self.codec.write(&path, &updated)?;
            info!(client = self.name(), path = %path.display(), "registration written");
        }
        Ok(())
    }

    fn delete(&self, ctx: &ClientContext) -> anyhow::Result<()> {
        let path = self.config_path(ctx)?;
        if !path.is_file() {
            return Ok(());
        }
        let doc = self
            .codec
            .read(&path)
            .with_context(|| format!("Failed to read {} config", self.name()))?;
        let updated = self
            .codec
            .remove_named_entry(&doc, self.server_property(), SERVER_NAME)
            .with_context(|| format!("Failed to update {}", path.display()))?;
        if updated != doc {
            self.codec.write(&path, &updated)?;
            info!(client = self.name(), path = %path.display(), "registration removed");
        }
        Ok(())
    }
}

impl McpClient for VibeClient {
    fn name(&self) -> &'static str {
        "Mistral Vibe CLI"
    }

    fn id(&self) -> &'static str {
        "vibe"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://github.com/mistralai/mistral-vibe?tab=readme-ov-file#mcp-server-configuration")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports remote mode, uses TOML config")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::Toml)
    }

    fn server_property(&self) -> &'static str {
        "mcp_servers"
    }

    fn supports_local(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(self.config_path(ctx)?.is_file())
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".vibe").join("config.toml"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        match registration {
            ServerRegistration::Remote { url, headers } => json!({
                "name": SERVER_NAME,
                "transport": "streamable-http",
                "url": url,
                "headers": headers,
            }),
            local => local.to_value(),
        }
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        let found = self.existing_config(ctx).map_err(anyhow::Error::from).and_then(|path| {
            let doc = self.codec.read(&path)?;
            Ok(self
                .codec
                .named_entry(&doc, self.server_property(), SERVER_NAME)?)
        });
        match found {
            Ok(entry) => entry.is_some(),
            Err(err) => {
                debug!(client = self.name(), error = %format!("{err:#}"), "installation check failed");
                false
            }
        }
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let entry = self.build_registration(request);
        InstallOutcome::from_result(self.upsert(ctx, &entry))
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        InstallOutcome::from_result(self.delete(ctx))
    }
}
