//! Codex CLI client implementation.
//!
//! Prefers `codex mcp add`; falls back to `[mcp_servers.nia]` in
//! `~/.codex/config.toml`. Local (stdio) only.

use std::path::PathBuf;

use crate::client::cli::{AgentCli, CliAttempt, ListFormat, McpCommands, args};
use crate::client::{ClientContext, ClientError, InstallMechanism, McpClient, file};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

/// Per-user package manager bin directories, relative to home.
pub(crate) const JS_BIN_DIRS: &[&str] = &[".bun/bin", ".npm/bin", ".yarn/bin"];

#[derive(Debug)]
pub struct CodexClient {
    cli: AgentCli,
}

impl Default for CodexClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CodexClient {
    pub fn new() -> Self {
        Self {
            cli: AgentCli::new("Codex CLI", "codex", JS_BIN_DIRS),
        }
    }

    fn commands() -> McpCommands {
        McpCommands {
            list: args(&["mcp", "list", "--json"]),
            list_format: ListFormat::JsonArray,
            remove: args(&["mcp", "remove", SERVER_NAME]),
        }
    }

    /// Arguments for `codex mcp add`. Remote registrations have no CLI form.
    pub fn add_args(registration: &ServerRegistration) -> Option<Vec<String>> {
        let ServerRegistration::Local { env, .. } = registration else {
            return None;
        };
        let mut argv = args(&["mcp", "add", SERVER_NAME]);
        for (name, value) in env {
            argv.push("--env".to_string());
            argv.push(format!("{name}={value}"));
        }
        argv.push("--".to_string());
        argv.extend(registration.command_line().unwrap_or_default());
        Some(argv)
    }
}

impl McpClient for CodexClient {
    fn name(&self) -> &'static str {
        "Codex CLI"
    }

    fn id(&self) -> &'static str {
        "codex"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://developers.openai.com/codex/mcp/")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports local mode, uses CLI configuration")
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::HybridCliThenConfigFile
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::Toml)
    }

    fn server_property(&self) -> &'static str {
        "mcp_servers"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(self.cli.resolve(ctx).is_some() || self.config_path(ctx)?.is_file())
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".codex").join("config.toml"))
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        self.cli.has_server(ctx, &Self::commands()) || file::has_registration(self, ctx)
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let registration = request.registration(self.effective_mode(request.mode));
        let attempt = match Self::add_args(&registration) {
            Some(add) => self.cli.register(ctx, &Self::commands(), &add),
            None => CliAttempt::Unavailable,
        };
        attempt.or_fallback(self.name(), || {
            file::write_registration(self, ctx, &self.shape_registration(&registration))
        })
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        self.cli
            .unregister(ctx, &Self::commands())
            .or_fallback(self.name(), || file::delete_registration(self, ctx))
    }
}
