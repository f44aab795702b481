//! Amp client implementation. Remote only, configured through `amp mcp`.

use std::path::PathBuf;

use crate::client::cli::{AgentCli, ListFormat, McpCommands, args};
use crate::client::codex::JS_BIN_DIRS;
use crate::client::{ClientContext, ClientError, InstallMechanism, McpClient};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

#[derive(Debug)]
pub struct AmpClient {
    cli: AgentCli,
}

impl Default for AmpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AmpClient {
    pub fn new() -> Self {
        Self {
            cli: AgentCli::new("Amp", "amp", JS_BIN_DIRS),
        }
    }

    fn commands() -> McpCommands {
        McpCommands {
            list: args(&["mcp", "list"]),
            list_format: ListFormat::Lines,
            remove: args(&["mcp", "remove", SERVER_NAME]),
        }
    }

    /// Arguments for `amp mcp add`. Amp headers are written `Name=value`.
    pub fn add_args(registration: &ServerRegistration) -> Option<Vec<String>> {
        let ServerRegistration::Remote { url, headers } = registration else {
            return None;
        };
        let mut argv = args(&["mcp", "add", SERVER_NAME]);
        for (name, value) in headers {
            argv.push("--header".to_string());
            argv.push(format!("{name}={value}"));
        }
        argv.push(url.clone());
        Some(argv)
    }
}

impl McpClient for AmpClient {
    fn name(&self) -> &'static str {
        "Amp"
    }

    fn id(&self) -> &'static str {
        "amp"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://ampcode.com/docs/customize/mcp")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Only supports remote mode, uses CLI configuration")
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::NativeCli
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        None
    }

    fn supports_local(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(self.cli.resolve(ctx).is_some())
    }

    fn config_path(&self, _ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Err(ClientError::UsesCli {
            client: self.name(),
        })
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        self.cli.has_server(ctx, &Self::commands())
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let registration = request.registration(self.effective_mode(request.mode));
        let Some(add) = Self::add_args(&registration) else {
            return InstallOutcome::failed("Amp only supports remote mode");
        };
        self.cli
            .register(ctx, &Self::commands(), &add)
            .into_outcome(self.name(), "Failed to add server to Amp")
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        self.cli
            .unregister(ctx, &Self::commands())
            .into_outcome(self.name(), "Failed to remove server from Amp")
    }
}
