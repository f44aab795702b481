//! Claude Code client implementation.
//!
//! Registers through `claude mcp add` at user scope. When the CLI is missing
//! or refuses, the entry is written to `~/.claude.json` directly.

use std::path::PathBuf;

use crate::client::cli::{AgentCli, ListFormat, McpCommands, args};
use crate::client::{ClientContext, ClientError, InstallMechanism, McpClient, file};
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

#[derive(Debug)]
pub struct ClaudeCodeClient {
    cli: AgentCli,
}

impl Default for ClaudeCodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaudeCodeClient {
    pub fn new() -> Self {
        Self {
            cli: AgentCli::new("Claude Code", "claude", &[".claude/local"]),
        }
    }

    fn commands() -> McpCommands {
        McpCommands {
            list: args(&["mcp", "list"]),
            list_format: ListFormat::Lines,
            remove: args(&["mcp", "remove", "--scope", "user", SERVER_NAME]),
        }
    }

    /// Arguments for `claude mcp add`.
    pub fn add_args(registration: &ServerRegistration) -> Vec<String> {
        match registration {
            ServerRegistration::Remote { url, headers } => {
                let mut argv = args(&["mcp", "add", "--transport", "http", SERVER_NAME]);
                argv.push(url.clone());
                for (name, value) in headers {
                    argv.push("--header".to_string());
                    argv.push(format!("{name}: {value}"));
                }
                argv.extend(args(&["-s", "user"]));
                argv
            }
            ServerRegistration::Local { env, .. } => {
                let mut argv = args(&["mcp", "add", SERVER_NAME]);
                for (name, value) in env {
                    argv.push("-e".to_string());
                    argv.push(format!("{name}={value}"));
                }
                argv.extend(args(&["-s", "user", "--"]));
                argv.extend(registration.command_line().unwrap_or_default());
                argv
            }
        }
    }
}

impl McpClient for ClaudeCodeClient {
    fn name(&self) -> &'static str {
        "Claude Code"
    }

    fn id(&self) -> &'static str {
        "claude-code"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.anthropic.com/en/docs/claude-code/mcp-servers")
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::HybridCliThenConfigFile
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(self.cli.resolve(ctx).is_some() || self.config_path(ctx)?.is_file())
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".claude.json"))
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        self.cli.has_server(ctx, &Self::commands()) || file::has_registration(self, ctx)
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let registration = request.registration(self.effective_mode(request.mode));
        self.cli
            .register(ctx, &Self::commands(), &Self::add_args(&registration))
            .or_fallback(self.name(), || {
                file::write_registration(self, ctx, &self.shape_registration(&registration))
            })
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        self.cli
            .unregister(ctx, &Self::commands())
            .or_fallback(self.name(), || file::delete_registration(self, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::registration::{ApiKey, InstallMode, ServerConfigBuilder};

    fn registration(mode: InstallMode) -> ServerRegistration {
        let key = ApiKey::parse("nk_abc").expect("valid key");
        ServerConfigBuilder::default().build(&key, mode)
    }

    #[test]
    fn remote_add_args() {
        assert_eq!(
            ClaudeCodeClient::add_args(&registration(InstallMode::Remote)),
            args(&[
                "mcp",
                "add",
                "--transport",
                "http",
                "nia",
                "https://apigcp.trynia.ai/mcp",
                "--header",
                "Authorization: Bearer nk_abc",
                "-s",
                "user",
            ])
        );
    }

    #[test]
    fn local_add_args() {
        assert_eq!(
            ClaudeCodeClient::add_args(&registration(InstallMode::Local)),
            args(&[
                "mcp",
                "add",
                "nia",
                "-e",
                "NIA_API_KEY=nk_abc",
                "-e",
                "NIA_API_URL=https://apigcp.trynia.ai/",
                "-s",
                "user",
                "--",
                "pipx",
                "run",
                "--no-cache",
                "nia-mcp-server",
            ])
        );
    }
}
