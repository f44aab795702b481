//! Driving an agent's own `mcp` subcommands.
//!
//! Commands are always built as argument vectors and never go through a
//! shell. The resolved binary is looked up once per client instance.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{ClientContext, ClientError, probe, process};
use crate::mcp::registration::{API_KEY_PREFIX, SERVER_NAME};
use crate::types::InstallOutcome;

/// Result of trying the agent CLI, before any fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAttempt {
    Succeeded,
    /// The binary could not be found.
    Unavailable,
    /// The binary ran and reported an error.
    Failed(String),
}

impl fmt::Display for CliAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliAttempt::Succeeded => f.write_str("succeeded"),
            CliAttempt::Unavailable => f.write_str("CLI not found"),
            CliAttempt::Failed(message) => write!(f, "CLI failed: {message}"),
        }
    }
}

impl CliAttempt {
    /// Outcome for agents with no config file to fall back to.
    pub fn into_outcome(self, client: &'static str, failure: &str) -> InstallOutcome {
        match self {
            CliAttempt::Succeeded => InstallOutcome::ok(),
            CliAttempt::Unavailable => {
                InstallOutcome::failed(ClientError::CliNotFound { client }.to_string())
            }
            CliAttempt::Failed(message) => InstallOutcome::failed(format!("{failure}: {message}")),
        }
    }

    /// Outcome for hybrid agents: run `fallback` unless the CLI succeeded.
    pub fn or_fallback(
        self,
        client: &'static str,
        fallback: impl FnOnce() -> anyhow::Result<()>,
    ) -> InstallOutcome {
        if self == CliAttempt::Succeeded {
            return InstallOutcome::ok();
        }
        warn!(client, attempt = %self, "editing the config file instead");
        let result = fallback().with_context(|| format!("{client}: {self}; config file fallback failed"));
        InstallOutcome::from_result(result)
    }
}

/// How the agent prints `mcp list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// One server per line, name first.
    Lines,
    /// A JSON array of objects with a `name` field.
    JsonArray,
}

/// The listing and removal subcommands of one agent CLI.
#[derive(Debug, Clone)]
pub struct McpCommands {
    pub list: Vec<String>,
    pub list_format: ListFormat,
    pub remove: Vec<String>,
}

/// Owned argument vector from string literals.
pub fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

/// An agent executable plus the directories it is usually installed to.
#[derive(Debug)]
pub struct AgentCli {
    client: &'static str,
    binary: &'static str,
    /// Install directories relative to the home directory.
    home_dirs: &'static [&'static str],
    resolved: OnceLock<Option<PathBuf>>,
}

impl AgentCli {
    pub const fn new(
        client: &'static str,
        binary: &'static str,
        home_dirs: &'static [&'static str],
    ) -> Self {
        Self {
            client,
            binary,
            home_dirs,
            resolved: OnceLock::new(),
        }
    }

    pub fn binary(&self) -> &'static str {
        self.binary
    }

    /// Path to the executable, memoised after the first lookup.
    pub fn resolve(&self, ctx: &ClientContext) -> Option<&Path> {
        self.resolved
            .get_or_init(|| {
                let candidates: Vec<PathBuf> = self
                    .home_dirs
                    .iter()
                    .map(|dir| ctx.home(dir).join(self.binary))
                    .collect();
                probe::find_binary(ctx, self.binary, &candidates)
            })
            .as_deref()
    }

    fn run(&self, ctx: &ClientContext, program: &Path, args: &[String]) -> Result<Output, ClientError> {
        let shown = self.display_command(args);
        debug!(command = %shown, "running agent CLI");
        process::output_within(Command::new(program).args(args), ctx.command_timeout).map_err(
            |err| ClientError::CliFailed {
                command: shown,
                message: err.to_string(),
            },
        )
    }

    /// Run `args`, mapping a missing binary and a non-zero exit to [`CliAttempt`].
    pub fn invoke(&self, ctx: &ClientContext, args: &[String]) -> CliAttempt {
        let Some(program) = self.resolve(ctx) else {
            return CliAttempt::Unavailable;
        };
        match self.run(ctx, program, args) {
            Ok(output) if output.status.success() => {
                info!(command = %self.display_command(args), "agent CLI succeeded");
                CliAttempt::Succeeded
            }
            Ok(output) => CliAttempt::Failed(failure_message(&output)),
            Err(err) => CliAttempt::Failed(err.to_string()),
        }
    }

    /// Whether the agent's list command reports a server named exactly `nia`.
    pub fn lists_server(
        &self,
        ctx: &ClientContext,
        args: &[String],
        format: ListFormat,
    ) -> Result<bool, ClientError> {
        let program = self.resolve(ctx).ok_or(ClientError::CliNotFound {
            client: self.client,
        })?;
        let output = self.run(ctx, program, args)?;
        if !output.status.success() {
            return Err(ClientError::CliFailed {
                command: self.display_command(args),
                message: failure_message(&output),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(match format {
            ListFormat::Lines => lines_name_server(&stdout, SERVER_NAME),
            ListFormat::JsonArray => json_names_server(&stdout, SERVER_NAME),
        })
    }

    /// Whether the agent reports the registration, with errors counted as "no".
    pub fn has_server(&self, ctx: &ClientContext, commands: &McpCommands) -> bool {
        match self.lists_server(ctx, &commands.list, commands.list_format) {
            Ok(found) => found,
            Err(err) => {
                debug!(client = self.client, error = %err, "could not list servers");
                false
            }
        }
    }

    /// Run `add`, removing an existing registration first so re-adding
    /// replaces it.
    pub fn register(&self, ctx: &ClientContext, commands: &McpCommands, add: &[String]) -> CliAttempt {
        if self.resolve(ctx).is_none() {
            return CliAttempt::Unavailable;
        }
        if self.has_server(ctx, commands) {
            let removed = self.invoke(ctx, &commands.remove);
            if removed != CliAttempt::Succeeded {
                debug!(client = self.client, attempt = %removed, "removing the previous registration");
            }
        }
        self.invoke(ctx, add)
    }

    /// Run `remove` when the registration is listed. Nothing listed is success.
    pub fn unregister(&self, ctx: &ClientContext, commands: &McpCommands) -> CliAttempt {
        if self.resolve(ctx).is_none() {
            return CliAttempt::Unavailable;
        }
        match self.lists_server(ctx, &commands.list, commands.list_format) {
            Ok(false) => CliAttempt::Succeeded,
            Ok(true) => self.invoke(ctx, &commands.remove),
            Err(err) => {
                debug!(client = self.client, error = %err, "could not list servers, removing anyway");
                self.invoke(ctx, &commands.remove)
            }
        }
    }

    /// Command line for logs and error messages, with API keys masked.
    pub fn display_command(&self, args: &[String]) -> String {
        let mut parts = vec![self.binary.to_string()];
        parts.extend(args.iter().map(|arg| redact(arg)));
        parts.join(" ")
    }
}

fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = [stderr.trim(), stdout.trim()]
        .into_iter()
        .find(|text| !text.is_empty())
        .map(redact);
    match detail {
        Some(detail) => format!("{} ({detail})", output.status),
        None => output.status.to_string(),
    }
}

/// Mask everything after an API key prefix.
pub fn redact(text: &str) -> String {
    match text.find(API_KEY_PREFIX) {
        Some(index) => format!("{}{API_KEY_PREFIX}***", &text[..index]),
        None => text.to_string(),
    }
}

/// Whether any line's first word is exactly `name`.
///
/// Words are split on whitespace, `:`, `,` and table borders; leading
/// status glyphs (`✓`, `•`, `-`) are skipped.
pub fn lines_name_server(output: &str, name: &str) -> bool {
    output.lines().any(|line| {
        line.split(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '|' | '│'))
            .find(|word| word.chars().any(char::is_alphanumeric))
            == Some(name)
    })
}

/// Whether a JSON array from `mcp list --json` has an entry named `name`.
pub fn json_names_server(output: &str, name: &str) -> bool {
    match serde_json::from_str::<Vec<Value>>(output.trim()) {
        Ok(entries) => entries
            .iter()
            .any(|entry| entry.get("name").and_then(Value::as_str) == Some(name)),
        Err(err) => {
            debug!(error = %err, "list output is not a JSON array, falling back to lines");
            lines_name_server(output, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_matching_is_token_exact() {
        let output = "Checking MCP server health...\n\n\
                      niagara: https://example.com/mcp (HTTP) - ✓ Connected\n\
                      other: pipx run nia-mcp-server - ✓ Connected\n";
        assert!(!lines_name_server(output, "nia"));

        let output = "nia: https://apigcp.trynia.ai/mcp (HTTP) - ✓ Connected\n";
        assert!(lines_name_server(output, "nia"));
    }

    #[test]
    fn line_matching_skips_status_glyphs_and_table_borders() {
        assert!(lines_name_server("  ✓ nia  https://x\n", "nia"));
        assert!(lines_name_server("│ nia │ pipx │\n", "nia"));
        assert!(!lines_name_server("│ Name │ Command │\n", "nia"));
    }

    #[test]
    fn json_matching_reads_names() {
        assert!(json_names_server(r#"[{"name":"other"},{"name":"nia"}]"#, "nia"));
        assert!(!json_names_server(r#"[{"name":"nia-dev"}]"#, "nia"));
        assert!(!json_names_server("[]", "nia"));
    }

    #[test]
    fn redact_masks_api_keys() {
        assert_eq!(redact("NIA_API_KEY=nk_secret"), "NIA_API_KEY=nk_***");
        assert_eq!(redact("Authorization: Bearer nk_secret"), "Authorization: Bearer nk_***");
        assert_eq!(redact("--scope"), "--scope");
    }

    #[test]
    fn display_command_is_redacted() {
        let cli = AgentCli::new("Claude Code", "claude", &[]);
        let args = vec!["mcp".to_string(), "add".to_string(), "-e".to_string(), "NIA_API_KEY=nk_abc".to_string()];
        assert_eq!(cli.display_command(&args), "claude mcp add -e NIA_API_KEY=nk_***");
    }

    #[test]
    fn unavailable_cli_without_fallback_is_a_failure() {
        let outcome = CliAttempt::Unavailable.into_outcome("Amp", "Failed to add server to Amp");
        assert_eq!(outcome.error.as_deref(), Some("Amp CLI not found"));

        let outcome = CliAttempt::Failed("exit status: 1".to_string())
            .into_outcome("Amp", "Failed to add server to Amp");
        assert_eq!(
            outcome.error.as_deref(),
            Some("Failed to add server to Amp: exit status: 1")
        );
    }

    #[test]
    fn fallback_runs_only_when_cli_did_not_succeed() {
        let mut ran = false;
        assert!(CliAttempt::Succeeded.or_fallback("Claude Code", || {
            ran = true;
            Ok(())
        }).is_success());
        assert!(!ran);

        let outcome = CliAttempt::Unavailable.or_fallback("Claude Code", || Ok(()));
        assert!(outcome.is_success());

        let outcome = CliAttempt::Failed("boom".to_string())
            .or_fallback("Claude Code", || Err(anyhow::anyhow!("read-only")));
        assert_eq!(
            outcome.error.as_deref(),
            Some("Claude Code: CLI failed: boom; config file fallback failed: read-only")
        );
    }

    #[test]
    fn unresolvable_binary_is_unavailable() {
        let temp = tempfile::TempDir::new().expect("create temp dir");
        let ctx = ClientContext::sandboxed(temp.path(), crate::client::Platform::Linux);
        let cli = AgentCli::new("Amp", "amp", &[".amp/bin"]);

        assert_eq!(cli.invoke(&ctx, &["mcp".to_string()]), CliAttempt::Unavailable);
        assert!(matches!(
            cli.lists_server(&ctx, &[], ListFormat::Lines),
            Err(ClientError::CliNotFound { client: "Amp" })
        ));
    }
}
