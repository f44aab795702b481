//! Factory client implementation, driven by the `droid` CLI.

use std::path::PathBuf;

use crate::client::cli::{AgentCli, ListFormat, McpCommands, args};
use crate::client::codex::JS_BIN_DIRS;
use crate::client::{ClientContext, ClientError, InstallMechanism, McpClient};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::{InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

#[derive(Debug)]
pub struct DroidClient {
    cli: AgentCli,
}

impl Default for DroidClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DroidClient {
    pub fn new() -> Self {
        Self {
            cli: AgentCli::new("Factory (droid)", "droid", JS_BIN_DIRS),
        }
    }

    fn commands() -> McpCommands {
        McpCommands {
            list: args(&["mcp", "list"]),
            list_format: ListFormat::Lines,
            remove: args(&["mcp", "remove", SERVER_NAME]),
        }
    }

    /// Arguments for `droid mcp add`. The local launcher is passed as one
    /// command string.
    pub fn add_args(registration: &ServerRegistration) -> Vec<String> {
        let mut argv = args(&["mcp", "add", SERVER_NAME]);
        match registration {
            ServerRegistration::Remote { url, headers } => {
                argv.push(url.clone());
                argv.extend(args(&["--type", "http"]));
                for (name, value) in headers {
                    argv.push("--header".to_string());
                    argv.push(format!("{name}: {value}"));
                }
            }
            ServerRegistration::Local { env, .. } => {
                argv.push(registration.command_line().unwrap_or_default().join(" "));
                for (name, value) in env {
                    argv.push("--env".to_string());
                    argv.push(format!("{name}={value}"));
                }
            }
        }
        argv
    }
}

impl McpClient for DroidClient {
    fn name(&self) -> &'static str {
        "Factory"
    }

    fn id(&self) -> &'static str {
        "factory"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://docs.factory.ai/cli/configuration/mcp")
    }

    fn note(&self) -> Option<&'static str> {
        Some("Uses droid CLI for configuration")
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::NativeCli
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        None
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
        self.cli
            .register(ctx, &Self::commands(), &Self::add_args(&registration))
            .into_outcome("Factory (droid)", "Failed to add server to Factory")
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        self.cli
            .unregister(ctx, &Self::commands())
            .into_outcome("Factory (droid)", "Failed to remove server from Factory")
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
            DroidClient::add_args(&registration(InstallMode::Remote)),
            args(&[
                "mcp",
                "add",
                "nia",
                "https://apigcp.trynia.ai/mcp",
                "--type",
                "http",
                "--header",
                "Authorization: Bearer nk_abc",
            ])
        );
    }

    #[test]
    fn local_add_args_join_the_launcher() {
        let argv = DroidClient::add_args(&registration(InstallMode::Local));
        assert_eq!(argv[3], "pipx run --no-cache nia-mcp-server");
        assert_eq!(&argv[4..6], &args(&["--env", "NIA_API_KEY=nk_abc"])[..]);
    }

    #[test]
    fn config_path_is_not_available() {
        let ctx = ClientContext::sandboxed("/home/dev", crate::client::Platform::Linux);
        assert!(matches!(
            DroidClient::new().config_path(&ctx),
            Err(ClientError::UsesCli { client: "Factory" })
        ));
    }
}
