//! Integration tests for clients with TOML configuration.

mod support;

use nia_wizard_core::client::codex::CodexClient;
use nia_wizard_core::client::vibe::VibeClient;
use nia_wizard_core::client::McpClient;
use nia_wizard_core::mcp::{InstallMode, ServerConfigBuilder};

use support::{Sandbox, api_key, request};

const VIBE_CONFIG: &str = r#"# Vibe settings
active_model = "devstral"

[[mcp_servers]]
name = "fetch"
transport = "stdio"
command = "uvx"
args = ["mcp-server-fetch"]
"#;

#[test]
fn vibe_add_is_idempotent_and_keeps_other_servers() {
    let sandbox = Sandbox::linux();
    sandbox.write(".vibe/config.toml", VIBE_CONFIG);
    let client = VibeClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.detect(&sandbox.ctx));
    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder)).is_success());
    let first = sandbox.read(".vibe/config.toml");
    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());
    let second = sandbox.read(".vibe/config.toml");

    assert_eq!(first, second);
    assert!(first.starts_with("# Vibe settings"));
    assert!(first.contains("name = \"fetch\""));
    assert_eq!(first.matches("[[mcp_servers]]").count(), 2);
    assert!(first.contains("transport = \"streamable-http\""));
    assert!(first.contains("url = \"https://apigcp.trynia.ai/mcp\""));
    assert!(client.is_installed(&sandbox.ctx));
}

#[test]
fn vibe_remove_keeps_sibling_tables() {
    let sandbox = Sandbox::linux();
    sandbox.write(".vibe/config.toml", VIBE_CONFIG);
    let client = VibeClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());
    assert!(client.remove(&sandbox.ctx).is_success());

    let text = sandbox.read(".vibe/config.toml");
    assert!(text.contains("name = \"fetch\""));
    assert!(text.contains("active_model = \"devstral\""));
    assert!(!text.contains("name = \"nia\""));
    assert!(!client.is_installed(&sandbox.ctx));
}

#[test]
fn vibe_never_creates_its_config() {
    let sandbox = Sandbox::linux();
    let client = VibeClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(!client.detect(&sandbox.ctx));
    let outcome = client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder));

    let error = outcome.error.expect("missing config is an error");
    assert!(error.starts_with("Mistral Vibe CLI config not found at"), "{error}");
    assert!(!sandbox.path(".vibe").exists());
}

#[test]
fn vibe_remove_without_config_succeeds() {
    let sandbox = Sandbox::linux();
    let client = VibeClient::new();

    let outcome = client.remove(&sandbox.ctx);

    assert!(outcome.is_success(), "{outcome:?}");
    assert!(!sandbox.path(".vibe").exists());
}

#[test]
fn codex_without_cli_writes_its_toml_config() {
    let sandbox = Sandbox::linux();
    sandbox.write(
        ".codex/config.toml",
        "model = \"o4-mini\"\n\n[mcp_servers.docs]\ncommand = \"docs-mcp\"\n",
    );
    let client = CodexClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.detect(&sandbox.ctx));
    let outcome = client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder));
    assert!(outcome.is_success(), "{outcome:?}");

    let text = sandbox.read(".codex/config.toml");
    assert!(text.starts_with("model = \"o4-mini\""));
    assert!(text.contains("[mcp_servers.docs]"));
    assert!(text.contains("[mcp_servers.nia]"));
    assert!(text.contains("command = \"pipx\""));
    assert!(text.contains("NIA_API_KEY = \"nk_test_key_123\""));
    assert!(client.is_installed(&sandbox.ctx));

    assert!(client.remove(&sandbox.ctx).is_success());
    let text = sandbox.read(".codex/config.toml");
    assert!(!text.contains("[mcp_servers.nia]"));
    assert!(text.contains("[mcp_servers.docs]"));
}
