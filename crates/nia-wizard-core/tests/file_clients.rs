//! Integration tests for clients that edit agent config files.

mod support;

use nia_wizard_core::client::claude_desktop::ClaudeDesktopClient;
use nia_wizard_core::client::codex::CodexClient;
use nia_wizard_core::client::continue_dev::ContinueClient;
use nia_wizard_core::client::cursor::CursorClient;
use nia_wizard_core::client::kiro::KiroClient;
use nia_wizard_core::client::vscode::VsCodeClient;
use nia_wizard_core::client::windsurf::WindsurfClient;
use nia_wizard_core::client::zed::ZedClient;
use nia_wizard_core::client::{ClientError, McpClient, Platform};
use nia_wizard_core::config::{ConfigDocument, ConfigFormat, codec_for};
use nia_wizard_core::mcp::{InstallMode, ServerConfigBuilder};
use serde_json::json;

use support::{Sandbox, api_key, request};

fn parse_jsonc(text: &str) -> serde_json::Value {
    codec_for(ConfigFormat::JsonWithComments)
        .to_value(&ConfigDocument::new(ConfigFormat::JsonWithComments, text))
        .expect("valid JSONC")
}

#[test]
fn cursor_add_is_idempotent() {
    let sandbox = Sandbox::new(Platform::MacOs);
    let client = CursorClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();
    let req = request(&key, InstallMode::Remote, &builder);

    assert!(client.add(&sandbox.ctx, &req).is_success());
    let first = sandbox.read(".cursor/mcp.json");
    assert!(client.add(&sandbox.ctx, &req).is_success());
    let second = sandbox.read(".cursor/mcp.json");

    assert_eq!(first, second);
    assert!(first.ends_with("}\n"));
    assert_eq!(
        sandbox.read_json(".cursor/mcp.json"),
        json!({
            "mcpServers": {
                "nia": {
                    "url": "https://apigcp.trynia.ai/mcp",
                    "headers": {"Authorization": "Bearer nk_test_key_123"}
                }
            }
        })
    );
    assert!(client.is_installed(&sandbox.ctx));
}

#[test]
fn add_then_remove_keeps_unrelated_keys() {
    let sandbox = Sandbox::new(Platform::MacOs);
    sandbox.write(
        ".cursor/mcp.json",
        r#"{
  "unrelated": "keep-me",
  "mcpServers": {
    "other": {"command": "other-server"}
  }
}
"#,
    );
    let client = CursorClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    let outcome = client.add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder));
    assert!(outcome.is_success(), "{outcome:?}");

    let config = sandbox.read_json(".cursor/mcp.json");
    assert_eq!(config["unrelated"], "keep-me");
    assert_eq!(config["mcpServers"]["other"]["command"], "other-server");
    assert_eq!(config["mcpServers"]["nia"]["type"], "stdio");
    assert_eq!(config["mcpServers"]["nia"]["command"], "pipx");

    assert!(client.remove(&sandbox.ctx).is_success());

    let config = sandbox.read_json(".cursor/mcp.json");
    assert_eq!(config["unrelated"], "keep-me");
    assert_eq!(config["mcpServers"]["other"]["command"], "other-server");
    assert!(config["mcpServers"].get("nia").is_none());
    assert!(!client.is_installed(&sandbox.ctx));
}

#[test]
fn remove_without_config_file_succeeds_and_writes_nothing() {
    let sandbox = Sandbox::linux();
    let client = KiroClient::new();

    assert!(client.remove(&sandbox.ctx).is_success());
    assert!(!sandbox.path(".kiro").exists());
}

#[test]
fn malformed_config_is_reported_and_left_untouched() {
    let sandbox = Sandbox::linux();
    let original = "{ \"mcpServers\": { \"other\": ";
    sandbox.write(".kiro/mcp.json", original);
    let client = KiroClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    let outcome = client.add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder));

    assert!(!outcome.is_success());
    let error = outcome.error.expect("error message");
    assert!(error.contains("Failed to read Kiro config"), "{error}");
    assert_eq!(sandbox.read(".kiro/mcp.json"), original);
    assert!(!client.is_installed(&sandbox.ctx));
}

#[test]
fn non_object_server_property_is_not_overwritten() {
    let sandbox = Sandbox::linux();
    let original = "{\n  \"mcpServers\": [\"not\", \"an\", \"object\"]\n}\n";
    sandbox.write(".kiro/mcp.json", original);
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    let outcome = KiroClient::new().add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder));

    assert!(!outcome.is_success());
    assert_eq!(sandbox.read(".kiro/mcp.json"), original);
}

#[test]
fn vscode_keeps_comments_and_trailing_commas() {
    let sandbox = Sandbox::linux();
    let original = r#"{
  // Servers I use every day
  "servers": {
    "github": {
      "type": "http",
      "url": "https://api.githubcopilot.com/mcp/"
    }, // hosted
  },
  /* prompt inputs */
  "inputs": [],
}
"#;
    sandbox.write(".config/Code/User/mcp.json", original);
    let client = VsCodeClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());

    let text = sandbox.read(".config/Code/User/mcp.json");
    assert!(text.contains("// Servers I use every day"));
    assert!(text.contains("// hosted"));
    assert!(text.contains("/* prompt inputs */"));
    let config = parse_jsonc(&text);
    assert_eq!(config["servers"]["github"]["type"], "http");
    assert_eq!(
        config["servers"]["nia"],
        json!({
            "type": "http",
            "url": "https://apigcp.trynia.ai/mcp",
            "headers": {"Authorization": "Bearer nk_test_key_123"}
        })
    );
    assert!(client.is_installed(&sandbox.ctx));

    assert!(client.remove(&sandbox.ctx).is_success());

    let text = sandbox.read(".config/Code/User/mcp.json");
    assert!(text.contains("// Servers I use every day"));
    assert!(text.contains("/* prompt inputs */"));
    let config = parse_jsonc(&text);
    assert!(config["servers"].get("nia").is_none());
    assert_eq!(config["servers"]["github"]["url"], "https://api.githubcopilot.com/mcp/");
}

#[test]
fn vscode_mode_fidelity() {
    let sandbox = Sandbox::linux();
    let client = VsCodeClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder)).is_success());
    let config = parse_jsonc(&sandbox.read(".config/Code/User/mcp.json"));
    assert_eq!(config["servers"]["nia"]["type"], "stdio");
    assert_eq!(config["servers"]["nia"]["env"]["NIA_API_KEY"], "nk_test_key_123");

    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());
    let config = parse_jsonc(&sandbox.read(".config/Code/User/mcp.json"));
    assert_eq!(config["servers"]["nia"]["type"], "http");
    assert!(config["servers"]["nia"].get("command").is_none());
}

#[test]
fn local_only_client_ignores_remote_request() {
    let sandbox = Sandbox::new(Platform::MacOs);
    let client = ClaudeDesktopClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert_eq!(client.effective_mode(InstallMode::Remote), InstallMode::Local);
    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());

    let config = sandbox.read_json("Library/Application Support/Claude/claude_desktop_config.json");
    assert_eq!(config["mcpServers"]["nia"]["command"], "pipx");
    assert!(config["mcpServers"]["nia"].get("url").is_none());
}

#[test]
fn platform_restricted_client_rejects_other_hosts() {
    let sandbox = Sandbox::linux();
    let client = ClaudeDesktopClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(matches!(
        client.config_path(&sandbox.ctx),
        Err(ClientError::UnsupportedPlatform { .. })
    ));
    assert!(!client.detect(&sandbox.ctx));
    let outcome = client.add(&sandbox.ctx, &request(&key, InstallMode::Local, &builder));
    assert_eq!(
        outcome.error.as_deref(),
        Some("Claude Desktop is not available on Linux")
    );
}

#[test]
fn windsurf_remote_uses_server_url() {
    let sandbox = Sandbox::new(Platform::MacOs);
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(WindsurfClient::new()
        .add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder))
        .is_success());

    let config = sandbox.read_json(".codeium/windsurf/mcp_config.json");
    assert_eq!(config["mcpServers"]["nia"]["serverUrl"], "https://apigcp.trynia.ai/mcp");
    assert!(config["mcpServers"]["nia"].get("url").is_none());
}

#[test]
fn continue_nests_the_transport() {
    let sandbox = Sandbox::linux();
    let client = ContinueClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());

    let config = sandbox.read_json(".continue/config.json");
    assert_eq!(
        config["experimental"]["nia"]["modelContextProtocolServer"]["transport"]["type"],
        "http"
    );
    assert!(client.is_installed(&sandbox.ctx));
}

#[test]
fn zed_writes_context_servers_and_honours_xdg() {
    let mut sandbox = Sandbox::linux();
    let xdg = sandbox.mkdir("xdg");
    sandbox.ctx.xdg_config_home = Some(xdg);
    sandbox.write("xdg/zed/settings.json", "// Zed settings\n{\n  \"theme\": \"One Dark\"\n}\n");
    let client = ZedClient::new();
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    assert!(client.detect(&sandbox.ctx));
    assert!(client.add(&sandbox.ctx, &request(&key, InstallMode::Remote, &builder)).is_success());

    let text = sandbox.read("xdg/zed/settings.json");
    assert!(text.starts_with("// Zed settings"));
    let config = parse_jsonc(&text);
    assert_eq!(config["theme"], "One Dark");
    assert_eq!(config["context_servers"]["nia"]["source"], "custom");
    assert_eq!(config["context_servers"]["nia"]["command"], "pipx");
}

#[test]
fn detection_uses_config_directory() {
    let sandbox = Sandbox::linux();
    let client = KiroClient::new();

    assert!(!client.detect(&sandbox.ctx));
    sandbox.mkdir(".kiro");
    assert!(client.detect(&sandbox.ctx));
    // Probing never creates anything.
    assert!(!sandbox.path(".kiro/mcp.json").exists());
}

struct RoundTrip {
    client: Box<dyn McpClient>,
    platform: Platform,
    path: &'static str,
    format: ConfigFormat,
    seed: &'static str,
    servers: &'static str,
    comment: Option<&'static str>,
}

fn round_trips() -> Vec<RoundTrip> {
    vec![
        RoundTrip {
            client: Box::new(CursorClient::new()),
            platform: Platform::MacOs,
            path: ".cursor/mcp.json",
            format: ConfigFormat::Json,
            seed: r#"{"unrelated": "keep-me", "mcpServers": {"other": {"command": "x"}}}"#,
            servers: "mcpServers",
            comment: None,
        },
        RoundTrip {
            client: Box::new(VsCodeClient::new()),
            platform: Platform::Linux,
            path: ".config/Code/User/mcp.json",
            format: ConfigFormat::JsonWithComments,
            seed: "{\n  // user servers\n  \"unrelated\": \"keep-me\",\n  \"servers\": {\n    \"other\": { \"command\": \"x\" }, // keep me\n  },\n}\n",
            servers: "servers",
            comment: Some("// keep me"),
        },
        RoundTrip {
            client: Box::new(ZedClient::new()),
            platform: Platform::Linux,
            path: ".config/zed/settings.json",
            format: ConfigFormat::JsonWithComments,
            seed: "// Zed settings\n{\n  \"unrelated\": \"keep-me\",\n  \"context_servers\": {\n    /* local tools */\n    \"other\": {\"command\": \"x\"}\n  }\n}\n",
            servers: "context_servers",
            comment: Some("/* local tools */"),
        },
        RoundTrip {
            client: Box::new(CodexClient::new()),
            platform: Platform::Linux,
            path: ".codex/config.toml",
            format: ConfigFormat::Toml,
            seed: "# codex settings\nunrelated = \"keep-me\"\n\n[mcp_servers.other]\ncommand = \"x\"\n",
            servers: "mcp_servers",
            comment: Some("# codex settings"),
        },
    ]
}

#[test]
fn add_twice_then_remove_round_trips_for_every_format() {
    let key = api_key();
    let builder = ServerConfigBuilder::default();

    for case in round_trips() {
        let name = case.client.name();
        let sandbox = Sandbox::new(case.platform);
        sandbox.write(case.path, case.seed);
        let req = request(&key, InstallMode::Local, &builder);

        let outcome = case.client.add(&sandbox.ctx, &req);
        assert!(outcome.is_success(), "{name}: {outcome:?}");
        let first = sandbox.read(case.path);
        assert!(case.client.add(&sandbox.ctx, &req).is_success(), "{name}");
        assert_eq!(first, sandbox.read(case.path), "{name}: second add changed the file");
        assert!(case.client.is_installed(&sandbox.ctx), "{name}");

        let outcome = case.client.remove(&sandbox.ctx);
        assert!(outcome.is_success(), "{name}: {outcome:?}");
        let text = sandbox.read(case.path);
        let value = codec_for(case.format)
            .to_value(&ConfigDocument::new(case.format, text.as_str()))
            .expect("config still parses");

        assert_eq!(value["unrelated"], "keep-me", "{name}");
        assert!(value[case.servers].get("other").is_some(), "{name}: {text}");
        assert!(value[case.servers].get("nia").is_none(), "{name}: {text}");
        if let Some(comment) = case.comment {
            assert!(text.contains(comment), "{name} lost {comment:?}: {text}");
        }
        assert!(!case.client.is_installed(&sandbox.ctx), "{name}");
    }
}
