//! Coding-agent clients.
//!
//! Each supported agent is one type implementing [`McpClient`]. A client
//! declares how to detect the agent, where its configuration lives and how
//! the registration looks on disk. The provided methods then run the
//! read-modify-write cycle for file-based agents; agents driven through
//! their own CLI override `add`, `remove` and `is_installed`.

pub mod cli;
pub mod file;
pub mod probe;
pub mod process;
pub mod registry;

pub mod amazon_q;
pub mod amp;
pub mod antigravity;
pub mod augment;
pub mod boltai;
pub mod claude_code;
pub mod claude_desktop;
pub mod cline;
pub mod codex;
pub mod continue_dev;
pub mod copilot;
pub mod crush;
pub mod cursor;
pub mod droid;
pub mod gemini_cli;
pub mod jetbrains;
pub mod kilo_code;
pub mod kiro;
pub mod lm_studio;
pub mod opencode;
pub mod perplexity;
pub mod qodo_gen;
pub mod qwen_code;
pub mod roo_code;
pub mod trae;
pub mod vibe;
pub mod visual_studio;
pub mod vscode;
pub mod warp;
pub mod windsurf;
pub mod zed;

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::codec::{CodecError, ConfigFormat};
use crate::mcp::registration::{InstallMode, InstallRequest, SERVER_NAME, ServerRegistration};
use crate::types::InstallOutcome;

pub use registry::ClientRegistry;

/// Host operating system, as far as config locations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => f.write_str("macOS"),
            Platform::Windows => f.write_str("Windows"),
            Platform::Linux => f.write_str("Linux"),
            Platform::Other => f.write_str(std::env::consts::OS),
        }
    }
}

/// How a client receives the registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallMechanism {
    /// Edit the agent's config file directly.
    ConfigFile,
    /// Call the agent's own `mcp add` / `mcp remove`.
    NativeCli,
    /// Prefer the agent CLI, edit the config file when the CLI is missing or fails.
    HybridCliThenConfigFile,
    /// No automated setup; the user follows the docs.
    Unsupported,
}

/// Host facts read by probes and path resolvers.
///
/// Built from the real environment in production and rooted in a temporary
/// directory in tests, so nothing outside the context is consulted.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub home_dir: PathBuf,
    /// Directory project-level configs (e.g. `.github/`) are resolved against.
    pub working_dir: PathBuf,
    pub platform: Platform,
    /// `%APPDATA%` on Windows.
    pub app_data: Option<PathBuf>,
    /// `$XDG_CONFIG_HOME` when set.
    pub xdg_config_home: Option<PathBuf>,
    /// Value searched for agent executables, in `PATH` syntax.
    pub search_path: Option<OsString>,
    /// Well-known system install directories checked before `search_path`.
    pub system_bin_dirs: Vec<PathBuf>,
    /// Longest wait for an agent CLI before it is killed.
    pub command_timeout: Duration,
}

/// Default for [`ClientContext::command_timeout`].
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

impl ClientContext {
    pub fn from_env() -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        let working_dir =
            std::env::current_dir().context("Could not determine working directory")?;

        Ok(Self {
            home_dir,
            working_dir,
            platform: Platform::current(),
            app_data: non_empty_var("APPDATA").map(PathBuf::from),
            xdg_config_home: non_empty_var("XDG_CONFIG_HOME").map(PathBuf::from),
            search_path: std::env::var_os("PATH"),
            system_bin_dirs: vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt/homebrew/bin"),
            ],
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        })
    }

    /// A context that only sees `home`: empty search path, no system directories.
    pub fn sandboxed(home: impl Into<PathBuf>, platform: Platform) -> Self {
        let home_dir = home.into();
        Self {
            working_dir: home_dir.clone(),
            app_data: Some(home_dir.join("AppData").join("Roaming")),
            xdg_config_home: None,
            search_path: Some(OsString::new()),
            system_bin_dirs: Vec::new(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            platform,
            home_dir,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// `~/<relative>`.
    pub fn home(&self, relative: &str) -> PathBuf {
        self.home_dir.join(relative)
    }

    /// `%APPDATA%`, falling back to `~/AppData/Roaming`.
    pub fn app_data_dir(&self) -> PathBuf {
        self.app_data
            .clone()
            .unwrap_or_else(|| self.home_dir.join("AppData").join("Roaming"))
    }

    /// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
    pub fn xdg_config_dir(&self) -> PathBuf {
        self.xdg_config_home
            .clone()
            .unwrap_or_else(|| self.home_dir.join(".config"))
    }

    /// Per-user application data root: `~/Library/Application Support` on
    /// macOS, `%APPDATA%` on Windows, `~/.config` elsewhere.
    pub fn app_support_dir(&self) -> PathBuf {
        match self.platform {
            Platform::MacOs => self.home_dir.join("Library").join("Application Support"),
            Platform::Windows => self.app_data_dir(),
            Platform::Linux | Platform::Other => self.home_dir.join(".config"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<OsString> {
    std::env::var_os(key).filter(|value| !value.is_empty())
}

/// Typed client failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{client} is configured through its own CLI and has no config file")]
    UsesCli { client: &'static str },

    #[error("{client} is not available on {platform}")]
    UnsupportedPlatform {
        client: &'static str,
        platform: Platform,
    },

    #[error("{client} has no automated setup and must be configured manually")]
    ManualSetup { client: &'static str },

    #[error("{client} config not found at {}", path.display())]
    ConfigMissing { client: &'static str, path: PathBuf },

    #[error("{client} CLI not found")]
    CliNotFound { client: &'static str },

    #[error("{command} failed: {message}")]
    CliFailed { command: String, message: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// One supported coding agent.
pub trait McpClient: Send + Sync + fmt::Debug {
    /// Display name, unique across the registry.
    fn name(&self) -> &'static str;

    /// Kebab-case identifier accepted on the command line.
    fn id(&self) -> &'static str;

    fn docs_url(&self) -> Option<&'static str> {
        None
    }

    fn note(&self) -> Option<&'static str> {
        None
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::ConfigFile
    }

    /// `None` for agents configured only through their CLI.
    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::Json)
    }

    /// Key the agent keeps its servers under. A dotted name is one literal key.
    fn server_property(&self) -> &'static str {
        "mcpServers"
    }

    fn supports_local(&self) -> bool {
        true
    }

    fn supports_remote(&self) -> bool {
        true
    }

    /// Check whether the agent is present. Must not modify anything.
    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool>;

    /// [`probe`](Self::probe) with every error treated as "not present".
    fn detect(&self, ctx: &ClientContext) -> bool {
        match self.probe(ctx) {
            Ok(found) => {
                debug!(client = self.name(), found, "detection probe");
                found
            }
            Err(err) => {
                debug!(client = self.name(), error = %format!("{err:#}"), "detection probe failed");
                false
            }
        }
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError>;

    /// Key path of the registration inside the config document.
    fn registration_path(&self) -> Vec<&'static str> {
        vec![self.server_property(), SERVER_NAME]
    }

    /// Mode actually used: single-transport clients ignore the request.
    fn effective_mode(&self, requested: InstallMode) -> InstallMode {
        match requested {
            InstallMode::Local if !self.supports_local() => InstallMode::Remote,
            InstallMode::Remote if !self.supports_remote() => InstallMode::Local,
            mode => mode,
        }
    }

    /// Map the canonical payload into this agent's on-disk shape.
    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        registration.to_value()
    }

    fn build_registration(&self, request: &InstallRequest<'_>) -> Value {
        let registration = request.registration(self.effective_mode(request.mode));
        self.shape_registration(&registration)
    }

    fn is_installed(&self, ctx: &ClientContext) -> bool {
        file::has_registration(self, ctx)
    }

    fn add(&self, ctx: &ClientContext, request: &InstallRequest<'_>) -> InstallOutcome {
        let value = self.build_registration(request);
        InstallOutcome::from_result(file::write_registration(self, ctx, &value))
    }

    fn remove(&self, ctx: &ClientContext) -> InstallOutcome {
        InstallOutcome::from_result(file::delete_registration(self, ctx))
    }
}

/// Shorthand for clients limited to some platforms.
pub(crate) fn require_platform(
    client: &'static str,
    ctx: &ClientContext,
    allowed: &[Platform],
) -> Result<(), ClientError> {
    if allowed.contains(&ctx.platform) {
        Ok(())
    } else {
        Err(ClientError::UnsupportedPlatform {
            client,
            platform: ctx.platform,
        })
    }
}

/// Concatenate the fields of two JSON objects, `first`'s fields leading.
///
/// Non-object inputs contribute nothing.
pub(crate) fn merge_fields(first: Value, then: Value) -> Value {
    let mut fields = match first {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    if let Value::Object(rest) = then {
        fields.extend(rest);
    }
    Value::Object(fields)
}
