//! Endpoint settings used when rendering registrations.
//!
//! Layering, lowest to highest precedence:
//! - built-in defaults
//! - `<config dir>/nia-wizard/config.toml` when present
//! - `NIA_REMOTE_MCP_URL` / `NIA_API_URL` environment variables

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

pub const DEFAULT_REMOTE_MCP_URL: &str = "https://apigcp.trynia.ai/mcp";
pub const DEFAULT_API_URL: &str = "https://apigcp.trynia.ai/";
pub const DEFAULT_LOCAL_COMMAND: &str = "pipx";
pub const DEFAULT_LOCAL_ARGS: [&str; 3] = ["run", "--no-cache", "nia-mcp-server"];

pub const ENV_REMOTE_MCP_URL: &str = "NIA_REMOTE_MCP_URL";
pub const ENV_API_URL: &str = "NIA_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Local launcher command cannot be empty")]
    EmptyLauncher,
}

/// Where the generated registrations point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hosted MCP endpoint used by remote registrations.
    pub remote_mcp_url: String,
    /// API base URL handed to the local server through `NIA_API_URL`.
    pub api_url: String,
    /// Executable that launches the local server.
    pub local_command: String,
    pub local_args: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_mcp_url: DEFAULT_REMOTE_MCP_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            local_command: DEFAULT_LOCAL_COMMAND.to_string(),
            local_args: DEFAULT_LOCAL_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from the user config directory and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path();
        Self::load_layered(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Default settings file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nia-wizard").join("config.toml"))
    }

    /// Apply the file (if it exists) and then `env` over the defaults.
    pub fn load_layered(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = match file {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };

        if let Some(url) = non_blank(env(ENV_REMOTE_MCP_URL)) {
            debug!(url = %url, "remote MCP URL overridden from environment");
            settings.remote_mcp_url = url;
        }
        if let Some(url) = non_blank(env(ENV_API_URL)) {
            debug!(url = %url, "API URL overridden from environment");
            settings.api_url = url;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("remote_mcp_url", &self.remote_mcp_url),
            ("api_url", &self.api_url),
        ] {
            Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }
        if self.local_command.trim().is_empty() {
            return Err(SettingsError::EmptyLauncher);
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether the local launcher can be found on `PATH`.
///
/// Local registrations are only useful when this holds; callers offer remote
/// mode otherwise.
pub fn local_launcher_available(settings: &Settings) -> bool {
    match which::which(&settings.local_command) {
        Ok(path) => {
            debug!(path = %path.display(), "local launcher found");
            true
        }
        Err(err) => {
            debug!(command = %settings.local_command, error = %err, "local launcher not found");
            false
        }
    }
}
