//! Canonical server registration payloads.
//!
//! Every client starts from the same [`ServerRegistration`] and reshapes it
//! into its own on-disk form. Building it is pure: the same key, mode and
//! settings always give the same payload.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::WizardError;
use crate::settings::Settings;

/// Key every registration is stored under.
pub const SERVER_NAME: &str = "nia";
pub const API_KEY_PREFIX: &str = "nk_";
pub const ENV_API_KEY: &str = "NIA_API_KEY";
pub const ENV_API_URL: &str = "NIA_API_URL";

/// Transport the registration should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Launch the server locally over stdio.
    Local,
    /// Talk to the hosted HTTP endpoint.
    #[default]
    Remote,
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMode::Local => f.write_str("local"),
            InstallMode::Remote => f.write_str("remote"),
        }
    }
}

/// A validated API key.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: &str) -> Result<Self, WizardError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(WizardError::MissingApiKey);
        }
        match key.strip_prefix(API_KEY_PREFIX) {
            Some(rest) if !rest.is_empty() => Ok(Self(key.to_string())),
            _ => Err(WizardError::InvalidApiKey),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"nk_***").finish()
    }
}

/// Client-neutral registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerRegistration {
    Local {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    Remote {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl ServerRegistration {
    pub fn mode(&self) -> InstallMode {
        match self {
            ServerRegistration::Local { .. } => InstallMode::Local,
            ServerRegistration::Remote { .. } => InstallMode::Remote,
        }
    }

    /// The canonical JSON shape, used as-is by most file clients.
    ///
    /// Local: `{command, args, env}`. Remote: `{url, headers}`.
    pub fn to_value(&self) -> Value {
        match self {
            ServerRegistration::Local { command, args, env } => json!({
                "command": command,
                "args": args,
                "env": env,
            }),
            ServerRegistration::Remote { url, headers } => json!({
                "url": url,
                "headers": headers,
            }),
        }
    }

    /// The canonical shape preceded by a `type` field naming the transport.
    pub fn to_typed_value(&self, local_type: &str, remote_type: &str) -> Value {
        let kind = match self {
            ServerRegistration::Local { .. } => local_type,
            ServerRegistration::Remote { .. } => remote_type,
        };
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(kind.to_string()));
        if let Value::Object(canonical) = self.to_value() {
            fields.extend(canonical);
        }
        Value::Object(fields)
    }

    /// Command followed by its arguments, for local registrations.
    pub fn command_line(&self) -> Option<Vec<String>> {
        match self {
            ServerRegistration::Local { command, args, .. } => {
                let mut line = Vec::with_capacity(args.len() + 1);
                line.push(command.clone());
                line.extend(args.iter().cloned());
                Some(line)
            }
            ServerRegistration::Remote { .. } => None,
        }
    }
}

/// Maps (API key, mode) to a [`ServerRegistration`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    settings: Settings,
}

impl ServerConfigBuilder {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn build(&self, api_key: &ApiKey, mode: InstallMode) -> ServerRegistration {
        match mode {
            InstallMode::Local => {
                let mut env = BTreeMap::new();
                env.insert(ENV_API_KEY.to_string(), api_key.as_str().to_string());
                env.insert(ENV_API_URL.to_string(), self.settings.api_url.clone());
                ServerRegistration::Local {
                    command: self.settings.local_command.clone(),
                    args: self.settings.local_args.clone(),
                    env,
                }
            }
            InstallMode::Remote => {
                let mut headers = BTreeMap::new();
                headers.insert("Authorization".to_string(), api_key.bearer());
                ServerRegistration::Remote {
                    url: self.settings.remote_mcp_url.clone(),
                    headers,
                }
            }
        }
    }
}

/// Everything a client needs to add the registration.
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    pub api_key: &'a ApiKey,
    /// Requested mode; clients that support a single transport ignore it.
    pub mode: InstallMode,
    pub builder: &'a ServerConfigBuilder,
}

impl<'a> InstallRequest<'a> {
    pub fn new(api_key: &'a ApiKey, mode: InstallMode, builder: &'a ServerConfigBuilder) -> Self {
        Self {
            api_key,
            mode,
            builder,
        }
    }

    pub fn registration(&self, mode: InstallMode) -> ServerRegistration {
        self.builder.build(self.api_key, mode)
    }
}
