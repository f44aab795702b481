//! Qodo Gen: listed for discoverability, set up by hand.

use std::path::PathBuf;

use crate::client::{ClientContext, ClientError, InstallMechanism, McpClient};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::InstallRequest;
use crate::types::InstallOutcome;

#[derive(Debug, Default)]
pub struct QodoGenClient;

impl QodoGenClient {
    pub fn new() -> Self {
        Self
    }

    fn manual(&self) -> ClientError {
        ClientError::ManualSetup {
            client: self.name(),
        }
    }
}

impl McpClient for QodoGenClient {
    fn name(&self) -> &'static str {
        "Qodo Gen"
    }

    fn id(&self) -> &'static str {
        "qodo-gen"
    }

    fn note(&self) -> Option<&'static str> {
        Some("Requires manual setup")
    }

    fn install_mechanism(&self) -> InstallMechanism {
        InstallMechanism::Unsupported
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        None
    }

    fn probe(&self, _ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(false)
    }

    fn config_path(&self, _ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Err(self.manual())
    }

    fn is_installed(&self, _ctx: &ClientContext) -> bool {
        false
    }

    fn add(&self, _ctx: &ClientContext, _request: &InstallRequest<'_>) -> InstallOutcome {
        InstallOutcome::failed(self.manual().to_string())
    }

    fn remove(&self, _ctx: &ClientContext) -> InstallOutcome {
        InstallOutcome::failed(self.manual().to_string())
    }
}
