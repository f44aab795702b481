//! Per-client status listing.

use std::path::PathBuf;

use serde::Serialize;

use crate::client::InstallMechanism;
use crate::orchestration::install::InstallOrchestrator;

/// Detection and installation state of one client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientStatus {
    pub name: &'static str,
    pub id: &'static str,
    pub mechanism: InstallMechanism,
    pub detected: bool,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    /// Why there is no config path (CLI-only client, other platform).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_note: Option<String>,
}

impl InstallOrchestrator {
    /// Every registered client, in registry order.
    pub fn status(&self) -> Vec<ClientStatus> {
        let ctx = self.context();
        self.registry()
            .all()
            .iter()
            .zip(self.detection())
            .map(|(client, detected)| {
                let (config_path, config_note) = match client.config_path(ctx) {
                    Ok(path) => (Some(path), None),
                    Err(err) => (None, Some(err.to_string())),
                };
                ClientStatus {
                    name: client.name(),
                    id: client.id(),
                    mechanism: client.install_mechanism(),
                    detected,
                    installed: detected && client.is_installed(ctx),
                    config_path,
                    config_note,
                }
            })
            .collect()
    }
}
