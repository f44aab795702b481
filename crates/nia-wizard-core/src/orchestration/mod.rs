//! Add/remove orchestration across clients.
//!
//! Clients are processed one at a time in selection order. A failing client
//! is recorded in the report and never stops the rest.

pub mod install;
pub mod prompt;
pub mod status;
pub mod uninstall;

use serde::Serialize;

pub use install::{AddReport, AddRequest, InstallOrchestrator};
pub use prompt::{ClientChoice, InstallPrompter, Interaction};
pub use status::ClientStatus;
pub use uninstall::{RemoveReport, RemoveRequest};

/// A client whose add or remove failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedClient {
    pub name: String,
    pub error: String,
}

impl FailedClient {
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }

    pub(crate) fn unknown(name: &str) -> Self {
        Self::new(name, format!("Unknown client '{name}'"))
    }
}
