//! Nia Wizard Core Library
//!
//! Detects coding agents on this machine and adds or removes the `nia` MCP
//! server registration in each agent's own configuration.

pub mod client;
pub mod config;
pub mod detect;
pub mod error;
pub mod mcp;
pub mod orchestration;
pub mod settings;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Clients
    pub use crate::client::{
        ClientContext, ClientError, ClientRegistry, InstallMechanism, McpClient, Platform,
    };

    // Detection
    pub use crate::detect::DetectionService;

    // Registration
    pub use crate::mcp::{ApiKey, InstallMode, InstallRequest, ServerConfigBuilder};

    // Orchestration
    pub use crate::orchestration::{
        AddReport, AddRequest, ClientChoice, ClientStatus, FailedClient, InstallOrchestrator,
        InstallPrompter, Interaction, RemoveReport, RemoveRequest,
    };

    pub use crate::error::WizardError;
    pub use crate::settings::Settings;
    pub use crate::types::InstallOutcome;
}
