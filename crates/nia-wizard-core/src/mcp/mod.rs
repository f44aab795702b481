//! MCP server registration payloads.

pub mod registration;

pub use registration::{
    ApiKey, InstallMode, InstallRequest, SERVER_NAME, ServerConfigBuilder, ServerRegistration,
};
