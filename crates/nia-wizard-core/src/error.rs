//! Errors that end a wizard run.
//!
//! Everything else (a client that fails to parse, a CLI that exits non-zero)
//! is recorded per client and never aborts the batch.

use crate::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("An API key is required: pass it as an argument or set NIA_API_KEY")]
    MissingApiKey,

    #[error("Invalid API key: keys start with 'nk_'")]
    InvalidApiKey,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
