//! The seam between orchestration and whatever asks the user.

use serde::Serialize;

use crate::error::WizardError;

/// One client as offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientChoice {
    pub name: &'static str,
    pub id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    pub detected: bool,
    /// Whether the choice starts out selected.
    pub preselected: bool,
}

/// User decisions needed by an interactive run.
///
/// Returning [`WizardError::Cancelled`] aborts the run.
pub trait InstallPrompter {
    /// Pick the clients to configure. Returns display names.
    fn select_clients(&mut self, choices: &[ClientChoice]) -> Result<Vec<String>, WizardError>;

    /// Whether to overwrite existing registrations in `installed`.
    fn confirm_reinstall(&mut self, installed: &[String]) -> Result<bool, WizardError>;

    /// Pick the clients to remove the registration from. Returns display names.
    fn select_removals(&mut self, installed: &[ClientChoice]) -> Result<Vec<String>, WizardError>;
}

/// How selection and confirmation questions get answered.
pub enum Interaction<'p> {
    /// Unattended: only detected clients, existing registrations are replaced.
    Ci,
    Prompt(&'p mut dyn InstallPrompter),
}

impl Interaction<'_> {
    pub fn is_ci(&self) -> bool {
        matches!(self, Interaction::Ci)
    }
}
