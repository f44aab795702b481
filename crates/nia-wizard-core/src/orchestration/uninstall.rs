//! Removing the registration from a batch of clients.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::WizardError;
use crate::orchestration::FailedClient;
use crate::orchestration::install::InstallOrchestrator;
use crate::orchestration::prompt::{ClientChoice, Interaction};

#[derive(Debug, Clone)]
pub struct RemoveRequest<'a> {
    /// Names or ids given explicitly; empty means every configured client.
    pub requested: &'a [String],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
    pub removed: Vec<String>,
    pub failed: Vec<FailedClient>,
    /// No detected client had the registration.
    pub nothing_installed: bool,
}

impl InstallOrchestrator {
    /// Detected clients that currently carry the registration.
    pub fn installed(&self) -> Vec<ClientChoice> {
        self.detection()
            .into_iter()
            .enumerate()
            .filter(|(index, detected)| {
                *detected
                    && self
                        .registry()
                        .all()
                        .get(*index)
                        .is_some_and(|client| client.is_installed(self.context()))
            })
            .filter_map(|(index, _)| self.choice(index, true, true))
            .collect()
    }

    /// Remove the registration from configured clients.
    pub fn remove_all(
        &self,
        request: &RemoveRequest<'_>,
        interaction: Interaction<'_>,
    ) -> Result<RemoveReport, WizardError> {
        let (requested, unknown) = self.resolve_requested(request.requested);
        let mut installed = self.installed();
        let mut report = RemoveReport {
            failed: unknown,
            nothing_installed: installed.is_empty(),
            ..RemoveReport::default()
        };

        if !requested.is_empty() {
            let wanted: Vec<&str> = requested
                .iter()
                .filter_map(|index| self.registry().all().get(*index))
                .map(|client| client.name())
                .collect();
            installed.retain(|choice| wanted.contains(&choice.name));
        }
        if installed.is_empty() {
            info!("no configured clients to remove");
            return Ok(report);
        }

        let names: Vec<String> = match interaction {
            Interaction::Ci => installed.iter().map(|choice| choice.name.to_string()).collect(),
            Interaction::Prompt(prompter) => prompter.select_removals(&installed)?,
        };

        for index in self.indices_named(&names) {
            let Some(client) = self.registry().all().get(index) else {
                continue;
            };
            let name = client.name().to_string();
            let outcome = client.remove(self.context());
            if outcome.is_success() {
                info!(client = %name, "registration removed");
                report.removed.push(name);
            } else {
                let error = outcome.error.unwrap_or_else(|| "unknown error".to_string());
                warn!(client = %name, error = %error, "removal failed");
                report.failed.push(FailedClient::new(name, error));
            }
        }

        Ok(report)
    }
}
