//! Adding the registration to a batch of clients.

use serde::Serialize;
use tracing::{info, warn};

use crate::client::{ClientContext, ClientRegistry, McpClient};
use crate::detect::DetectionService;
use crate::error::WizardError;
use crate::mcp::registration::{ApiKey, InstallMode, InstallRequest, ServerConfigBuilder};
use crate::orchestration::FailedClient;
use crate::orchestration::prompt::{ClientChoice, Interaction};

#[derive(Debug, Clone)]
pub struct AddRequest<'a> {
    pub api_key: &'a ApiKey,
    pub mode: InstallMode,
    /// Names or ids given explicitly; empty means "no preference".
    pub requested: &'a [String],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddReport {
    /// Clients configured, in selection order.
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedClient>,
    /// Selected clients that already had a registration.
    pub already_configured: Vec<String>,
    /// Selected clients left untouched because reinstalling was declined.
    pub skipped: Vec<String>,
    /// Explicitly requested clients passed over in CI because they were not detected.
    pub not_detected: Vec<String>,
    /// No client was detected on this machine.
    pub nothing_detected: bool,
}

impl AddReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Runs add/remove across the registry.
#[derive(Debug)]
pub struct InstallOrchestrator {
    registry: ClientRegistry,
    ctx: ClientContext,
    builder: ServerConfigBuilder,
}

impl InstallOrchestrator {
    pub fn new(registry: ClientRegistry, ctx: ClientContext, builder: ServerConfigBuilder) -> Self {
        Self {
            registry,
            ctx,
            builder,
        }
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    pub fn builder(&self) -> &ServerConfigBuilder {
        &self.builder
    }

    pub(crate) fn detection(&self) -> Vec<bool> {
        DetectionService::new(&self.registry, &self.ctx).scan()
    }

    /// Registry indices of `requested`, plus failures for unknown names.
    pub(crate) fn resolve_requested(&self, requested: &[String]) -> (Vec<usize>, Vec<FailedClient>) {
        let mut found = Vec::new();
        let mut unknown = Vec::new();
        for key in requested {
            let key = key.trim();
            let index = self.registry.all().iter().position(|client| {
                client.name().eq_ignore_ascii_case(key) || client.id().eq_ignore_ascii_case(key)
            });
            match index {
                Some(index) if !found.contains(&index) => found.push(index),
                Some(_) => {}
                None => unknown.push(FailedClient::unknown(key)),
            }
        }
        (found, unknown)
    }

    pub(crate) fn choice(&self, index: usize, detected: bool, preselected: bool) -> Option<ClientChoice> {
        let client = self.registry.all().get(index)?;
        Some(ClientChoice {
            name: client.name(),
            id: client.id(),
            docs_url: client.docs_url(),
            note: client.note(),
            detected,
            preselected,
        })
    }

    /// Every client with its detection flag, detected ones preselected.
    pub fn choices(&self) -> Vec<ClientChoice> {
        self.detection()
            .into_iter()
            .enumerate()
            .filter_map(|(index, detected)| self.choice(index, detected, detected))
            .collect()
    }

    /// Indices of clients named in `names`, in registry order.
    pub(crate) fn indices_named(&self, names: &[String]) -> Vec<usize> {
        self.registry
            .all()
            .iter()
            .enumerate()
            .filter(|(_, client)| names.iter().any(|name| name == client.name()))
            .map(|(index, _)| index)
            .collect()
    }

    fn client(&self, index: usize) -> Option<&dyn McpClient> {
        self.registry.all().get(index).map(|client| client.as_ref())
    }

    /// Add the registration to the selected clients.
    ///
    /// Per-client failures are collected in the report. Only a cancelled
    /// prompt is an error.
    pub fn add_all(
        &self,
        request: &AddRequest<'_>,
        mut interaction: Interaction<'_>,
    ) -> Result<AddReport, WizardError> {
        let detected = self.detection();
        let (requested, unknown) = self.resolve_requested(request.requested);
        let mut report = AddReport {
            failed: unknown,
            nothing_detected: !detected.iter().any(|found| *found),
            ..AddReport::default()
        };

        let selected: Vec<usize> = match interaction {
            Interaction::Ci => {
                let mut selected = Vec::new();
                let candidates: Vec<usize> = if requested.is_empty() {
                    (0..detected.len()).collect()
                } else {
                    requested.clone()
                };
                for index in candidates {
                    if detected.get(index).copied().unwrap_or(false) {
                        selected.push(index);
                    } else if !requested.is_empty()
                        && let Some(client) = self.client(index)
                    {
                        report.not_detected.push(client.name().to_string());
                    }
                }
                selected
            }
            Interaction::Prompt(ref mut prompter) => {
                let choices: Vec<ClientChoice> = detected
                    .iter()
                    .enumerate()
                    .filter_map(|(index, found)| {
                        self.choice(index, *found, *found || requested.contains(&index))
                    })
                    .collect();
                let names = prompter.select_clients(&choices)?;
                self.indices_named(&names)
            }
        };

        if selected.is_empty() {
            info!("no clients selected");
            return Ok(report);
        }

        report.already_configured = selected
            .iter()
            .filter_map(|index| self.client(*index))
            .filter(|client| client.is_installed(&self.ctx))
            .map(|client| client.name().to_string())
            .collect();

        let reinstall = match interaction {
            _ if report.already_configured.is_empty() => true,
            Interaction::Ci => true,
            Interaction::Prompt(prompter) => prompter.confirm_reinstall(&report.already_configured)?,
        };
        if !reinstall {
            report.skipped = report.already_configured.clone();
        }

        let install = InstallRequest::new(request.api_key, request.mode, &self.builder);
        for client in selected.into_iter().filter_map(|index| self.client(index)) {
            let name = client.name().to_string();
            if report.skipped.contains(&name) {
                continue;
            }
            let outcome = client.add(&self.ctx, &install);
            if outcome.is_success() {
                info!(client = %name, mode = %client.effective_mode(request.mode), "registration added");
                report.succeeded.push(name);
            } else {
                let error = outcome.error.unwrap_or_else(|| "unknown error".to_string());
                warn!(client = %name, error = %error, "registration failed");
                report.failed.push(FailedClient::new(name, error));
            }
        }

        Ok(report)
    }
}
