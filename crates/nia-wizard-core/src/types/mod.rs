//! Shared result types used across clients and orchestration.

use serde::Serialize;

/// Result of one client's add or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstallOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Flatten an error chain into the outcome message.
    pub fn from_result(result: anyhow::Result<()>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self::failed(format!("{err:#}")),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn from_result_keeps_the_whole_chain() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("permission denied"))
            .context("Failed to write /tmp/mcp.json");

        let outcome = InstallOutcome::from_result(result);

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.error.as_deref(),
            Some("Failed to write /tmp/mcp.json: permission denied")
        );
    }

    #[test]
    fn ok_has_no_error() {
        assert_eq!(InstallOutcome::ok().error, None);
    }
}
