//! Terminal prompts for the install wizard.
//!
//! Implements [`InstallPrompter`] with dialoguer. Escape or `q` on any prompt
//! cancels the run.

use std::io::{self, Write};

use console::style;
use dialoguer::{Confirm, MultiSelect, Password, Select, theme::ColorfulTheme};

use nia_wizard_core::error::WizardError;
use nia_wizard_core::mcp::{ApiKey, InstallMode};
use nia_wizard_core::orchestration::{ClientChoice, InstallPrompter};

/// Prompts on the terminal, informational output to `writer`.
pub struct WizardPrompter<W: Write = io::Stdout> {
    /// Output writer (for testing)
    writer: W,
    /// Theme for dialoguer prompts
    theme: ColorfulTheme,
}

impl WizardPrompter<io::Stdout> {
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for WizardPrompter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> WizardPrompter<W> {
    /// Create a prompter with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn print_welcome(&mut self) -> Result<(), WizardError> {
        self.write_lines(&[
            String::new(),
            style("  Nia MCP Wizard").bold().cyan().to_string(),
            "  This wizard will install the Nia MCP server to your coding agents.".to_string(),
            "  Get external docs, code search, and research tools in your IDE.".to_string(),
            String::new(),
        ])
    }

    /// Ask for the API key until one with the `nk_` prefix is entered.
    pub fn prompt_api_key(&mut self) -> Result<ApiKey, WizardError> {
        let raw = Password::with_theme(&self.theme)
            .with_prompt("Enter your Nia API key")
            .validate_with(|input: &String| -> Result<(), String> {
                ApiKey::parse(input).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact()
            .map_err(prompt_error)?;
        ApiKey::parse(&raw)
    }

    pub fn prompt_mode(&mut self, default: InstallMode) -> Result<InstallMode, WizardError> {
        let options = ["Remote (Recommended)", "Local    - Requires pipx"];
        let default_index = match default {
            InstallMode::Remote => 0,
            InstallMode::Local => 1,
        };
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select installation mode")
            .items(&options)
            .default(default_index)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(WizardError::Cancelled)?;

        Ok(match selection {
            0 => InstallMode::Remote,
            _ => InstallMode::Local,
        })
    }

    pub fn confirm_switch_to_remote(&mut self) -> Result<bool, WizardError> {
        confirm(&self.theme, "Switch to remote mode instead?")
    }

    fn print_already_configured(&mut self, installed: &[String]) -> Result<(), WizardError> {
        let mut lines = vec![format!(
            "  {} Nia is already configured for:",
            style("⚠").yellow()
        )];
        lines.extend(installed.iter().map(|name| format!("    • {name}")));
        self.write_lines(&lines)
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), WizardError> {
        for line in lines {
            writeln!(self.writer, "{line}").map_err(|err| WizardError::Prompt(err.to_string()))?;
        }
        Ok(())
    }
}

impl<W: Write> InstallPrompter for WizardPrompter<W> {
    fn select_clients(&mut self, choices: &[ClientChoice]) -> Result<Vec<String>, WizardError> {
        let labels: Vec<String> = choices.iter().map(choice_label).collect();
        let defaults: Vec<bool> = choices.iter().map(|choice| choice.preselected).collect();

        let selections = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select which coding agents to install Nia to (space to toggle)")
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(WizardError::Cancelled)?;

        Ok(selected_names(choices, &selections))
    }

    fn confirm_reinstall(&mut self, installed: &[String]) -> Result<bool, WizardError> {
        self.print_already_configured(installed)?;
        confirm(&self.theme, "Reinstall to update configuration?")
    }

    fn select_removals(&mut self, installed: &[ClientChoice]) -> Result<Vec<String>, WizardError> {
        let labels: Vec<&str> = installed.iter().map(|choice| choice.name).collect();
        let defaults = vec![true; installed.len()];

        let selections = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select which coding agents to remove Nia from")
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(WizardError::Cancelled)?;

        Ok(selected_names(installed, &selections))
    }
}

fn confirm(theme: &ColorfulTheme, prompt: &str) -> Result<bool, WizardError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(true)
        .interact_opt()
        .map_err(prompt_error)?
        .ok_or(WizardError::Cancelled)
}

fn prompt_error(err: dialoguer::Error) -> WizardError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
            WizardError::Cancelled
        }
        other => WizardError::Prompt(other.to_string()),
    }
}

/// Label shown in the client list. Undetected clients point at manual setup.
fn choice_label(choice: &ClientChoice) -> String {
    let mut label = choice.name.to_string();
    if let Some(note) = choice.note {
        label.push_str(&format!(" ({note})"));
    }
    if !choice.detected {
        let hint = match choice.docs_url {
            Some(url) => format!("not detected, manual setup: {url}"),
            None => "not detected".to_string(),
        };
        label.push_str(&format!("  {}", style(hint).dim()));
    }
    label
}

fn selected_names(choices: &[ClientChoice], selections: &[usize]) -> Vec<String> {
    selections
        .iter()
        .filter_map(|&index| choices.get(index))
        .map(|choice| choice.name.to_string())
        .collect()
}
