//! Nia Wizard - connect coding agents to the Nia MCP server
//!
//! Usage:
//!   nia-wizard [API_KEY]        # Install wizard (default)
//!   nia-wizard mcp add ...      # Same, with the key as --api-key
//!   nia-wizard mcp remove       # Remove the registration
//!   nia-wizard mcp status       # Show detected agents

mod interactive;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nia_wizard_core::client::{ClientContext, ClientRegistry, InstallMechanism};
use nia_wizard_core::error::WizardError;
use nia_wizard_core::mcp::{ApiKey, InstallMode, ServerConfigBuilder};
use nia_wizard_core::orchestration::{
    AddReport, AddRequest, ClientStatus, InstallOrchestrator, Interaction, RemoveReport,
    RemoveRequest,
};
use nia_wizard_core::settings::{Settings, local_launcher_available};

use crate::interactive::WizardPrompter;

#[derive(Parser)]
#[command(name = "nia-wizard")]
#[command(about = "Install the Nia MCP server to your coding agents", long_about = None)]
#[command(version)]
struct Cli {
    /// Nia API key (nk_...)
    #[arg(value_name = "API_KEY", env = "NIA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(flatten)]
    target: TargetArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the MCP server registration
    Mcp {
        #[command(subcommand)]
        command: McpCommand,
    },
}

#[derive(Subcommand)]
enum McpCommand {
    /// Add the Nia MCP server to coding agents
    Add {
        /// Nia API key (nk_...)
        #[arg(long, short = 'k', env = "NIA_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove the Nia MCP server from coding agents
    #[command(alias = "rm")]
    Remove {
        /// Remove from every configured agent without prompting
        #[arg(long)]
        ci: bool,

        /// Only these agents, by name or id (repeatable)
        #[arg(long = "client", value_name = "NAME")]
        clients: Vec<String>,
    },

    /// Show detected agents and where Nia is configured
    Status {
        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
struct TargetArgs {
    /// Run the server locally over stdio (requires pipx)
    #[arg(long, conflicts_with = "remote")]
    local: bool,

    /// Use the hosted endpoint
    #[arg(long)]
    remote: bool,

    /// CI mode: skip prompts and configure every detected agent
    #[arg(long)]
    ci: bool,

    /// Only these agents, by name or id (repeatable)
    #[arg(long = "client", value_name = "NAME")]
    clients: Vec<String>,
}

impl TargetArgs {
    fn mode(&self) -> Option<InstallMode> {
        if self.local {
            Some(InstallMode::Local)
        } else if self.remote {
            Some(InstallMode::Remote)
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.debug { "nia_wizard=debug,info" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Some(Commands::Mcp { command }) => run_mcp(command),
        None => run_add(cli.api_key, cli.target, true),
    };

    match result {
        Err(err) if is_cancelled(&err) => {
            println!("{}", style("Setup cancelled.").yellow());
            Ok(())
        }
        other => other,
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<WizardError>(), Some(WizardError::Cancelled))
}

fn run_mcp(command: McpCommand) -> Result<()> {
    match command {
        McpCommand::Add { api_key, target } => run_add(api_key, target, false),
        McpCommand::Remove { ci, clients } => run_remove(ci, &clients),
        McpCommand::Status { json } => run_status(json),
    }
}

fn orchestrator(settings: Settings) -> Result<InstallOrchestrator> {
    let ctx = ClientContext::from_env()?;
    Ok(InstallOrchestrator::new(
        ClientRegistry::with_default_clients(),
        ctx,
        ServerConfigBuilder::new(settings),
    ))
}

fn run_add(api_key: Option<String>, target: TargetArgs, welcome: bool) -> Result<()> {
    let settings = Settings::load().map_err(WizardError::from)?;
    let mut prompter = WizardPrompter::new();

    if welcome {
        prompter.print_welcome()?;
    }

    let api_key = match api_key {
        Some(raw) => ApiKey::parse(&raw)?,
        None if target.ci => return Err(WizardError::MissingApiKey.into()),
        None => prompter.prompt_api_key()?,
    };

    let mut mode = match target.mode() {
        Some(mode) => {
            println!("  Using {mode} mode");
            mode
        }
        None if target.ci => {
            println!("  Using local mode (CI default)");
            InstallMode::Local
        }
        None => prompter.prompt_mode(InstallMode::Local)?,
    };

    if mode == InstallMode::Local {
        if local_launcher_available(&settings) {
            println!("  {} Dependencies ready", style("✓").green());
        } else {
            println!(
                "  {} Local mode requires '{}' on your PATH",
                style("⚠").yellow(),
                settings.local_command
            );
            let switch = target.ci || prompter.confirm_switch_to_remote()?;
            if !switch {
                println!(
                    "{}",
                    style("Please install the missing dependencies and try again.").yellow()
                );
                std::process::exit(1);
            }
            info!("falling back to remote mode");
            println!("  Switched to remote mode");
            mode = InstallMode::Remote;
        }
    }

    let orchestrator = orchestrator(settings)?;
    let request = AddRequest {
        api_key: &api_key,
        mode,
        requested: &target.clients,
    };
    let interaction = if target.ci {
        Interaction::Ci
    } else {
        Interaction::Prompt(&mut prompter)
    };

    let report = orchestrator.add_all(&request, interaction)?;
    print_add_report(&report, target.ci);

    Ok(())
}

fn print_add_report(report: &AddReport, ci: bool) {
    println!();

    for name in &report.not_detected {
        println!("  {} {} was not detected, skipped", style("•").dim(), name);
    }

    if report.nothing_detected && ci {
        println!(
            "  {} No coding agents detected on this system.",
            style("⚠").yellow()
        );
    }

    if ci && !report.already_configured.is_empty() {
        println!(
            "  Reinstalling for: {}",
            report.already_configured.join(", ")
        );
    }

    if !report.skipped.is_empty() {
        println!(
            "  {} Kept existing configuration for: {}",
            style("•").dim(),
            report.skipped.join(", ")
        );
    }

    if !report.succeeded.is_empty() {
        println!("  {} Installed Nia to:", style("✓").green());
        for name in &report.succeeded {
            println!("    • {}", name);
        }
    }

    if !report.failed.is_empty() {
        println!("  {} Failed to install to:", style("⚠").yellow());
        for failed in &report.failed {
            println!("    • {}: {}", failed.name, failed.error);
        }
    }

    println!();
    if report.succeeded.is_empty() {
        println!("{}", style("No changes made.").dim());
    } else {
        print_outro();
    }
}

fn print_outro() {
    println!("{}", style("✓ Nia MCP Server installed!").green().bold());
    println!();
    println!("{}", style("Get started:").cyan());
    println!(
        "  • Browse pre-indexed sources: {}",
        style("https://app.trynia.ai/explore").cyan()
    );
    println!("  • Or index your own repos, docs, and papers");
    println!();
    println!("{}", style("Try in your coding agent:").cyan());
    println!("  {}", style("\"List my indexed sources\"").yellow());
    println!("  {}", style("\"Search vercel/ai-sdk for streaming\"").yellow());
    println!();
    println!(
        "{} {}",
        style("Using as API?").dim(),
        style("https://docs.trynia.ai/api-guide").cyan()
    );
}

fn run_remove(ci: bool, clients: &[String]) -> Result<()> {
    let settings = Settings::load().map_err(WizardError::from)?;
    let orchestrator = orchestrator(settings)?;
    let mut prompter = WizardPrompter::new();

    let interaction = if ci {
        Interaction::Ci
    } else {
        Interaction::Prompt(&mut prompter)
    };
    let report = orchestrator.remove_all(&RemoveRequest { requested: clients }, interaction)?;
    print_remove_report(&report);

    Ok(())
}

fn print_remove_report(report: &RemoveReport) {
    if report.nothing_installed {
        println!("  Nia is not installed in any detected coding agents.");
    }

    if !report.removed.is_empty() {
        println!("  {} Removed Nia from:", style("✓").green());
        for name in &report.removed {
            println!("    • {}", name);
        }
    }

    if !report.failed.is_empty() {
        println!("  {} Failed to remove from:", style("⚠").yellow());
        for failed in &report.failed {
            println!("    • {}: {}", failed.name, failed.error);
        }
    }
}

fn run_status(json: bool) -> Result<()> {
    let settings = Settings::load().map_err(WizardError::from)?;
    let status = orchestrator(settings)?.status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status_table(&status);
    }

    Ok(())
}

fn print_status_table(status: &[ClientStatus]) {
    println!(
        "  {:<22} {:<8} {:<10} {:<10} Config",
        "Agent", "Via", "Detected", "Installed"
    );
    println!("  {}", "-".repeat(78));

    for client in status {
        let config = match (&client.config_path, &client.config_note) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(note)) => note.clone(),
            (None, None) => "-".to_string(),
        };
        println!(
            "  {:<22} {:<8} {:<10} {:<10} {}",
            truncate(client.name, 22),
            mechanism_short(client.mechanism),
            yes_no(client.detected),
            yes_no(client.installed),
            config
        );
    }

    let detected = status.iter().filter(|c| c.detected).count();
    let installed = status.iter().filter(|c| c.installed).count();
    println!();
    println!(
        "Summary: {} agents, {} detected, {} configured",
        status.len(),
        detected,
        installed
    );
}

fn mechanism_short(mechanism: InstallMechanism) -> &'static str {
    match mechanism {
        InstallMechanism::ConfigFile => "file",
        InstallMechanism::NativeCli => "cli",
        InstallMechanism::HybridCliThenConfigFile => "cli+file",
        InstallMechanism::Unsupported => "manual",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    }
}
