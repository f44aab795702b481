//! GitHub Copilot CLI and Copilot coding agent clients.
//!
//! Both share the `tools` allow-list; the coding agent's config lives in the
//! repository rather than the home directory.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, merge_fields, probe};
use crate::mcp::registration::ServerRegistration;

const TOOLS: &[&str] = &[
    "index",
    "search",
    "manage_resource",
    "nia_web_search",
    "nia_deep_research_agent",
];

fn with_tools(entry: Value) -> Value {
    merge_fields(entry, json!({ "tools": TOOLS }))
}

#[derive(Debug, Default)]
pub struct CopilotCliClient;

impl CopilotCliClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for CopilotCliClient {
    fn name(&self) -> &'static str {
        "Copilot CLI"
    }

    fn id(&self) -> &'static str {
        "copilot-cli"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".copilot").join("mcp-config.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        with_tools(registration.to_typed_value("local", "http"))
    }
}

#[derive(Debug, Default)]
pub struct CopilotAgentClient;

impl CopilotAgentClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for CopilotAgentClient {
    fn name(&self) -> &'static str {
        "Copilot Coding Agent"
    }

    fn id(&self) -> &'static str {
        "copilot-agent"
    }

    fn note(&self) -> Option<&'static str> {
        Some("Writes .github/copilot-mcp.json in the current repository")
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(ctx.working_dir.join(".github").is_dir())
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.working_dir.join(".github").join("copilot-mcp.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        with_tools(registration.to_typed_value("stdio", "http"))
    }
}
