//! Visual Studio 2022 client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe, require_platform};
use crate::config::codec::ConfigFormat;
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct VisualStudioClient;

impl VisualStudioClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for VisualStudioClient {
    fn name(&self) -> &'static str {
        "Visual Studio 2022"
    }

    fn id(&self) -> &'static str {
        "visual-studio"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://learn.microsoft.com/en-us/visualstudio/ide/mcp-servers")
    }

    fn config_format(&self) -> Option<ConfigFormat> {
        Some(ConfigFormat::JsonWithComments)
    }

    fn server_property(&self) -> &'static str {
        "servers"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        if ctx.platform != Platform::Windows {
            return Ok(false);
        }
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        require_platform(self.name(), ctx, &[Platform::Windows])?;
        Ok(ctx.home_dir.join(".vs").join("mcp.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        registration.to_typed_value("stdio", "http")
    }
}
