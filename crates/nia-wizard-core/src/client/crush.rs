//! Crush client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::{ClientContext, ClientError, McpClient, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct CrushClient;

impl CrushClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for CrushClient {
    fn name(&self) -> &'static str {
        "Crush"
    }

    fn id(&self) -> &'static str {
        "crush"
    }

    fn server_property(&self) -> &'static str {
        "mcp"
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".crush").join("config.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        registration.to_typed_value("stdio", "http")
    }
}
