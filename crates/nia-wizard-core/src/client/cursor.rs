//! Cursor client implementation.

use std::path::PathBuf;

use serde_json::Value;

use crate::client::{ClientContext, ClientError, McpClient, Platform, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct CursorClient;

impl CursorClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for CursorClient {
    fn name(&self) -> &'static str {
        "Cursor"
    }

    fn id(&self) -> &'static str {
        "cursor"
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some("https://cursor.com/docs/context/mcp")
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        if ctx.platform == Platform::Other {
            return Ok(false);
        }
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(match ctx.platform {
            Platform::Windows => ctx.app_data_dir().join("Cursor").join("mcp.json"),
            Platform::Linux => ctx.home_dir.join(".config").join("cursor").join("mcp.json"),
            Platform::MacOs | Platform::Other => ctx.home_dir.join(".cursor").join("mcp.json"),
        })
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        // Remote entries keep the canonical `{url, headers}` shape.
        match registration {
            ServerRegistration::Local { .. } => registration.to_typed_value("stdio", "http"),
            ServerRegistration::Remote { .. } => registration.to_value(),
        }
    }
}
