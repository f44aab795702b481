//! Warp client implementation.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::client::{ClientContext, ClientError, McpClient, merge_fields, probe};
use crate::mcp::registration::ServerRegistration;

#[derive(Debug, Default)]
pub struct WarpClient;

impl WarpClient {
    pub fn new() -> Self {
        Self
    }
}

impl McpClient for WarpClient {
    fn name(&self) -> &'static str {
        "Warp"
    }

    fn id(&self) -> &'static str {
        "warp"
    }

    fn supports_remote(&self) -> bool {
        false
    }

    fn probe(&self, ctx: &ClientContext) -> anyhow::Result<bool> {
        Ok(probe::config_dir_present(ctx, &self.config_path(ctx)?))
    }

    fn config_path(&self, ctx: &ClientContext) -> Result<PathBuf, ClientError> {
        Ok(ctx.home_dir.join(".warp").join("mcp.json"))
    }

    fn shape_registration(&self, registration: &ServerRegistration) -> Value {
        merge_fields(
            registration.to_value(),
            json!({
                "working_directory": null,
                "start_on_launch": true,
            }),
        )
    }
}
