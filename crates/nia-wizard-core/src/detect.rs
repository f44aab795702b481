//! Client detection.
//!
//! Every probe runs on its own scoped thread. A probe that errors or panics
//! only marks its own client as absent.

use std::thread;

use tracing::{debug, warn};

use crate::client::{ClientContext, ClientRegistry, McpClient};

#[derive(Debug, Clone, Copy)]
pub struct DetectionService<'a> {
    registry: &'a ClientRegistry,
    ctx: &'a ClientContext,
}

impl<'a> DetectionService<'a> {
    pub fn new(registry: &'a ClientRegistry, ctx: &'a ClientContext) -> Self {
        Self { registry, ctx }
    }

    /// Detection flag for every registered client, in registry order.
    pub fn scan(&self) -> Vec<bool> {
        let ctx = self.ctx;
        let clients = self.registry.all();
        thread::scope(|scope| {
            let handles: Vec<_> = clients
                .iter()
                .map(|client| scope.spawn(move || client.detect(ctx)))
                .collect();

            handles
                .into_iter()
                .zip(clients)
                .map(|(handle, client)| match handle.join() {
                    Ok(found) => found,
                    Err(_) => {
                        warn!(client = client.name(), "detection probe panicked");
                        false
                    }
                })
                .collect()
        })
    }

    /// Clients present on this machine, in registry order.
    pub fn supported(&self) -> Vec<&'a dyn McpClient> {
        let found: Vec<_> = self
            .registry
            .all()
            .iter()
            .zip(self.scan())
            .filter(|(_, detected)| *detected)
            .map(|(client, _)| client.as_ref())
            .collect();
        debug!(
            clients = ?found.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "detected clients"
        );
        found
    }
}
