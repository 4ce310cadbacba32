//! Async worker - runs in the Tokio runtime and serves lookup commands
//!
//! Lookups are processed strictly in arrival order; overlapping requests
//! queue up and the last writer wins, with no cancellation of the one in
//! flight.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::infrastructure::ethereum::{create_provider, EnsProvider};
use crate::infrastructure::explorer::EtherscanClient;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::lookup::{run_lookup, LookupSink, LookupUpdate};

/// Run the async worker loop
pub async fn run_async_worker(
    config: Config,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let explorer = EtherscanClient::new(config.explorer_url(), config.explorer_api_key());
    let mut provider: Option<Box<dyn EnsProvider>> = None;

    loop {
        // Try to connect if not connected
        if provider.is_none() {
            match connect_to_endpoint(&config.rpc_url(), &evt_tx).await {
                Ok(p) => provider = Some(p),
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Connection failed ({}): {err:#}", config.rpc_url()),
                    });
                    tokio::time::sleep(Duration::from_millis(900)).await;
                    continue;
                }
            }
        }

        // Process commands (non-blocking)
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Shutdown => return Ok(()),

                RuntimeCommand::Lookup { input } => {
                    if let Some(ref p) = provider {
                        let mut forward = EventForwarder { evt_tx: &evt_tx };
                        run_lookup(&input, p.as_ref(), &explorer, &mut forward).await;
                    }
                }
            }
        }

        // Small yield to prevent busy loop
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Wraps lookup updates into runtime events on their way to the TUI
struct EventForwarder<'a> {
    evt_tx: &'a Sender<RuntimeEvent>,
}

impl LookupSink for EventForwarder<'_> {
    fn push(&mut self, update: LookupUpdate) {
        let _ = self.evt_tx.send(RuntimeEvent::Lookup(update));
    }
}

/// Connect and handshake with a chain-id fetch
async fn connect_to_endpoint(
    url: &str,
    evt_tx: &Sender<RuntimeEvent>,
) -> Result<Box<dyn EnsProvider>> {
    let provider = create_provider(url)?;
    let chain_id = provider.chain_id().await?;

    let _ = evt_tx.send(RuntimeEvent::Connected {
        endpoint: provider.endpoint_name(),
        chain_id,
    });

    Ok(provider)
}
