//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI never blocks on the network: it sends commands and drains
//! events once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::error;

use crate::domain::account::{KnownAccount, RepresentativeRecord};
use crate::domain::ConfirmationQuorum;
use crate::infrastructure::nano::LedgerSource;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Reload every dataset now
    Refresh,
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A representatives fetch has started
    RepresentativesLoading,
    /// Representatives loaded
    RepresentativesReady { records: Vec<RepresentativeRecord> },
    /// The representatives fetch failed; the previous records stay current
    RepresentativesFailed { message: String },
    /// Quorum parameters loaded
    QuorumReady { quorum: ConfirmationQuorum },
    /// Remote alias registry loaded
    KnownAccountsReady { accounts: Vec<KnownAccount> },
    /// A fetch failed
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime
    pub fn new(source: Arc<dyn LedgerSource>, refresh_every: Option<Duration>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(err) => {
                    error!(error = %err, "failed to create tokio runtime");
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Runtime unavailable: {err}"),
                    });
                    return;
                }
            };
            rt.block_on(async {
                if let Err(err) =
                    run_async_worker(source, refresh_every, cmd_rx, evt_tx.clone()).await
                {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Worker exited: {:#}", err),
                    });
                }
            });
        });

        Self { cmd_tx, evt_rx }
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
