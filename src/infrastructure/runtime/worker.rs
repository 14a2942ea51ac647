//! Async worker - runs in Tokio runtime and loads the reference datasets

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::infrastructure::nano::LedgerSource;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const COMMAND_POLL: Duration = Duration::from_millis(100);

/// Run the async worker loop until Shutdown or the TUI hangs up
pub async fn run_async_worker(
    source: Arc<dyn LedgerSource>,
    refresh_every: Option<Duration>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    info!(endpoint = %source.endpoint_name(), "loading account datasets");
    load_datasets(source.as_ref(), &evt_tx).await;
    let mut last_load = Instant::now();

    let mut poll = interval(COMMAND_POLL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        poll.tick().await;

        loop {
            match cmd_rx.try_recv() {
                Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => {
                    info!("runtime worker stopped");
                    return Ok(());
                }
                Ok(RuntimeCommand::Refresh) => {
                    load_datasets(source.as_ref(), &evt_tx).await;
                    last_load = Instant::now();
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if let Some(every) = refresh_every {
            if last_load.elapsed() >= every {
                load_datasets(source.as_ref(), &evt_tx).await;
                last_load = Instant::now();
            }
        }
    }
}

/// Fetch all three datasets concurrently and report each one separately.
pub async fn load_datasets(source: &dyn LedgerSource, evt_tx: &Sender<RuntimeEvent>) {
    let _ = evt_tx.send(RuntimeEvent::RepresentativesLoading);

    let (representatives, quorum, known_accounts) = tokio::join!(
        source.representatives(),
        source.confirmation_quorum(),
        source.known_accounts()
    );

    match representatives {
        Ok(records) => {
            info!(count = records.len(), "representatives loaded");
            let _ = evt_tx.send(RuntimeEvent::RepresentativesReady { records });
        }
        Err(err) => {
            warn!(error = %err, "representatives fetch failed");
            let _ = evt_tx.send(RuntimeEvent::RepresentativesFailed {
                message: format!("Representatives: {err}"),
            });
        }
    }

    match quorum {
        Ok(quorum) => {
            info!(
                min_weight = %quorum.principal_representative_min_weight,
                "confirmation quorum loaded"
            );
            let _ = evt_tx.send(RuntimeEvent::QuorumReady { quorum });
        }
        Err(err) => {
            warn!(error = %err, "confirmation quorum fetch failed");
            let _ = evt_tx.send(RuntimeEvent::Error {
                message: format!("Quorum: {err}"),
            });
        }
    }

    match known_accounts {
        Ok(None) => debug!("no known accounts registry configured"),
        Ok(Some(accounts)) => {
            info!(count = accounts.len(), "known accounts loaded");
            let _ = evt_tx.send(RuntimeEvent::KnownAccountsReady { accounts });
        }
        Err(err) => {
            warn!(error = %err, "known accounts fetch failed");
            let _ = evt_tx.send(RuntimeEvent::Error {
                message: format!("Known accounts: {err}"),
            });
        }
    }
}
