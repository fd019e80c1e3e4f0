//! Trailing-edge debounced writer
//!
//! Every mutation hands the scheduler a fresh snapshot. The background task
//! waits until no new snapshot has arrived for the debounce period and then
//! writes only the latest one, so at most one write is pending and writes
//! never overlap. `flush` writes whatever is pending right away.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::{BackendMode, StateStore};
use crate::state::AppState;

type Snapshot = Option<Arc<AppState>>;

pub struct PersistScheduler {
    mode: BackendMode,
    snapshots: watch::Sender<Snapshot>,
    flushes: mpsc::Sender<oneshot::Sender<()>>,
    failures: mpsc::UnboundedReceiver<String>,
    worker: JoinHandle<()>,
}

impl PersistScheduler {
    /// Starts the writer task; must be called inside a tokio runtime
    pub fn spawn(store: Arc<dyn StateStore>, delay: Duration) -> Self {
        let (snapshots, snapshot_rx) = watch::channel(None);
        let (flushes, flush_rx) = mpsc::channel(4);
        let (failure_tx, failures) = mpsc::unbounded_channel();
        let mode = store.mode();

        let writer = Writer {
            store,
            delay,
            snapshots: snapshot_rx,
            flushes: flush_rx,
            failures: failure_tx,
        };
        let worker = tokio::spawn(writer.run());

        Self {
            mode,
            snapshots,
            flushes,
            failures,
            worker,
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Replaces the pending snapshot and restarts the quiet period
    pub fn schedule(&self, state: &AppState) {
        self.snapshots.send_replace(Some(Arc::new(state.clone())));
    }

    /// Writes the pending snapshot now and waits for it to finish
    pub async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.flushes
            .send(ack)
            .await
            .ok()
            .context("Persistence writer has stopped")?;
        done.await.ok().context("Persistence writer stopped during flush")?;
        Ok(())
    }

    /// Remote write errors since the last call
    pub fn take_failures(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(message) = self.failures.try_recv() {
            out.push(message);
        }
        out
    }

    /// Flushes, then stops the writer
    pub async fn close(self) -> Result<()> {
        let result = self.flush().await;
        drop(self.snapshots);
        drop(self.flushes);
        self.worker.await.context("Persistence writer panicked")?;
        result
    }
}

struct Writer {
    store: Arc<dyn StateStore>,
    delay: Duration,
    snapshots: watch::Receiver<Snapshot>,
    flushes: mpsc::Receiver<oneshot::Sender<()>>,
    failures: mpsc::UnboundedSender<String>,
}

impl Writer {
    async fn run(mut self) {
        let mut pending = false;
        loop {
            if pending {
                tokio::select! {
                    biased;
                    changed = self.snapshots.changed() => {
                        if changed.is_err() {
                            self.write_latest().await;
                            break;
                        }
                    }
                    Some(ack) = self.flushes.recv() => {
                        self.write_latest().await;
                        pending = false;
                        let _ = ack.send(());
                    }
                    _ = tokio::time::sleep(self.delay) => {
                        self.write_latest().await;
                        pending = false;
                    }
                }
            } else {
                tokio::select! {
                    biased;
                    changed = self.snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        pending = true;
                    }
                    request = self.flushes.recv() => match request {
                        Some(ack) => {
                            if self.snapshots.has_changed().unwrap_or(false) {
                                self.write_latest().await;
                            }
                            let _ = ack.send(());
                        }
                        None => break,
                    },
                }
            }
        }
        log::debug!("Persistence writer stopped");
    }

    async fn write_latest(&mut self) {
        let latest = { self.snapshots.borrow_and_update().clone() };
        let Some(state) = latest else {
            return;
        };

        match self.store.save(&state).await {
            Ok(()) => log::debug!("Persisted snapshot to {}", self.store.mode()),
            Err(e) => {
                log::error!("Failed to persist snapshot to {}: {:#}", self.store.mode(), e);
                if self.store.mode() == BackendMode::Remote {
                    let _ = self.failures.send(format!("{:#}", e));
                }
            }
        }
    }
}
