//! Background flushing for deferred stores.

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::context::AppContext;

/// Handle to a running autosave task.
pub struct AutosaveHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// Spawns a task that flushes dirty stores every `interval`.
///
/// Must be called inside a Tokio runtime. The task performs one last flush
/// when shut down.
pub fn spawn_autosave(context: AppContext, interval: Duration) -> AutosaveHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(?interval, "Autosave started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if context.is_dirty() {
                        debug!("Autosave flushing");
                        context.flush_all();
                    }
                }
                _ = &mut shutdown_rx => break,
            }
        }

        context.flush_all();
        info!("Autosave stopped");
    });

    AutosaveHandle {
        shutdown: Some(shutdown_tx),
        task,
    }
}

impl AutosaveHandle {
    /// Stops the task after a final flush.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "Autosave task failed");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        if self.shutdown.is_some() {
            self.task.abort();
        }
    }
}
