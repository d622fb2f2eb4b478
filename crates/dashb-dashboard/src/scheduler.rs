//! Periodic refresh trigger.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::DashboardState;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Triggers a refresh immediately and then once per `period` until stopped.
///
/// Ticks go through [`DashboardState::trigger_refresh`], so the state's overlap
/// policy decides what happens when a tick lands on a cycle still in flight.
/// Stopping the scheduler never aborts a cycle that has already started.
pub struct RefreshScheduler {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn start(state: Arc<DashboardState>, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tracing::info!("Starting refresh scheduler every {:?}", period);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !state.trigger_refresh() {
                            tracing::debug!("Scheduled refresh coalesced");
                        }
                    }
                }
            }
            tracing::info!("Refresh scheduler stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop and wait for the timer task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("Refresh scheduler task failed: {}", e);
            }
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
