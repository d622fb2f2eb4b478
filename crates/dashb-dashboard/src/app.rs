use anyhow::Result;
use std::sync::Arc;

use dashb_core::Config;

use crate::clock::Clock;
use crate::scheduler::RefreshScheduler;
use crate::state::DashboardState;

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    state: Arc<DashboardState>,
    scheduler: Option<RefreshScheduler>,
    clock: Option<Clock>,
}

impl App {
    /// Create a new application instance from a loaded config
    pub fn new(config: Config) -> Result<Self> {
        let state = Arc::new(DashboardState::from_config(&config)?);

        Ok(Self {
            config: Arc::new(config),
            state,
            scheduler: None,
            clock: None,
        })
    }

    /// Start the refresh timer and the clock. Calling twice is a no-op.
    pub fn start(&mut self) {
        if self.scheduler.is_none() {
            self.scheduler = Some(RefreshScheduler::start(
                self.state.clone(),
                self.config.refresh_interval(),
            ));
        }
        if self.clock.is_none() {
            self.clock = Some(Clock::start(self.config.dashboard.locale));
        }
        tracing::info!(
            "Dashboard started ({:?} variant, {:?} overlap)",
            self.config.dashboard.variant,
            self.config.dashboard.overlap_policy
        );
    }

    /// Stop the timers. A refresh already in flight is left to finish.
    pub async fn shutdown(&mut self) {
        tracing::info!("Shutting down dashboard");

        if let Some(scheduler) = self.scheduler.take() {
            scheduler.shutdown().await;
        }
        if let Some(clock) = self.clock.take() {
            clock.shutdown().await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.as_ref().is_some_and(|s| s.is_running())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }

    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }
}
