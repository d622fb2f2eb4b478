//! The dashboard view-model and the refresh cycle that keeps it current.
//!
//! [`DashboardState`] is the single writer of a [`DashboardViewModel`] held in a
//! `watch` channel. A refresh cycle runs the weather and news fetches
//! concurrently and applies each result as soon as it settles. A failed source
//! leaves its previous value in place; the next cycle is the retry.

use std::sync::Arc;

use dashb_core::refresh_gate::RefreshPhase;
use dashb_core::{Config, HttpJsonClient, OverlapPolicy, RefreshGate};
use dashb_news::{NewsFeed, NewsService, NewsSource};
use dashb_weather::{WeatherProvider, WeatherSnapshot, WeatherSource};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;

use crate::agenda::{AgendaEntry, StaticAgenda};

/// Everything the dashboard renders from the refresh pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardViewModel {
    pub weather: WeatherSnapshot,
    pub news: NewsFeed,
    pub loading: bool,
}

impl DashboardViewModel {
    /// Idle view-model with no headlines. `loading` turns on when the first
    /// cycle begins, which the scheduler does on its first tick.
    pub fn initial(weather: WeatherSnapshot) -> Self {
        Self {
            weather,
            news: Vec::new(),
            loading: false,
        }
    }
}

pub struct DashboardState {
    weather: Arc<dyn WeatherSource>,
    news: Arc<dyn NewsSource>,
    city_query: String,
    view: watch::Sender<DashboardViewModel>,
    gate: Mutex<RefreshGate>,
    agenda: StaticAgenda,
}

impl DashboardState {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        news: Arc<dyn NewsSource>,
        city_query: impl Into<String>,
        initial: DashboardViewModel,
        policy: OverlapPolicy,
        agenda: StaticAgenda,
    ) -> Self {
        let (view, _) = watch::channel(initial);
        Self {
            weather,
            news,
            city_query: city_query.into(),
            view,
            gate: Mutex::new(RefreshGate::new(policy)),
            agenda,
        }
    }

    /// Wire the Open-Meteo provider and RSS service described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = HttpJsonClient::new()?;
        let weather = WeatherProvider::from_config(config, http.clone())?;
        let news = NewsService::from_config(config, http)?;

        let placeholder =
            WeatherSnapshot::placeholder(&config.weather.display_city, config.dashboard.locale);

        Ok(Self::new(
            Arc::new(weather),
            Arc::new(news),
            config.weather.city_query.clone(),
            DashboardViewModel::initial(placeholder),
            config.dashboard.overlap_policy,
            StaticAgenda::for_variant(config.dashboard.variant),
        ))
    }

    /// Clone of the current view-model.
    pub fn snapshot(&self) -> DashboardViewModel {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view-model change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardViewModel> {
        self.view.subscribe()
    }

    pub fn agenda(&self) -> &[AgendaEntry] {
        self.agenda.entries()
    }

    pub fn phase(&self) -> RefreshPhase {
        self.gate.lock().phase()
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.gate.lock().policy()
    }

    /// Run one refresh cycle to completion. Returns false when the request was
    /// coalesced into a cycle already in flight.
    pub async fn refresh(&self) -> bool {
        if !self.begin_cycle() {
            tracing::debug!("Refresh already in flight, trigger ignored");
            return false;
        }
        let _cycle = CycleGuard { state: self };
        self.run_cycle().await;
        true
    }

    /// Start a refresh cycle on the runtime without waiting for it. Returns
    /// whether a cycle was started.
    pub fn trigger_refresh(self: &Arc<Self>) -> bool {
        if !self.begin_cycle() {
            tracing::debug!("Refresh already in flight, trigger ignored");
            return false;
        }
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let _cycle = CycleGuard { state: &state };
            state.run_cycle().await;
        });
        true
    }

    fn begin_cycle(&self) -> bool {
        let mut gate = self.gate.lock();
        if !gate.try_begin() {
            return false;
        }
        self.view.send_if_modified(|vm| {
            let changed = !vm.loading;
            vm.loading = true;
            changed
        });
        true
    }

    fn end_cycle(&self) {
        let mut gate = self.gate.lock();
        if gate.finish() {
            self.view.send_if_modified(|vm| {
                let changed = vm.loading;
                vm.loading = false;
                changed
            });
        }
    }

    async fn run_cycle(&self) {
        tracing::info!("Refresh started");

        // One task per source; a panic surfaces as a JoinError.
        let weather_source = Arc::clone(&self.weather);
        let city = self.city_query.clone();
        let weather_task =
            tokio::spawn(async move { weather_source.fetch_weather(&city).await });

        let news_source = Arc::clone(&self.news);
        let news_task = tokio::spawn(async move { news_source.fetch_headlines().await });

        let weather = async {
            match weather_task.await {
                Ok(Ok(snapshot)) => self.apply_weather(snapshot),
                Ok(Err(e)) => tracing::warn!("Weather refresh failed: {}", e),
                Err(e) => tracing::error!("Weather task aborted: {}", e),
            }
        };
        let news = async {
            match news_task.await {
                Ok(Ok(headlines)) => self.apply_news(headlines),
                Ok(Err(e)) => tracing::warn!("News refresh failed: {}", e),
                Err(e) => tracing::error!("News task aborted: {}", e),
            }
        };
        tokio::join!(weather, news);

        tracing::info!("Refresh finished");
    }

    fn apply_weather(&self, snapshot: WeatherSnapshot) {
        tracing::debug!(city = %snapshot.city, "Applying weather snapshot");
        self.view.send_if_modified(|vm| {
            if vm.weather == snapshot {
                return false;
            }
            vm.weather = snapshot;
            true
        });
    }

    fn apply_news(&self, headlines: NewsFeed) {
        tracing::debug!("Applying {} headlines", headlines.len());
        self.view.send_if_modified(|vm| {
            if vm.news == headlines {
                return false;
            }
            vm.news = headlines;
            true
        });
    }
}

/// Settles the refresh gate even when the cycle future is dropped early.
struct CycleGuard<'a> {
    state: &'a DashboardState,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.state.end_cycle();
    }
}
