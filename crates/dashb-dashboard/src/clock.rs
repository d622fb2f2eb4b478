//! Wall-clock labels for the dashboard header.

use std::time::Duration;

use chrono::{Datelike, Local, NaiveDateTime};
use dashb_core::locale::capitalize_first;
use dashb_core::Locale;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockLabels {
    /// `HH:MM`, 24-hour.
    pub time: String,
    /// Long date, e.g. "Lunedì 9 febbraio 2026".
    pub date: String,
}

pub fn format_clock(now: NaiveDateTime, locale: Locale) -> ClockLabels {
    let date = format!(
        "{} {} {} {}",
        locale.weekday_long(now.weekday()),
        now.day(),
        locale.month_long(now.month()),
        now.year()
    );
    ClockLabels {
        time: now.format("%H:%M").to_string(),
        date: capitalize_first(&date),
    }
}

/// Publishes local-time labels once a second until stopped.
pub struct Clock {
    labels: watch::Receiver<ClockLabels>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    pub fn start(locale: Locale) -> Self {
        let (tx, labels) = watch::channel(format_clock(Local::now().naive_local(), locale));
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let next = format_clock(Local::now().naive_local(), locale);
                        tx.send_if_modified(|current| {
                            if *current == next {
                                return false;
                            }
                            *current = next;
                            true
                        });
                    }
                }
            }
            tracing::debug!("Clock stopped");
        });

        Self {
            labels,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn labels(&self) -> ClockLabels {
        self.labels.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockLabels> {
        self.labels.clone()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop ticking and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("Clock task failed: {}", e);
            }
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 42)
            .unwrap()
    }

    #[test]
    fn test_italian_labels() {
        let labels = format_clock(at(2026, 2, 9, 7, 5), Locale::It);
        assert_eq!(labels.time, "07:05");
        assert_eq!(labels.date, "Lunedì 9 febbraio 2026");
    }

    #[test]
    fn test_english_labels() {
        let labels = format_clock(at(2026, 2, 14, 20, 0), Locale::En);
        assert_eq!(labels.time, "20:00");
        assert_eq!(labels.date, "Saturday 14 February 2026");
    }

    #[tokio::test]
    async fn test_clock_stops() {
        let clock = Clock::start(Locale::En);
        assert_eq!(clock.labels().time.len(), 5);
        clock.stop();
        tokio::time::timeout(Duration::from_secs(2), clock.shutdown())
            .await
            .unwrap();
    }
}
