//! Dashboard orchestration: the view-model, its refresh cycle and the timers
//! that drive it.

pub mod agenda;
pub mod app;
pub mod clock;
pub mod scheduler;
pub mod state;

pub use agenda::{AgendaEntry, StaticAgenda};
pub use app::App;
pub use clock::{format_clock, Clock, ClockLabels};
pub use scheduler::RefreshScheduler;
pub use state::{DashboardState, DashboardViewModel};

pub use dashb_news::{NewsFeed, NewsHeadline};
pub use dashb_weather::WeatherSnapshot;
