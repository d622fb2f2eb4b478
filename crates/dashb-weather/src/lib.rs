//! Weather source for DashB
//!
//! Resolves a city name through the Open-Meteo geocoder, fetches its forecast
//! and turns the payload into display-ready labels.

pub mod geocode;
pub mod labels;
pub mod provider;
pub mod types;

pub use geocode::geocode_city;
pub use provider::{WeatherProvider, WeatherSource};
pub use types::*;
