use dashb_core::{DataShapeError, Locale, NetworkError};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Thunderstorm,
    Variable,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Variable,
        }
    }

    /// Get a human-readable description
    pub fn description(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Clear => "Clear",
                Self::PartlyCloudy => "Partly cloudy",
                Self::Overcast => "Overcast",
                Self::Fog => "Fog",
                Self::Drizzle => "Drizzle",
                Self::Rain => "Rain",
                Self::FreezingRain => "Freezing rain",
                Self::Snow => "Snow",
                Self::Thunderstorm => "Thunderstorm",
                Self::Variable => "Variable",
            },
            Locale::It => match self {
                Self::Clear => "Sereno",
                Self::PartlyCloudy => "Poco nuvoloso",
                Self::Overcast => "Coperto",
                Self::Fog => "Nebbia",
                Self::Drizzle => "Pioviggine",
                Self::Rain => "Pioggia",
                Self::FreezingRain => "Pioggia gelata",
                Self::Snow => "Neve",
                Self::Thunderstorm => "Temporale",
                Self::Variable => "Variabile",
            },
        }
    }
}

/// Description for a raw WMO code in the given locale.
pub fn map_weather_code(code: i32, locale: Locale) -> &'static str {
    WeatherCondition::from_wmo_code(code).description(locale)
}

/// First geocoding match for a city query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Display-ready weather, replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_label: String,
    pub description: String,
    pub next_hours: Vec<String>,
    pub next_days: Vec<String>,
}

impl WeatherSnapshot {
    /// Snapshot shown until the first fetch succeeds.
    pub fn placeholder(city: impl Into<String>, locale: Locale) -> Self {
        Self {
            city: city.into(),
            temperature_label: "--°".to_string(),
            description: locale.loading_weather().to_string(),
            next_hours: Vec::new(),
            next_days: Vec::new(),
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Unexpected weather data: {0}")]
    DataShape(#[from] DataShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(code: i32) -> &'static str {
        map_weather_code(code, Locale::En)
    }

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(en(0), "Clear");
    }

    #[test]
    fn test_wmo_code_partly_cloudy() {
        assert_eq!(en(1), "Partly cloudy");
        assert_eq!(en(2), "Partly cloudy");
    }

    #[test]
    fn test_wmo_code_overcast() {
        assert_eq!(en(3), "Overcast");
    }

    #[test]
    fn test_wmo_code_fog() {
        assert_eq!(en(45), "Fog");
        assert_eq!(en(48), "Fog");
    }

    #[test]
    fn test_wmo_code_drizzle() {
        for code in [51, 53, 55, 56, 57] {
            assert_eq!(en(code), "Drizzle", "code {}", code);
        }
    }

    #[test]
    fn test_wmo_code_rain() {
        for code in [61, 63, 65, 80, 81, 82] {
            assert_eq!(en(code), "Rain", "code {}", code);
        }
    }

    #[test]
    fn test_wmo_code_freezing_rain() {
        assert_eq!(en(66), "Freezing rain");
        assert_eq!(en(67), "Freezing rain");
    }

    #[test]
    fn test_wmo_code_snow() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(en(code), "Snow", "code {}", code);
        }
    }

    #[test]
    fn test_wmo_code_thunderstorm() {
        for code in [95, 96, 99] {
            assert_eq!(en(code), "Thunderstorm", "code {}", code);
        }
    }

    #[test]
    fn test_wmo_code_unknown_is_variable() {
        let known = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 80, 81, 82, 66, 67, 71, 73, 75,
            77, 85, 86, 95, 96, 99,
        ];
        for code in -5..=120 {
            if !known.contains(&code) {
                assert_eq!(en(code), "Variable", "code {}", code);
            }
        }
        assert_eq!(en(i32::MAX), "Variable");
    }

    #[test]
    fn test_italian_descriptions() {
        assert_eq!(map_weather_code(0, Locale::It), "Sereno");
        assert_eq!(map_weather_code(61, Locale::It), "Pioggia");
        assert_eq!(map_weather_code(66, Locale::It), "Pioggia gelata");
        assert_eq!(map_weather_code(42, Locale::It), "Variabile");
    }

    #[test]
    fn test_placeholder_snapshot() {
        let snapshot = WeatherSnapshot::placeholder("Forlì", Locale::It);
        assert_eq!(snapshot.city, "Forlì");
        assert_eq!(snapshot.temperature_label, "--°");
        assert_eq!(snapshot.description, "Caricamento meteo...");
        assert!(snapshot.next_hours.is_empty());
        assert!(snapshot.next_days.is_empty());
    }
}
