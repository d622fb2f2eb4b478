//! Display language for generated labels.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Language used for condition text, weekday/month names and placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
}

impl Locale {
    /// ISO 639-1 code, as accepted by the Open-Meteo `language` parameter.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::It => "it",
        }
    }

    /// Three-letter weekday abbreviation ("Mon", "Lun").
    pub fn weekday_short(self, day: Weekday) -> &'static str {
        match self {
            Locale::En => match day {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
            Locale::It => match day {
                Weekday::Mon => "Lun",
                Weekday::Tue => "Mar",
                Weekday::Wed => "Mer",
                Weekday::Thu => "Gio",
                Weekday::Fri => "Ven",
                Weekday::Sat => "Sab",
                Weekday::Sun => "Dom",
            },
        }
    }

    /// Full weekday name, lowercase where the language does so.
    pub fn weekday_long(self, day: Weekday) -> &'static str {
        match self {
            Locale::En => match day {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            },
            Locale::It => match day {
                Weekday::Mon => "lunedì",
                Weekday::Tue => "martedì",
                Weekday::Wed => "mercoledì",
                Weekday::Thu => "giovedì",
                Weekday::Fri => "venerdì",
                Weekday::Sat => "sabato",
                Weekday::Sun => "domenica",
            },
        }
    }

    /// Full month name for `month` in 1..=12. Out of range yields "".
    pub fn month_long(self, month: u32) -> &'static str {
        const EN: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        const IT: [&str; 12] = [
            "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
            "settembre", "ottobre", "novembre", "dicembre",
        ];

        let table = match self {
            Locale::En => &EN,
            Locale::It => &IT,
        };
        month
            .checked_sub(1)
            .and_then(|i| table.get(i as usize))
            .copied()
            .unwrap_or("")
    }

    /// Placeholder condition text shown before the first weather fetch lands.
    pub fn loading_weather(self) -> &'static str {
        match self {
            Locale::En => "Loading weather...",
            Locale::It => "Caricamento meteo...",
        }
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
