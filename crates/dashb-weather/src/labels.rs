//! Formatting of forecast series into the short strings the dashboard shows.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use dashb_core::{DataShapeError, Locale};

const HOURLY_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Whole degrees, truncated toward zero ("7°", "-2°").
pub fn temperature_label(celsius: f64) -> String {
    format!("{}°", degrees(celsius))
}

fn degrees(value: f64) -> i64 {
    value.trunc() as i64
}

/// "HH:MM  T°" for the first `cap` entries of the hourly series.
///
/// Fails when the temperature series is shorter than the labels it must cover.
pub fn hourly_labels(
    times: &[String],
    temperatures: &[f64],
    cap: usize,
) -> Result<Vec<String>, DataShapeError> {
    let wanted = cap.min(times.len());
    ensure_len("hourly.temperature_2m", temperatures, wanted)?;

    times
        .iter()
        .zip(temperatures)
        .take(cap)
        .map(|(time, temp)| {
            let parsed = parse_hourly_time(time)?;
            Ok(format!("{}  {}", parsed.format("%H:%M"), temperature_label(*temp)))
        })
        .collect()
}

/// "Day  Tmax° Tmin°" for the first `cap` entries of the daily series.
pub fn daily_labels(
    days: &[String],
    maxima: &[f64],
    minima: &[f64],
    cap: usize,
    locale: Locale,
) -> Result<Vec<String>, DataShapeError> {
    let wanted = cap.min(days.len());
    ensure_len("daily.temperature_2m_max", maxima, wanted)?;
    ensure_len("daily.temperature_2m_min", minima, wanted)?;

    days.iter()
        .zip(maxima.iter().zip(minima))
        .take(cap)
        .map(|(day, (max, min))| {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                DataShapeError::InvalidValue {
                    field: "daily.time".to_string(),
                    value: day.clone(),
                }
            })?;
            Ok(format!(
                "{}  {} {}",
                locale.weekday_short(date.weekday()),
                temperature_label(*max),
                temperature_label(*min)
            ))
        })
        .collect()
}

fn ensure_len(field: &str, series: &[f64], wanted: usize) -> Result<(), DataShapeError> {
    if series.len() < wanted {
        return Err(DataShapeError::InvalidValue {
            field: field.to_string(),
            value: format!("{} values, expected {}", series.len(), wanted),
        });
    }
    Ok(())
}

fn parse_hourly_time(raw: &str) -> Result<NaiveDateTime, DataShapeError> {
    HOURLY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| DataShapeError::InvalidValue {
            field: "hourly.time".to_string(),
            value: raw.to_string(),
        })
}
