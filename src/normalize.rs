//! Forecast normalization
//!
//! Reshapes the parallel-array Open-Meteo payload into one snapshot for the
//! current hour and an ordered series of hourly snapshots.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

use crate::models::forecast::value_at;
use crate::models::{
    CurrentData, DailyData, DailySummary, HourSnapshot, HourlyData, NormalizedForecast,
    RawForecast,
};

/// Timestamp layouts Open-Meteo uses for `time` columns
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Normalize a raw forecast against the reference wall-clock time `now`.
///
/// `hourly` holds raw indices `1..N`; index 0 is always left out. `current` is
/// taken from the response's own `current` block when there is one, otherwise
/// from the first hour matching `now` (see [`current_hour_index`]).
#[must_use]
pub fn normalize(raw: &RawForecast, now: NaiveDateTime) -> NormalizedForecast {
    let empty = HourlyData::default();
    let hours = raw.hourly.as_ref().unwrap_or(&empty);

    let hourly = (1..hours.len()).map(|i| snapshot_at(hours, i)).collect();

    let current = match &raw.current {
        Some(current) => current_snapshot(current),
        None => snapshot_at(hours, current_hour_index(&hours.time, now)),
    };

    let daily = raw.daily.as_ref().map(daily_summaries).unwrap_or_default();

    NormalizedForecast {
        current,
        hourly,
        daily,
    }
}

/// Index of the first entry whose hour-of-day and day-of-month both equal
/// `now`'s, or 0 when nothing matches.
///
/// Month and year are not compared, so `2024-01-15T10:00` matches a `now` of
/// `2024-02-15T10:20`. Entries that fail to parse never match.
#[must_use]
pub fn current_hour_index(times: &[String], now: NaiveDateTime) -> usize {
    times
        .iter()
        .position(|time| {
            parse_local_time(time)
                .is_some_and(|t| t.hour() == now.hour() && t.day() == now.day())
        })
        .unwrap_or(0)
}

/// Parse a provider timestamp as local wall-clock time
///
/// An RFC 3339 offset is dropped, not converted: `06:00+02:00` reads as 06:00.
#[must_use]
pub fn parse_local_time(time: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(time, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(time)
                .ok()
                .map(|t| t.naive_local())
        })
}

/// Snapshot of raw hour `index`; out-of-range columns yield absent values
fn snapshot_at(hours: &HourlyData, index: usize) -> HourSnapshot {
    HourSnapshot {
        time: hours.time.get(index).cloned(),
        temperature: value_at(&hours.temperature, index),
        rain: value_at(&hours.rain, index),
        cloud_cover: value_at(&hours.cloud_cover, index),
        uv_index: value_at(&hours.uv_index, index),
        direct_radiation: value_at(&hours.direct_radiation, index),
        snowfall: value_at(&hours.snowfall, index),
        apparent_temperature: value_at(&hours.apparent_temperature, index),
        humidity: value_at(&hours.humidity, index),
        pressure: value_at(&hours.pressure, index),
        wind_speed: value_at(&hours.wind_speed, index),
        visibility: value_at(&hours.visibility, index),
        precipitation: value_at(&hours.precipitation, index),
        precipitation_probability: value_at(&hours.precipitation_probability, index),
        weather_code: value_at(&hours.weather_code, index),
    }
}

fn current_snapshot(current: &CurrentData) -> HourSnapshot {
    HourSnapshot {
        time: current.time.clone(),
        temperature: current.temperature,
        rain: current.rain,
        cloud_cover: current.cloud_cover,
        uv_index: current.uv_index,
        direct_radiation: current.direct_radiation,
        snowfall: current.snowfall,
        apparent_temperature: current.apparent_temperature,
        humidity: current.humidity,
        pressure: current.pressure,
        wind_speed: current.wind_speed,
        visibility: current.visibility,
        precipitation: current.precipitation,
        precipitation_probability: current.precipitation_probability,
        weather_code: current.weather_code,
    }
}

fn daily_summaries(daily: &DailyData) -> Vec<DailySummary> {
    let text_at = |column: &Option<Vec<Option<String>>>, index: usize| {
        column.as_ref()?.get(index).cloned().flatten()
    };

    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| DailySummary {
            date: date.clone(),
            sunrise: text_at(&daily.sunrise, i),
            sunset: text_at(&daily.sunset, i),
            temperature_max: value_at(&daily.temperature_max, i),
            temperature_min: value_at(&daily.temperature_min, i),
            uv_index_max: value_at(&daily.uv_index_max, i),
        })
        .collect()
}
