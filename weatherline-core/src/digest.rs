//! Plain-text digest of a forecast, as sent to LINE Notify.
//!
//! All times are shown in the forecast location's zone. Temperatures carry a
//! `°C` suffix whatever unit system was requested.

use chrono::{DateTime, Days, DurationRound, TimeDelta, TimeZone, Utc};

use crate::{
    enums::WeatherCondition,
    model::{DataPoint, ForecastResponse},
};

/// Daily records are shown for this many days after the reference date.
pub const DAILY_RANGE_DAYS: u64 = 3;

/// Pictograph for a condition. Night variants share the day glyph.
pub fn glyph(condition: WeatherCondition) -> Option<char> {
    use WeatherCondition::*;

    match condition {
        ClearDay | ClearNight => Some('\u{2600}'),
        Rain | Sleet => Some('\u{2603}'),
        Snow => Some('\u{2744}'),
        Wind => Some('\u{1F343}'),
        Fog => Some('\u{1F32B}'),
        Cloudy => Some('\u{2601}'),
        PartlyCloudyDay | PartlyCloudyNight => Some('\u{26C5}'),
        Unknown => None,
    }
}

/// Full digest: a leading blank line, the reference date, the hourly lines
/// for the reference hour and the daily blocks that follow it.
pub fn render_digest(reference: DateTime<Utc>, forecast: &ForecastResponse) -> String {
    let start = hour_start(reference, forecast);

    let mut out = String::from("\n");
    out.push_str(&format!("{}\n", start.format("%m/%d")));

    let hourly = render_hourly(reference, forecast);
    if !hourly.is_empty() {
        out.push_str(&hourly);
        out.push('\n');
    }

    out.push_str(&render_daily(reference, forecast));
    out
}

/// One line per hourly record that falls in the same hour as `reference`.
pub fn render_hourly(reference: DateTime<Utc>, forecast: &ForecastResponse) -> String {
    let tz = forecast.timezone.tz();
    let start = hour_start(reference, forecast);

    let mut out = String::new();
    for point in &forecast.hourly.data {
        let time = point.time.with_timezone(&tz);
        if truncate_hour(time) != start {
            continue;
        }

        let label = match glyph(point.condition) {
            Some(g) => g.to_string(),
            None => point.summary.clone(),
        };

        out.push_str(&format!(
            "  {} {} {} {}\n",
            time.format("%H:%M"),
            label,
            temperature_pair(point.temperature, point.apparent_temperature),
            precipitation(point),
        ));
    }

    out
}

/// A four-line block per daily record in `(reference, reference + 3 days]`.
pub fn render_daily(reference: DateTime<Utc>, forecast: &ForecastResponse) -> String {
    let tz = forecast.timezone.tz();
    let from = hour_start(reference, forecast);
    let to = from
        .checked_add_days(Days::new(DAILY_RANGE_DAYS))
        .unwrap_or(from + TimeDelta::days(DAILY_RANGE_DAYS as i64));

    let mut out = String::new();
    for point in &forecast.daily.data {
        let day = point.time.with_timezone(&tz);
        let truncated = truncate_hour(day);
        if truncated <= from || truncated > to {
            continue;
        }

        let label = glyph(point.condition).map_or_else(|| "??".to_string(), |g| g.to_string());

        out.push_str(&format!("{} {}  {}\n", day.format("%m/%d"), label, precipitation(point)));
        out.push_str(&format!(
            "  {}{}\n",
            temperature_pair(point.temperature_high, point.apparent_temperature_high),
            point.apparent_temperature_high_time.with_timezone(&tz).format("(%H:%M)"),
        ));
        out.push_str(&format!(
            "  {}{}\n",
            temperature_pair(point.temperature_low, point.apparent_temperature_low),
            point.apparent_temperature_low_time.with_timezone(&tz).format("(%H:%M)"),
        ));
        out.push('\n');
    }

    out
}

fn hour_start(reference: DateTime<Utc>, forecast: &ForecastResponse) -> DateTime<chrono_tz::Tz> {
    truncate_hour(reference.with_timezone(&forecast.timezone.tz()))
}

/// Top of the local hour.
fn truncate_hour<T: TimeZone>(time: DateTime<T>) -> DateTime<T> {
    time.clone().duration_trunc(TimeDelta::hours(1)).unwrap_or(time)
}

fn temperature_pair(actual: f64, apparent: f64) -> String {
    format!("{actual:.1}°C/{apparent:.1}°C")
}

/// Probability as a whole percentage; snow also shows its accumulation.
fn precipitation(point: &DataPoint) -> String {
    let mut out = format!("{:.0}%", point.precip_probability * 100.0);
    if point.condition == WeatherCondition::Snow {
        out.push_str(&format!("/{:.0}cm", point.precip_accumulation));
    }
    out
}
