use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::{
    enums::{Language, UnitSystem, WeatherCondition},
    error::{Error, Result},
};

/// What to fetch and which day to summarise.
#[derive(Debug, Clone, Default)]
pub struct DigestRequest {
    pub language: Language,
    pub units: UnitSystem,
    /// Day to summarise; `None` means "now".
    pub date: Option<NaiveDate>,
}

impl DigestRequest {
    /// Reference instant for the digest.
    ///
    /// An explicit date is taken as midnight of that day in `tz`, the
    /// forecast location's zone.
    pub fn reference_time(&self, tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
        let Some(date) = self.date else {
            return now;
        };

        let midnight = date.and_time(NaiveTime::MIN);
        tz.from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }
}

/// IANA zone of the forecast location. Names missing from the zone database
/// resolve to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneRef(Tz);

impl TimeZoneRef {
    pub fn named(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self(tz),
            Err(_) => {
                tracing::debug!(timezone = %name, "unknown time zone, falling back to UTC");
                Self(Tz::UTC)
            }
        }
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for TimeZoneRef {
    fn default() -> Self {
        Self(Tz::UTC)
    }
}

impl<'de> Deserialize<'de> for TimeZoneRef {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::named(&name))
    }
}

/// Response of the forecast endpoint with `currently`, `minutely`, `alerts`
/// and `flags` excluded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    pub timezone: TimeZoneRef,
    pub hourly: DataBlock,
    pub daily: DataBlock,
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::decode("forecast response", e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataBlock {
    pub data: Vec<DataPoint>,
    #[serde(rename = "icon")]
    pub condition: WeatherCondition,
    pub summary: String,
}

/// One hourly or daily record. Fields the API does not send for a block
/// keep their zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataPoint {
    #[serde(rename = "icon")]
    pub condition: WeatherCondition,
    pub summary: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub apparent_temperature: f64,
    /// Probability of precipitation, 0 to 1.
    pub precip_probability: f64,
    /// Snowfall accumulation; only meaningful when the condition is snow.
    pub precip_accumulation: f64,

    // daily only
    pub temperature_high: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub temperature_high_time: DateTime<Utc>,
    pub temperature_low: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub temperature_low_time: DateTime<Utc>,
    pub apparent_temperature_high: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub apparent_temperature_high_time: DateTime<Utc>,
    pub apparent_temperature_low: f64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub apparent_temperature_low_time: DateTime<Utc>,
}
