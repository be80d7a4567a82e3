//! Core library for the `weatherline` CLI.
//!
//! This crate defines:
//! - Typed forecast data and the wire tokens of its enumerations
//! - Clients for the Forecast (Dark Sky) API and LINE Notify
//! - The plain-text digest sent to LINE
//! - Configuration & credentials handling
//!
//! A run is one forecast fetch followed by one notification, see
//! [`dispatch::dispatch_digest`].

pub mod config;
pub mod digest;
pub mod dispatch;
pub mod enums;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, MissingSettings, Settings};
pub use digest::{render_daily, render_digest, render_hourly};
pub use dispatch::dispatch_digest;
pub use enums::{Language, UnitSystem, WeatherCondition};
pub use error::{Error, ForecastApiError, NotifyApiError, Result};
pub use model::{DataBlock, DataPoint, DigestRequest, ForecastResponse, TimeZoneRef};
pub use provider::{
    ForecastSource, Notifier, darksky::DarkSkyClient, forecast_source_from_settings,
    line_notify::LineNotifyClient, notifier_from_settings,
};
