use crate::{
    Settings,
    enums::{Language, UnitSystem},
    error::Result,
    model::ForecastResponse,
    provider::{darksky::DarkSkyClient, line_notify::LineNotifyClient},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod darksky;
pub mod line_notify;

/// Source of hourly and daily forecast data for a fixed location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn get(&self, language: Language, units: UnitSystem) -> Result<ForecastResponse>;
}

/// Delivers a text message to its recipient.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, message: &str) -> Result<()>;
}

/// Construct the forecast client for the configured location.
pub fn forecast_source_from_settings(settings: &Settings) -> Result<Box<dyn ForecastSource>> {
    let client = DarkSkyClient::new(&settings.forecast_token, &settings.latitude, &settings.longitude)?;
    Ok(Box::new(client))
}

/// Construct the LINE Notify client for the configured token.
pub fn notifier_from_settings(settings: &Settings) -> Box<dyn Notifier> {
    Box::new(LineNotifyClient::new(&settings.notify_token))
}
