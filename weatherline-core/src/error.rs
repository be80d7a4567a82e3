use serde::Deserialize;
use thiserror::Error;

/// Error object returned by the forecast API on `400 Bad Request`.
///
/// For any other non-200 status the client fills `code` with the HTTP status
/// and `message` with the raw response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct ForecastApiError {
    pub code: i64,
    #[serde(rename = "error")]
    pub message: String,
}

/// Error object returned by LINE Notify on any non-200 status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{status}: {message}")]
pub struct NotifyApiError {
    pub status: i64,
    pub message: String,
}

/// Errors returned by the forecast and notify clients.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A body that had to be well-formed JSON was not.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The forecast API rejected the request.
    #[error("forecast API error: {0}")]
    Forecast(#[from] ForecastApiError),

    /// LINE Notify rejected the message.
    #[error("LINE Notify error: {0}")]
    Notify(#[from] NotifyApiError),

    /// The configured API base URL cannot be used to build request URLs.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn decode(context: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { context, source }
    }

    pub(crate) fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl { url: url.to_owned(), reason: reason.to_string() }
    }
}
