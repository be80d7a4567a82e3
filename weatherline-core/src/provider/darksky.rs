use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, instrument};

use crate::{
    enums::{Language, UnitSystem},
    error::{Error, ForecastApiError, Result},
    model::ForecastResponse,
};

use super::ForecastSource;

const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

/// Blocks the digest never uses; only `hourly` and `daily` are requested.
const EXCLUDES: &[&str] = &["currently", "minutely", "alerts", "flags"];

/// Client for the Forecast (Dark Sky) API, bound to one location.
#[derive(Clone)]
pub struct DarkSkyClient {
    url: Url,
    latitude: String,
    longitude: String,
    http: Client,
}

impl DarkSkyClient {
    pub fn new(token: &str, latitude: &str, longitude: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token, latitude, longitude)
    }

    /// Point the client at another host, e.g. a mock server.
    pub fn with_base_url(base_url: &str, token: &str, latitude: &str, longitude: &str) -> Result<Self> {
        let mut url = Url::parse(base_url).map_err(|e| Error::invalid_base_url(base_url, e))?;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_base_url(base_url, "URL cannot be a base"))?
            .pop_if_empty()
            .push("forecast")
            .push(token)
            .push(&format!("{latitude},{longitude}"));

        Ok(Self {
            url,
            latitude: latitude.to_owned(),
            longitude: longitude.to_owned(),
            http: Client::new(),
        })
    }

    /// Full request URL. Unknown language or units leave their parameter out.
    pub fn request_url(&self, language: Language, units: UnitSystem) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            if language != Language::Unknown {
                query.append_pair("lang", language.as_token());
            }
            if units != UnitSystem::Unknown {
                query.append_pair("units", units.as_token());
            }
            query.append_pair("exclude", &EXCLUDES.join(","));
        }
        url
    }
}

// The URL embeds the API token, so it is left out.
impl std::fmt::Debug for DarkSkyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DarkSkyClient")
            .field("host", &self.url.host_str())
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ForecastSource for DarkSkyClient {
    #[instrument(skip(self))]
    async fn get(&self, language: Language, units: UnitSystem) -> Result<ForecastResponse> {
        debug!(lat = %self.latitude, long = %self.longitude, "Fetching forecast");
        let res = self.http.get(self.request_url(language, units)).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "Forecast API responded");

        match status {
            StatusCode::OK => ForecastResponse::from_json(&body),
            StatusCode::BAD_REQUEST => {
                let err: ForecastApiError = serde_json::from_str(&body)
                    .map_err(|e| Error::decode("forecast error response", e))?;
                Err(err.into())
            }
            _ => Err(ForecastApiError { code: status.as_u16().into(), message: body }.into()),
        }
    }
}
