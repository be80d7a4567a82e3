use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, instrument};

use crate::error::{Error, NotifyApiError, Result};

use super::Notifier;

const DEFAULT_BASE_URL: &str = "https://notify-api.line.me";

/// Client for the LINE Notify API.
#[derive(Clone)]
pub struct LineNotifyClient {
    token: String,
    base_url: String,
    http: Client,
}

impl LineNotifyClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Point the client at another host, e.g. a mock server. The URL is
    /// validated when a message is sent.
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        Self {
            token: token.to_owned(),
            base_url: base_url.to_owned(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| Error::invalid_base_url(&self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_base_url(&self.base_url, "URL cannot be a base"))?
            .pop_if_empty()
            .push("api")
            .push("notify");
        Ok(url)
    }
}

impl std::fmt::Debug for LineNotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineNotifyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for LineNotifyClient {
    #[instrument(skip_all, fields(chars = message.chars().count()))]
    async fn send(&self, message: &str) -> Result<()> {
        let res = self
            .http
            .post(self.endpoint()?)
            .bearer_auth(&self.token)
            .form(&[("message", message)])
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "LINE Notify responded");
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = res.text().await?;
        let err: NotifyApiError = serde_json::from_str(&body)
            .map_err(|e| Error::decode("LINE Notify error response", e))?;
        Err(err.into())
    }
}
