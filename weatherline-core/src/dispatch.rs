use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    digest::render_digest,
    error::Result,
    model::DigestRequest,
    provider::{ForecastSource, Notifier},
};

/// Fetch the forecast once, render the digest and send it once.
///
/// The first failure ends the run; nothing is retried. Returns the text that
/// was sent.
pub async fn dispatch_digest(
    source: &dyn ForecastSource,
    notifier: &dyn Notifier,
    request: &DigestRequest,
    now: DateTime<Utc>,
) -> Result<String> {
    let forecast = source.get(request.language, request.units).await?;

    let reference = request.reference_time(forecast.timezone.tz(), now);
    let digest = render_digest(reference, &forecast);
    info!(
        timezone = forecast.timezone.name(),
        hourly = forecast.hourly.data.len(),
        daily = forecast.daily.data.len(),
        "Rendered digest"
    );

    notifier.send(&digest).await?;
    Ok(digest)
}
