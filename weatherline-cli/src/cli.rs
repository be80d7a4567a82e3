use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use weatherline_core::{
    Config, DigestRequest, dispatch_digest, forecast_source_from_settings, notifier_from_settings,
};

/// Format of the optional date argument.
const DATE_ARG_FORMAT: &str = "%Y%m%d";

const EXAMPLES: &str = "\
Examples:
  weatherline --line-token=XXXXX --forecast-token=YYYYY 20180101   # Send forecast on 2018/01/01
  weatherline --line-token=XXXXX --forecast-token=YYYYY --lang=ja  # Send forecast on today by Japanese";

/// Bad command-line input.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Too many arguments")]
    TooManyArguments,

    #[error("invalid date '{value}' (expected YYYYMMDD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherline",
    version,
    about = "Send weather forecast to LINE",
    long_about = "Get weather forecast from Forecast (Dark Sky) API and send it by LINE Notify API",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Config file; searched for in the usual places when absent.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API token for LINE Notify API.
    #[arg(short = 'L', long, visible_alias = "line-token")]
    notify_token: Option<String>,

    /// API token for Forecast (Dark Sky) API.
    #[arg(short = 'F', long)]
    forecast_token: Option<String>,

    /// Longitude.
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    longitude: Option<String>,

    /// Latitude.
    #[arg(short = 'y', long, allow_hyphen_values = true)]
    latitude: Option<String>,

    /// Language [en|ja]. Defaults to en.
    #[arg(short, long)]
    lang: Option<String>,

    /// Units [us|si]. Defaults to us.
    #[arg(short, long)]
    units: Option<String>,

    /// More log output; repeat for debug. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Date to report on, as YYYYMMDD. Defaults to today.
    #[arg(value_name = "DATE")]
    dates: Vec<String>,
}

impl Cli {
    pub fn init_logging(&self) {
        let default = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?.merge(self.overrides());
        let settings = config.settings()?;
        let date = check_args(&self.dates)?;

        let source = forecast_source_from_settings(&settings)?;
        let notifier = notifier_from_settings(&settings);
        let request = DigestRequest { language: settings.language, units: settings.units, date };

        let digest = dispatch_digest(source.as_ref(), notifier.as_ref(), &request, Utc::now()).await?;
        tracing::info!(lang = %settings.language, units = %settings.units, "Forecast sent");
        tracing::debug!(%digest, "Sent digest");

        Ok(())
    }

    /// Values given on the command line, to be layered over the config file.
    fn overrides(&self) -> Config {
        Config {
            notify_token: self.notify_token.clone(),
            forecast_token: self.forecast_token.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            lang: self.lang.clone(),
            units: self.units.clone(),
        }
    }
}

/// At most one positional argument, a `YYYYMMDD` date.
pub fn check_args(args: &[String]) -> Result<Option<NaiveDate>, UsageError> {
    match args {
        [] => Ok(None),
        [value] => NaiveDate::parse_from_str(value, DATE_ARG_FORMAT)
            .map(Some)
            .map_err(|source| UsageError::InvalidDate { value: value.clone(), source }),
        _ => Err(UsageError::TooManyArguments),
    }
}
