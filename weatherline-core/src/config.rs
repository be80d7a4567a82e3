use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::enums::{Language, UnitSystem};

/// File name looked up in each search directory.
pub const CONFIG_FILE_NAME: &str = "weatherline.toml";

const DEFAULT_LANG: &str = "en";
const DEFAULT_UNITS: &str = "us";

/// Settings from a config file or the command line. Every field is optional
/// here; [`Config::settings`] checks the required ones.
///
/// Example TOML:
/// ```toml
/// notify-token = "..."
/// forecast-token = "..."
/// latitude = 35.6895
/// longitude = "139.6917"
/// lang = "ja"
/// units = "si"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(alias = "line-token")]
    pub notify_token: Option<String>,
    pub forecast_token: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub longitude: Option<String>,
    pub lang: Option<String>,
    pub units: Option<String>,
}

/// Validated settings needed for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub notify_token: String,
    pub forecast_token: String,
    pub latitude: String,
    pub longitude: String,
    pub language: Language,
    pub units: UnitSystem,
}

/// Required settings that were absent or empty, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required setting(s) [{}] not set", quoted(.0))]
pub struct MissingSettings(pub Vec<&'static str>);

fn quoted(names: &[&'static str]) -> String {
    names.iter().map(|n| format!("\"{n}\"")).collect::<Vec<_>>().join(",")
}

impl Config {
    /// Load from `path` when given, otherwise from the first file found by
    /// [`Config::search_paths`]. No file at all yields an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(found) => {
                tracing::debug!(path = %found.display(), "Using config file");
                Self::load_from(&found)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Candidate config files in priority order: the working directory, the
    /// executable's directory, then the platform config directory.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(dirs) = ProjectDirs::from("dev", "weatherline", "weatherline") {
            paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        paths
    }

    /// Layer `overrides` on top of `self`; a value set in `overrides` wins.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            notify_token: overrides.notify_token.or(self.notify_token),
            forecast_token: overrides.forecast_token.or(self.forecast_token),
            latitude: overrides.latitude.or(self.latitude),
            longitude: overrides.longitude.or(self.longitude),
            lang: overrides.lang.or(self.lang),
            units: overrides.units.or(self.units),
        }
    }

    /// Check that every required value is present and non-empty.
    ///
    /// Language and units fall back to `en`/`us` when unset. Values outside
    /// the known tables are kept as `Unknown` rather than rejected.
    pub fn settings(&self) -> Result<Settings, MissingSettings> {
        let required = [
            ("notify-token", &self.notify_token),
            ("forecast-token", &self.forecast_token),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(MissingSettings(missing));
        }

        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(Settings {
            notify_token: value(&self.notify_token),
            forecast_token: value(&self.forecast_token),
            latitude: value(&self.latitude),
            longitude: value(&self.longitude),
            language: Language::from_token(self.lang.as_deref().unwrap_or(DEFAULT_LANG)),
            units: UnitSystem::from_token(self.units.as_deref().unwrap_or(DEFAULT_UNITS)),
        })
    }
}

/// Coordinates may be written as TOML strings or numbers.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
