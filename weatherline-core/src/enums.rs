//! Categorical values exchanged with the forecast API.
//!
//! Every conversion from a wire token is total: tokens outside the fixed
//! tables map to the `Unknown` variant instead of failing.

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Value of the `lang` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Unknown,
    English,
    Japanese,
}

impl Language {
    pub fn from_token(token: &str) -> Self {
        match token {
            "en" => Language::English,
            "ja" => Language::Japanese,
            _ => Language::Unknown,
        }
    }

    /// Wire token, or `""` for [`Language::Unknown`].
    pub fn as_token(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Unknown => "",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::English, Language::Japanese]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Language::English => "en (English)",
            Language::Japanese => "ja (Japanese)",
            Language::Unknown => "?? (Unknown)",
        })
    }
}

impl From<&str> for Language {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

/// Value of the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Unknown,
    Imperial,
    Si,
}

impl UnitSystem {
    pub fn from_token(token: &str) -> Self {
        match token {
            "us" => UnitSystem::Imperial,
            "si" => UnitSystem::Si,
            _ => UnitSystem::Unknown,
        }
    }

    /// Wire token, or `""` for [`UnitSystem::Unknown`].
    pub fn as_token(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "us",
            UnitSystem::Si => "si",
            UnitSystem::Unknown => "",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Imperial, UnitSystem::Si]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnitSystem::Imperial => "us (Imperial units)",
            UnitSystem::Si => "si (SI units)",
            UnitSystem::Unknown => "?? (Unknown)",
        })
    }
}

impl From<&str> for UnitSystem {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

/// The `icon` field of a data point or data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCondition {
    #[default]
    Unknown,
    ClearDay,
    ClearNight,
    Rain,
    Snow,
    Sleet,
    Wind,
    Fog,
    Cloudy,
    PartlyCloudyDay,
    PartlyCloudyNight,
}

const CONDITIONS: &[(&str, WeatherCondition)] = &[
    ("clear-day", WeatherCondition::ClearDay),
    ("clear-night", WeatherCondition::ClearNight),
    ("rain", WeatherCondition::Rain),
    ("snow", WeatherCondition::Snow),
    ("sleet", WeatherCondition::Sleet),
    ("wind", WeatherCondition::Wind),
    ("fog", WeatherCondition::Fog),
    ("cloudy", WeatherCondition::Cloudy),
    ("partly-cloudy-day", WeatherCondition::PartlyCloudyDay),
    ("partly-cloudy-night", WeatherCondition::PartlyCloudyNight),
];

impl WeatherCondition {
    pub fn from_token(token: &str) -> Self {
        CONDITIONS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, c)| *c)
            .unwrap_or(WeatherCondition::Unknown)
    }

    pub fn as_token(&self) -> &'static str {
        CONDITIONS
            .iter()
            .find(|(_, c)| c == self)
            .map(|(t, _)| *t)
            .unwrap_or("")
    }

    /// Decode a raw JSON value. Unrecognised strings become `Unknown`; a
    /// value that is not a string at all is a decode error.
    pub fn decode(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::decode("weather condition", e))
    }
}

impl<'de> Deserialize<'de> for WeatherCondition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_token_roundtrip() {
        for lang in Language::all() {
            assert_eq!(Language::from_token(lang.as_token()), *lang);
        }
        assert_eq!(Language::from_token("en").as_token(), "en");
        assert_eq!(Language::from_token("ja").as_token(), "ja");
    }

    #[test]
    fn unit_system_token_roundtrip() {
        for units in UnitSystem::all() {
            assert_eq!(UnitSystem::from_token(units.as_token()), *units);
        }
        assert_eq!(UnitSystem::from_token("si").as_token(), "si");
    }

    #[test]
    fn unknown_tokens_fall_back() {
        assert_eq!(Language::from_token("fr"), Language::Unknown);
        assert_eq!(Language::from_token(""), Language::Unknown);
        assert_eq!(UnitSystem::from_token("ca"), UnitSystem::Unknown);
        assert_eq!(Language::Unknown.as_token(), "");
        assert_eq!(UnitSystem::Unknown.as_token(), "");
    }

    #[test]
    fn display_names() {
        assert_eq!(Language::Japanese.to_string(), "ja (Japanese)");
        assert_eq!(UnitSystem::Imperial.to_string(), "us (Imperial units)");
        assert_eq!(UnitSystem::Unknown.to_string(), "?? (Unknown)");
    }

    #[test]
    fn condition_table_is_total() {
        for (token, condition) in CONDITIONS {
            assert_eq!(WeatherCondition::from_token(token), *condition);
            assert_eq!(condition.as_token(), *token);
            assert_eq!(WeatherCondition::decode(&json!(token)).unwrap(), *condition);
        }
        assert_eq!(WeatherCondition::Unknown.as_token(), "");
    }

    #[test]
    fn unrecognised_condition_is_unknown() {
        assert_eq!(WeatherCondition::decode(&json!("hail")).unwrap(), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::decode(&json!("")).unwrap(), WeatherCondition::Unknown);
    }

    #[test]
    fn non_string_condition_is_decode_error() {
        for value in [json!(1), json!(true), json!(null), json!(["rain"]), json!({"icon": "rain"})] {
            let err = WeatherCondition::decode(&value).unwrap_err();
            assert!(matches!(err, Error::Decode { .. }), "{value} gave {err:?}");
        }
    }
}
