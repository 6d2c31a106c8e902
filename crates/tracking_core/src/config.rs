use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Credentials for one carrier account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarrierCredentials {
    pub api_key: String,
    pub password: String,
    pub account_number: String,
    /// Override for the carrier API origin, mainly for test servers.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Host-side carrier configuration, loaded from TOML:
///
/// ```toml
/// [carriers.auspost]
/// api_key = "..."
/// password = "..."
/// account_number = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub carriers: BTreeMap<String, CarrierCredentials>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse carrier config")]
    Parse(#[from] toml::de::Error),
}

impl TrackingConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn carrier(&self, name: &str) -> Option<&CarrierCredentials> {
        self.carriers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_carrier_sections() {
        let config = TrackingConfig::from_toml_str(
            r#"
            [carriers.auspost]
            api_key = "abcdefg"
            password = "test"
            account_number = "abc123"

            [carriers.startrack]
            api_key = "k"
            password = "p"
            account_number = "n"
            base_url = "https://stage.example.test"
            "#,
        )
        .unwrap();

        let auspost = config.carrier("auspost").unwrap();
        assert_eq!(auspost.api_key, "abcdefg");
        assert_eq!(auspost.base_url, None);

        let startrack = config.carrier("startrack").unwrap();
        assert_eq!(
            startrack.base_url.as_deref(),
            Some("https://stage.example.test")
        );
    }

    #[test]
    fn empty_config_has_no_carriers() {
        let config = TrackingConfig::from_toml_str("").unwrap();
        assert!(config.carriers.is_empty());
        assert!(config.carrier("auspost").is_none());
    }

    #[test]
    fn missing_fields_are_a_parse_error() {
        let err = TrackingConfig::from_toml_str(
            r#"
            [carriers.auspost]
            api_key = "abcdefg"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
