use crate::account::Credentials;
use crate::http::DEFAULT_BASE_URL;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_string_from_number;
use std::fmt;
use std::time::Duration;

/// Connection settings for one Emma account.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. emma.yaml file (if exists)
/// 3. Environment variables with EMMA_ prefix (always wins)
#[derive(Clone, Deserialize, Serialize)]
pub struct EmmaConfig {
    /// Account id. Accepts a number, since account ids are numeric.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub account_id: String,

    /// Public API key (required, no compiled-in default).
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub public_key: String,

    /// Private API key (required, no compiled-in default).
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub private_key: String,

    /// API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmmaConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            public_key: String::new(),
            private_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EmmaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmmaConfig")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl EmmaConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("emma.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("EMMA_"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("account_id", &self.account_id),
            ("public_key", &self.public_key),
            ("private_key", &self.private_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name} is required. Set EMMA_{} environment variable or configure in emma.yaml.",
                    name.to_uppercase()
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs cannot be 0".into()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: '{}'",
                self.base_url
            )));
        }

        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.account_id, &self.public_key, &self.private_key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn valid_config() -> EmmaConfig {
        EmmaConfig {
            account_id: "100".into(),
            public_key: "public".into(),
            private_key: "private".into(),
            ..EmmaConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = EmmaConfig::default();
        assert_eq!(config.base_url, "https://api.e2ma.net");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.account_id.is_empty());
        assert!(config.private_key.is_empty());
    }

    #[test]
    fn test_validation_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_keys() {
        let mut config = valid_config();
        config.private_key = " ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("EMMA_PRIVATE_KEY"));

        let mut config = valid_config();
        config.account_id.clear();
        assert!(config.validate().unwrap_err().to_string().contains("account_id"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = valid_config();
        config.timeout_secs = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validation_rejects_non_http_base_url() {
        let mut config = valid_config();
        config.base_url = "ftp://api.e2ma.net".into();
        assert!(config.validate().unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"private\""));
    }

    #[test]
    fn test_load_reads_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "emma.yaml",
                "account_id: 1234\npublic_key: yaml-public\nprivate_key: yaml-private\n",
            )?;

            let config = EmmaConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.account_id, "1234");
            assert_eq!(config.public_key, "yaml-public");
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "emma.yaml",
                "account_id: \"1234\"\npublic_key: yaml-public\nprivate_key: yaml-private\ntimeout_secs: 5\n",
            )?;
            jail.set_env("EMMA_ACCOUNT_ID", "5678");
            jail.set_env("EMMA_TIMEOUT_SECS", "10");

            let config = EmmaConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.account_id, "5678");
            assert_eq!(config.public_key, "yaml-public");
            assert_eq!(config.timeout(), Duration::from_secs(10));
            Ok(())
        });
    }

    #[test]
    fn test_load_without_credentials_fails_validation() {
        Jail::expect_with(|_jail| {
            let err = EmmaConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            Ok(())
        });
    }

    #[test]
    fn test_credentials_carry_key_pair() {
        let credentials = valid_config().credentials();
        assert_eq!(credentials.account_id, "100");
        assert_eq!(credentials.public_key, "public");
        assert_eq!(credentials.private_key(), "private");
    }
}
