use crate::models::query::{LimitOption, OptionError, SearchField};
use crate::services::catalog::DEFAULT_CATALOG_URL;
use crate::services::controller::{ControllerOptions, DEFAULT_DEBOUNCE};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 7004;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value}")]
    Number { name: &'static str, value: String },
    #[error("{name}: {source}")]
    InvalidOption {
        name: &'static str,
        #[source]
        source: OptionError,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub catalog_url: String,
    pub debounce: Duration,
    pub request_timeout: Option<Duration>,
    pub default_limit: LimitOption,
    pub default_field: SearchField,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            default_limit: LimitOption::default(),
            default_field: SearchField::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(port) = lookup("PORT") {
            settings.port = parse_number("PORT", &port)?;
        }
        if let Some(url) = lookup("CATALOG_URL").filter(|u| !u.trim().is_empty()) {
            settings.catalog_url = url.trim().to_string();
        }
        if let Some(ms) = lookup("DEBOUNCE_MS") {
            settings.debounce = Duration::from_millis(parse_number("DEBOUNCE_MS", &ms)?);
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_number("REQUEST_TIMEOUT_SECS", &secs)?;
            settings.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(limit) = lookup("DEFAULT_LIMIT") {
            settings.default_limit = limit.parse().map_err(|source| ConfigError::InvalidOption {
                name: "DEFAULT_LIMIT",
                source,
            })?;
        }
        if let Some(field) = lookup("DEFAULT_FIELD") {
            settings.default_field = field.parse().map_err(|source| ConfigError::InvalidOption {
                name: "DEFAULT_FIELD",
                source,
            })?;
        }

        Ok(settings)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            debounce: self.debounce,
            initial_limit: self.default_limit,
            initial_field: self.default_field,
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Number {
        name,
        value: value.to_string(),
    })
}
