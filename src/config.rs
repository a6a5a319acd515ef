//! Client configuration, injected at startup.
//!
//! The API base URL is read once (from the environment or a CLI flag) and
//! passed into the clients by value. Nothing below this module reads the
//! environment.

use std::time::Duration;

pub const DEFAULT_MAILER_URL: &str = "https://email-api-silk.vercel.app";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Optional client-side timeouts. `None` means the request runs until the
/// transport gives up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Option<Duration>,
    pub connect: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub mailer_url: String,
    pub page_limit: u32,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for an explicit API base URL with default settings.
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_url(api_base_url),
            mailer_url: DEFAULT_MAILER_URL.to_owned(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeouts: Timeouts::default(),
        }
    }

    #[must_use]
    pub fn with_mailer_url(mut self, mailer_url: &str) -> Self {
        self.mailer_url = normalize_url(mailer_url);
        self
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `VOCAB_API_URL`
    ///
    /// Optional:
    /// - `VOCAB_MAILER_URL`: default [`DEFAULT_MAILER_URL`]
    /// - `VOCAB_PAGE_LIMIT`: default 10
    /// - `VOCAB_REQUEST_TIMEOUT_SECS`: unset means no request timeout
    /// - `VOCAB_CONNECT_TIMEOUT_SECS`: unset means no connect timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `VOCAB_API_URL` is missing or a numeric value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None)
    }

    /// Like [`Self::from_env`], but an explicit `api_base_url` takes
    /// precedence over `VOCAB_API_URL`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_env_with(api_base_url: Option<&str>) -> Result<Self, ConfigError> {
        let api_base_url = match api_base_url {
            Some(url) => url.to_owned(),
            None => env_string("VOCAB_API_URL").ok_or(ConfigError::MissingVar { var: "VOCAB_API_URL" })?,
        };
        let mailer_url = env_string("VOCAB_MAILER_URL").unwrap_or_else(|| DEFAULT_MAILER_URL.to_owned());
        let page_limit = env_parse_u32("VOCAB_PAGE_LIMIT")?.unwrap_or(DEFAULT_PAGE_LIMIT);
        if page_limit == 0 {
            return Err(ConfigError::InvalidValue { var: "VOCAB_PAGE_LIMIT", value: "0".into() });
        }
        let timeouts = Timeouts {
            request: env_parse_secs("VOCAB_REQUEST_TIMEOUT_SECS")?,
            connect: env_parse_secs("VOCAB_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self {
            api_base_url: normalize_url(&api_base_url),
            mailer_url: normalize_url(&mailer_url),
            page_limit,
            timeouts,
        })
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_string(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn env_parse_u32(key: &'static str) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = env_string(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { var: key, value: raw })
}

fn env_parse_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = env_string(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidValue { var: key, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
