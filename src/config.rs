use std::{collections::HashMap, env, str::FromStr, time::Duration};

use crate::service;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_URL_VAR: &str = "OPENAI_API_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const TIMEOUT_VAR: &str = "UPSTREAM_TIMEOUT_SECS";
pub const PORT_VAR: &str = "PORT";

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;
pub const DEFAULT_PORT: u16 = 8080;

/// Where configuration values come from.
pub trait ConfigSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Process environment. Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: Box<str> },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Box<str>,
    pub api_url: Box<str>,
    pub model: Box<str>,
    pub upstream_timeout: Duration,
    pub port: u16,
}

/// Credentials for a single outbound call.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub api_url: &'a str,
}

impl Config {
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| -> Box<str> {
            source
                .var(key)
                .unwrap_or_else(|| default.to_owned())
                .into_boxed_str()
        };

        let config = Self {
            api_key: text(API_KEY_VAR, ""),
            api_url: text(API_URL_VAR, DEFAULT_API_URL),
            model: text(MODEL_VAR, DEFAULT_MODEL),
            upstream_timeout: Duration::from_secs(parse(
                source,
                TIMEOUT_VAR,
                DEFAULT_TIMEOUT_SECS,
            )?),
            port: parse(source, PORT_VAR, DEFAULT_PORT)?,
        };

        if config.credentials().is_err() {
            tracing::warn!(
                "{} or {} is not set, chat requests will fail until it is",
                API_KEY_VAR,
                API_URL_VAR
            );
        }

        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&EnvSource)
    }

    /// Checked on every request; a missing key or URL never reaches the network.
    pub fn credentials(&self) -> service::Result<Credentials<'_>> {
        if self.api_key.is_empty() || self.api_url.is_empty() {
            return Err(service::Error::Configuration);
        }

        Ok(Credentials {
            api_key: &self.api_key,
            api_url: &self.api_url,
        })
    }
}

fn parse<T: FromStr>(
    source: &impl ConfigSource,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match source.var(key) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                key,
                value: value.into(),
            })
        }
        _ => Ok(default),
    }
}
