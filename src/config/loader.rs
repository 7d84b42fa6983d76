//! Configuration loading from named-value sources.

use std::collections::HashMap;

use super::model::{NotifierConfig, DEFAULT_API_BASE_URL};
use crate::error::ConfigError;

/// Webhook token variable.
pub const ENV_TOKEN: &str = "DISCORD_TOKEN";
/// Webhook identifier variable.
pub const ENV_CHANNEL: &str = "DISCORD_CHANNEL";
/// Stream-hosting site base URL variable.
pub const ENV_STREAM_HOST_URL: &str = "STREAM_HOST_URL";
/// Optional Discord API base override.
pub const ENV_API_URL: &str = "DISCORD_API_URL";

/// A source of named configuration values.
pub trait ConfigSource {
    /// Returns the value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads values from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Loads the notifier configuration.
///
/// Variables are checked in order, and the first missing or empty one is reported.
pub fn load(source: &impl ConfigSource) -> Result<NotifierConfig, ConfigError> {
    let token = require(source, ENV_TOKEN)?;
    let channel = require(source, ENV_CHANNEL)?;
    let stream_host_url = require(source, ENV_STREAM_HOST_URL)?;

    let api_base = source
        .get(ENV_API_URL)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    Ok(NotifierConfig::new(token, channel, &stream_host_url).with_api_base_url(&api_base))
}

fn require(source: &impl ConfigSource, var: &'static str) -> Result<String, ConfigError> {
    source
        .get(var)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}
