//! Configuration data structures.

use serde::{Serialize, Serializer};

/// Default Discord REST API base.
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

/// Resolved notifier configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Webhook token.
    #[serde(serialize_with = "redact")]
    pub auth_token: String,

    /// Webhook (channel) identifier.
    pub channel_id: String,

    /// Base URL of the stream-hosting site, always ending in `/`.
    pub stream_base_url: String,

    /// Discord API base, without trailing slash.
    pub api_base_url: String,
}

impl NotifierConfig {
    /// Creates a config, normalizing the stream base URL.
    pub fn new(
        auth_token: impl Into<String>,
        channel_id: impl Into<String>,
        stream_base_url: &str,
    ) -> Self {
        Self {
            auth_token: auth_token.into(),
            channel_id: channel_id.into(),
            stream_base_url: normalize_base_url(stream_base_url),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Overrides the Discord API base.
    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = api_base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Appends a trailing `/` unless one is already present.
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

fn redact<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}
