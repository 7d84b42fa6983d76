//! Error types for the stream notifier.

use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable '{var}' is missing or empty")]
    Missing { var: &'static str },
}

/// Webhook delivery errors.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord rejected webhook with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Webhook client is closed")]
    Closed,
}

/// Notification subsystem errors.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Prometheus metrics export failed: {0}")]
    Metrics(String),
}
