//! Stream notifications over Discord webhooks, with Prometheus counters.

pub mod discord;
pub mod format;
pub mod notifier;
pub mod prometheus;

pub use discord::{DiscordWebhookClient, WebhookExecutor, WebhookParams};
pub use notifier::Notifier;
pub use prometheus::NotifierMetrics;
