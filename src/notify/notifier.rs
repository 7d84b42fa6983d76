//! Stream start announcements.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::discord::{DiscordWebhookClient, WebhookExecutor, WebhookParams};
use super::format::{format_announcement, should_announce};
use super::prometheus::{
    NotifierMetrics, OUTCOME_FAILED, OUTCOME_SENT, OUTCOME_SKIPPED, OUTCOME_SUPPRESSED,
};
use crate::config::{self, ConfigSource, EnvSource, NotifierConfig};
use crate::error::DeliveryError;

/// Config and delivery handle of an enabled notifier.
struct Active {
    config: NotifierConfig,
    executor: Arc<dyn WebhookExecutor>,
}

/// Announces started streams to a Discord channel.
///
/// Whether the notifier is enabled is decided once at construction. All
/// operations are best-effort: failures are logged and counted, never
/// returned to the caller.
pub struct Notifier {
    /// `None` when disabled.
    active: Option<Active>,
    /// Set by `shutdown`.
    closed: AtomicBool,
    /// Outcome counters, if the registry could be created.
    metrics: Option<NotifierMetrics>,
}

impl Notifier {
    /// Creates a notifier from the process environment.
    pub fn from_env() -> Self {
        Self::initialize(&EnvSource)
    }

    /// Creates a notifier from a config source, using the Discord HTTP client.
    pub fn initialize(source: &impl ConfigSource) -> Self {
        Self::initialize_with(source, |config| {
            let client = DiscordWebhookClient::new(&config.api_base_url)?;
            Ok(Arc::new(client) as Arc<dyn WebhookExecutor>)
        })
    }

    /// Creates a notifier from a config source and an executor factory.
    ///
    /// A missing variable or a failing factory yields a disabled notifier.
    pub fn initialize_with<F>(source: &impl ConfigSource, factory: F) -> Self
    where
        F: FnOnce(&NotifierConfig) -> Result<Arc<dyn WebhookExecutor>, DeliveryError>,
    {
        let config = match config::load(source) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Discord support disabled");
                return Self::disabled();
            }
        };

        match factory(&config) {
            Ok(executor) => Self::with_executor(config, executor),
            Err(e) => {
                error!(error = %e, "Failed to initialize Discord, support disabled");
                Self::disabled()
            }
        }
    }

    /// Creates an enabled notifier from a resolved config and executor.
    pub fn with_executor(config: NotifierConfig, executor: Arc<dyn WebhookExecutor>) -> Self {
        info!(
            channel_id = %config.channel_id,
            stream_base_url = %config.stream_base_url,
            "Discord notifications enabled"
        );
        Self {
            active: Some(Active { config, executor }),
            closed: AtomicBool::new(false),
            metrics: new_metrics(),
        }
    }

    /// Creates a notifier that never sends anything.
    pub fn disabled() -> Self {
        Self {
            active: None,
            closed: AtomicBool::new(false),
            metrics: new_metrics(),
        }
    }

    /// Returns whether the notifier was enabled at construction.
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Returns whether `shutdown` has been called on an enabled notifier.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Returns the resolved config when enabled.
    pub fn config(&self) -> Option<&NotifierConfig> {
        self.active.as_ref().map(|a| &a.config)
    }

    /// Returns the outcome counters.
    pub fn metrics(&self) -> Option<&NotifierMetrics> {
        self.metrics.as_ref()
    }

    /// Announces that `stream_name` has started.
    ///
    /// Hidden streams (names ending in `_`) are skipped.
    pub async fn notify_stream(&self, stream_name: &str) {
        let Some(active) = self.usable() else {
            self.record(OUTCOME_SUPPRESSED);
            return;
        };

        if !should_announce(stream_name) {
            debug!(stream = stream_name, "Hidden stream, not announcing");
            self.record(OUTCOME_SKIPPED);
            return;
        }

        let message = format_announcement(stream_name, &active.config.stream_base_url);
        self.deliver(active, message).await;
    }

    /// Sends an arbitrary message to the channel.
    pub async fn send_message(&self, text: &str) {
        let Some(active) = self.usable() else {
            self.record(OUTCOME_SUPPRESSED);
            return;
        };

        self.deliver(active, text.to_string()).await;
    }

    /// Releases the delivery handle. Later sends are no-ops.
    pub fn shutdown(&self) {
        let Some(active) = &self.active else {
            return;
        };

        if !self.closed.swap(true, Ordering::AcqRel) {
            active.executor.close();
            debug!("Discord notifier closed");
        }
    }

    fn usable(&self) -> Option<&Active> {
        if self.is_closed() {
            return None;
        }
        self.active.as_ref()
    }

    async fn deliver(&self, active: &Active, content: String) {
        let params = WebhookParams::text(content);
        let result = active
            .executor
            .execute_webhook(&active.config.channel_id, &active.config.auth_token, &params)
            .await;

        match result {
            Ok(()) => {
                info!(content = %params.content, "Discord notification sent");
                self.record(OUTCOME_SENT);
            }
            Err(e) => {
                error!(error = %e, "Failed to send Discord message");
                self.record(OUTCOME_FAILED);
            }
        }
    }

    fn record(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record(outcome);
        }
    }
}

fn new_metrics() -> Option<NotifierMetrics> {
    match NotifierMetrics::new() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "Notification metrics unavailable");
            None
        }
    }
}
