//! Prometheus metrics for stream notifications.

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::error::NotificationError;

/// Outcome label for a delivered notification.
pub const OUTCOME_SENT: &str = "sent";
/// Outcome label for a failed delivery.
pub const OUTCOME_FAILED: &str = "failed";
/// Outcome label for a hidden stream.
pub const OUTCOME_SKIPPED: &str = "skipped";
/// Outcome label for a call made while disabled or closed.
pub const OUTCOME_SUPPRESSED: &str = "suppressed";

/// Prometheus metrics for the notifier.
pub struct NotifierMetrics {
    /// Registry for all metrics.
    registry: Registry,
    /// Notifications by outcome.
    notifications_total: CounterVec,
}

impl NotifierMetrics {
    /// Creates a new metrics instance with its own registry.
    pub fn new() -> Result<Self, NotificationError> {
        let registry = Registry::new();

        let notifications_total = CounterVec::new(
            Opts::new(
                "stream_notifications_total",
                "Stream notifications by outcome",
            ),
            &["outcome"],
        )
        .map_err(|e| NotificationError::Metrics(e.to_string()))?;

        registry
            .register(Box::new(notifications_total.clone()))
            .map_err(|e| NotificationError::Metrics(e.to_string()))?;

        Ok(Self {
            registry,
            notifications_total,
        })
    }

    /// Records a notification outcome.
    pub fn record(&self, outcome: &str) {
        self.notifications_total.with_label_values(&[outcome]).inc();
    }

    /// Returns the current count for an outcome.
    pub fn count(&self, outcome: &str) -> u64 {
        self.notifications_total.with_label_values(&[outcome]).get() as u64
    }

    /// Returns the metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, NotificationError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| NotificationError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| NotificationError::Metrics(e.to_string()))
    }
}
