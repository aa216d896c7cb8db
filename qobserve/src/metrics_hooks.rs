//! Metrics-based observability hooks for completion operations.
//!
//! ```rust
//! use qobserve::MetricsOperationHooks;
//! use qprovider::OperationHooks;
//!
//! fn accepts_hooks(_hooks: &dyn OperationHooks) {}
//!
//! let hooks = MetricsOperationHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use qprovider::{OperationHooks, ProviderError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsOperationHooks;

impl OperationHooks for MetricsOperationHooks {
    fn on_attempt_start(&self, backend: &'static str, operation: &str, _attempt: u32) {
        metrics::counter!(
            "quill_provider_attempt_start_total",
            "backend" => backend,
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        backend: &'static str,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "quill_provider_retry_scheduled_total",
            "backend" => backend,
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "quill_provider_retry_delay_seconds",
            "backend" => backend,
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, backend: &'static str, operation: &str, attempts: u32) {
        metrics::counter!(
            "quill_provider_success_total",
            "backend" => backend,
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "quill_provider_attempts_per_success",
            "backend" => backend,
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(
        &self,
        backend: &'static str,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "quill_provider_failure_total",
            "backend" => backend,
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "quill_provider_attempts_per_failure",
            "backend" => backend,
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}
