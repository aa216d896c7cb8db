//! Tracing-based observability hooks for completion operations.
//!
//! ```rust
//! use qobserve::TracingOperationHooks;
//! use qprovider::OperationHooks;
//!
//! fn accepts_hooks(_hooks: &dyn OperationHooks) {}
//!
//! let hooks = TracingOperationHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use qprovider::{OperationHooks, ProviderError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOperationHooks;

impl OperationHooks for TracingOperationHooks {
    fn on_attempt_start(&self, backend: &'static str, operation: &str, attempt: u32) {
        tracing::info!(
            phase = "provider",
            event = "attempt_start",
            backend,
            operation,
            attempt
        );
    }

    fn on_retry_scheduled(
        &self,
        backend: &'static str,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        tracing::warn!(
            phase = "provider",
            event = "retry_scheduled",
            backend,
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_success(&self, backend: &'static str, operation: &str, attempts: u32) {
        tracing::info!(
            phase = "provider",
            event = "success",
            backend,
            operation,
            attempts
        );
    }

    fn on_failure(
        &self,
        backend: &'static str,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            backend,
            operation,
            attempts,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}
