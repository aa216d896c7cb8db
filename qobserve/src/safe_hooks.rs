use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use qprovider::{OperationHooks, ProviderError};

/// Isolates the streaming pipeline from a panicking hook implementation.
pub struct SafeOperationHooks<H> {
    inner: H,
}

impl<H> SafeOperationHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> OperationHooks for SafeOperationHooks<H>
where
    H: OperationHooks,
{
    fn on_attempt_start(&self, backend: &'static str, operation: &str, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(backend, operation, attempt)
        }));
    }

    fn on_retry_scheduled(
        &self,
        backend: &'static str,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_retry_scheduled(backend, operation, attempt, delay, error)
        }));
    }

    fn on_success(&self, backend: &'static str, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(backend, operation, attempts)
        }));
    }

    fn on_failure(
        &self,
        backend: &'static str,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(backend, operation, attempts, error)
        }));
    }
}
