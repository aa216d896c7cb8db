//! Standard retry/backoff policy and operational hook contracts.

use std::future::Future;
use std::time::Duration;

use crate::ProviderError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &ProviderError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }

    /// Computed backoff for the attempt, raised to the server's retry hint
    /// when one was provided and is larger.
    pub fn delay_for_attempt(&self, attempt: u32, error: &ProviderError) -> Duration {
        let backoff = self.backoff_for_attempt(attempt);
        match error.retry_after {
            Some(hint) if hint > backoff => hint,
            _ => backoff,
        }
    }
}

pub trait OperationHooks: Send + Sync {
    fn on_attempt_start(&self, _backend: &'static str, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _backend: &'static str,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_success(&self, _backend: &'static str, _operation: &str, _attempts: u32) {}

    fn on_failure(
        &self,
        _backend: &'static str,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl OperationHooks for NoopOperationHooks {}

pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    backend: &'static str,
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn OperationHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, ProviderError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, ProviderError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(backend, operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(backend, operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    let delay = policy.delay_for_attempt(attempt, &error);
                    hooks.on_retry_scheduled(backend, operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_failure(backend, operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::{ProviderError, ProviderErrorKind};

    #[test]
    fn retry_policy_uses_retryable_flag_and_attempt_limit() {
        let policy = RetryPolicy::new(3);
        let retryable = ProviderError::transport("connection reset");
        let non_retryable = ProviderError::invalid_request("bad request");

        assert!(policy.should_retry(1, &retryable));
        assert!(policy.should_retry(2, &retryable));
        assert!(!policy.should_retry(3, &retryable));
        assert!(!policy.should_retry(1, &non_retryable));
    }

    #[test]
    fn retry_policy_backoff_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(250),
            backoff_multiplier: 2.0,
        };

        assert_eq!(policy.backoff_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_millis(250));
        assert_eq!(policy.backoff_for_attempt(4), Duration::from_millis(250));
    }

    #[test]
    fn rate_limit_hint_raises_the_delay_but_never_lowers_it() {
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
        };

        let hinted =
            ProviderError::rate_limited_after("throttled", Duration::from_secs(3));
        assert_eq!(policy.delay_for_attempt(1, &hinted), Duration::from_secs(3));

        let small_hint =
            ProviderError::rate_limited_after("throttled", Duration::from_millis(1));
        assert_eq!(
            policy.delay_for_attempt(2, &small_hint),
            Duration::from_millis(200)
        );

        let no_hint = ProviderError::transport("reset");
        assert_eq!(
            policy.delay_for_attempt(1, &no_hint),
            Duration::from_millis(100)
        );
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl OperationHooks for RecordingHooks {
        fn on_attempt_start(&self, backend: &'static str, operation: &str, attempt: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{backend}:{operation}:{attempt}"));
        }

        fn on_retry_scheduled(
            &self,
            backend: &'static str,
            operation: &str,
            attempt: u32,
            _delay: Duration,
            _error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("retry:{backend}:{operation}:{attempt}"));
        }

        fn on_success(&self, backend: &'static str, operation: &str, attempts: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{backend}:{operation}:{attempts}"));
        }

        fn on_failure(
            &self,
            backend: &'static str,
            operation: &str,
            attempts: u32,
            error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{backend}:{operation}:{attempts}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn execute_with_retry_retries_and_reports_hooks() {
        let policy = RetryPolicy::new(3);
        let hooks = RecordingHooks::default();
        let attempts = Arc::new(Mutex::new(0_u32));
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = execute_with_retry(
            "openai",
            "stream",
            &policy,
            &hooks,
            {
                let attempts = Arc::clone(&attempts);
                move |attempt| {
                    let attempts = Arc::clone(&attempts);
                    async move {
                        *attempts.lock().expect("attempts lock") = attempt;
                        if attempt < 3 {
                            Err(ProviderError::transport("temporary"))
                        } else {
                            Ok("ok")
                        }
                    }
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("result should succeed"), "ok");
        assert_eq!(*attempts.lock().expect("attempts lock"), 3);
        assert_eq!(sleeps.lock().expect("sleep lock").len(), 2);

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"success:openai:stream:3".to_string()));
    }

    #[tokio::test]
    async fn execute_with_retry_stops_on_non_retryable_error() {
        let policy = RetryPolicy::new(5);
        let hooks = RecordingHooks::default();

        let result = execute_with_retry::<(), _, _, _, _>(
            "openai",
            "stream",
            &policy,
            &hooks,
            |_| async move { Err(ProviderError::invalid_request("bad input")) },
            |_| async move {},
        )
        .await;

        let error = result.expect_err("result should fail");
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.iter().any(|item| item.contains("failure:openai:stream:1")));
    }
}
