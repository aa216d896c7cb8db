//! Retry-wrapped streaming entry point over a completion backend.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    BoxedFragmentStream, CompletionBackend, CompletionRequest, NoopOperationHooks, OperationHooks,
    ProviderError, RetryPolicy, execute_with_retry,
};

/// Opens streaming completion requests, retrying the open phase on
/// transient failures. Fragments already flowing are never retried; a
/// mid-stream error terminates that stream.
#[derive(Clone)]
pub struct StreamingClient {
    backend: Arc<dyn CompletionBackend>,
    retry: RetryPolicy,
    hooks: Arc<dyn OperationHooks>,
}

impl StreamingClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            retry: RetryPolicy::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn OperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn open(
        &self,
        request: CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<BoxedFragmentStream<'_>, ProviderError> {
        request.validate()?;

        execute_with_retry(
            self.backend.name(),
            "stream",
            &self.retry,
            &*self.hooks,
            |_attempt| {
                let request = request.clone();
                let cancel = cancel.clone();
                async move {
                    // A cancellation that lands between attempts must not
                    // trigger another dispatch.
                    if cancel.is_cancelled() {
                        return Err(ProviderError::cancelled(
                            "request cancelled before dispatch",
                        ));
                    }

                    self.backend.stream(request, cancel).await
                }
            },
            |delay| tokio::time::sleep(delay),
        )
        .await
    }
}
