//! Assistant surface consumed by the presentation layer.

use qchat::{ChatError, ChatMessage, Session, SessionController, TurnStream};
use qdoc::{DocumentStream, DocumentSynthesizer};
use qprovider::StreamingClient;
use tokio_util::sync::CancellationToken;

/// One assistant instance: a session controller and a document synthesizer
/// sharing the same streaming client.
pub struct Assistant {
    controller: SessionController,
    synthesizer: DocumentSynthesizer,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant").finish_non_exhaustive()
    }
}

impl Assistant {
    pub fn new(client: StreamingClient) -> Self {
        Self {
            controller: SessionController::new(client.clone()),
            synthesizer: DocumentSynthesizer::new(client),
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn synthesizer(&self) -> &DocumentSynthesizer {
        &self.synthesizer
    }

    pub fn list_models(&self) -> Vec<&'static str> {
        self.controller.list_models()
    }

    pub fn start_session(&self) -> Session {
        self.controller.start_session()
    }

    pub fn change_model(&self, session: &Session, model_id: &str) -> Result<(), ChatError> {
        self.controller.change_model(session, model_id)
    }

    pub fn history(&self, session: &Session) -> Result<Vec<ChatMessage>, ChatError> {
        self.controller.history(session)
    }

    pub fn send_message<'a>(
        &'a self,
        session: &Session,
        text: impl Into<String>,
        cancel: CancellationToken,
    ) -> Result<TurnStream<'a>, ChatError> {
        self.controller.send_message(session, text, cancel)
    }

    pub fn open_conversation<'a>(
        &'a self,
        session: &Session,
        cancel: CancellationToken,
    ) -> Result<TurnStream<'a>, ChatError> {
        self.controller.open_conversation(session, cancel)
    }

    pub fn synthesize_document<'a>(
        &'a self,
        session: &Session,
        cancel: CancellationToken,
    ) -> Result<DocumentStream<'a>, ChatError> {
        self.synthesizer.synthesize(session, cancel)
    }
}

#[cfg(feature = "backend-openai")]
pub use openai_build::{AssistantConfig, build_assistant, build_assistant_with_config};

#[cfg(feature = "backend-openai")]
mod openai_build {
    use std::sync::Arc;
    use std::time::Duration;

    use qobserve::{SafeOperationHooks, TracingOperationHooks};
    use qprovider::adapters::openai::{OpenAiBackend, OpenAiHttpTransport};
    use qprovider::{
        CredentialStore, OperationHooks, ProviderError, RetryPolicy, StreamingClient,
    };
    use reqwest::Client;

    use super::Assistant;

    pub struct AssistantConfig {
        api_key: String,
        base_url: Option<String>,
        connect_timeout: Duration,
        inactivity_timeout: Duration,
        retry: RetryPolicy,
        hooks: Arc<dyn OperationHooks>,
    }

    impl AssistantConfig {
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                api_key: api_key.into(),
                base_url: None,
                connect_timeout: Duration::from_secs(10),
                inactivity_timeout: Duration::from_secs(30),
                retry: RetryPolicy::default(),
                hooks: Arc::new(SafeOperationHooks::new(TracingOperationHooks)),
            }
        }

        /// Points the assistant at a self-hosted OpenAI-compatible gateway.
        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = Some(base_url.into());
            self
        }

        pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
            self.connect_timeout = connect_timeout;
            self
        }

        pub fn with_inactivity_timeout(mut self, inactivity_timeout: Duration) -> Self {
            self.inactivity_timeout = inactivity_timeout;
            self
        }

        pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
            self.retry = retry;
            self
        }

        pub fn with_hooks(mut self, hooks: Arc<dyn OperationHooks>) -> Self {
            self.hooks = hooks;
            self
        }
    }

    pub fn build_assistant(api_key: impl Into<String>) -> Result<Assistant, ProviderError> {
        build_assistant_with_config(AssistantConfig::new(api_key))
    }

    pub fn build_assistant_with_config(
        config: AssistantConfig,
    ) -> Result<Assistant, ProviderError> {
        let api_key = config.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ProviderError::authentication("API key must not be empty"));
        }

        let credentials = Arc::new(CredentialStore::new());
        credentials.set_openai_api_key(api_key)?;

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        let mut transport =
            OpenAiHttpTransport::new(http).with_inactivity_timeout(config.inactivity_timeout);
        if let Some(base_url) = config.base_url {
            transport = transport.with_base_url(base_url);
        }

        let backend = Arc::new(OpenAiBackend::new(credentials, Arc::new(transport)));
        let client = StreamingClient::new(backend)
            .with_retry_policy(config.retry)
            .with_hooks(config.hooks);

        Ok(Assistant::new(client))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures_util::StreamExt;
    use qprovider::{
        BoxedFragmentStream, CompletionBackend, CompletionRequest, CompletionSummary,
        FinishReason, ProviderError, ProviderFuture, StreamFragment, StreamingClient,
        VecFragmentStream,
    };
    use tokio_util::sync::CancellationToken;

    use super::*;

    #[derive(Debug)]
    struct EchoBackend;

    impl CompletionBackend for EchoBackend {
        fn name(&self) -> &'static str {
            "openai"
        }

        fn stream<'a>(
            &'a self,
            request: CompletionRequest,
            _cancel: CancellationToken,
        ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>> {
            Box::pin(async move {
                let stream = VecFragmentStream::new(vec![
                    Ok(StreamFragment::Delta("reply".to_string())),
                    Ok(StreamFragment::Completed(CompletionSummary {
                        model: request.model,
                        content: "reply".to_string(),
                        finish_reason: FinishReason::Stop,
                    })),
                ]);

                Ok(Box::pin(stream) as BoxedFragmentStream<'a>)
            })
        }
    }

    fn assistant() -> Assistant {
        Assistant::new(StreamingClient::new(Arc::new(EchoBackend)))
    }

    #[test]
    fn list_models_matches_the_catalog() {
        assert_eq!(
            assistant().list_models(),
            vec!["chatgpt-4o-latest", "gpt-4", "o1", "o3-mini"]
        );
    }

    #[tokio::test]
    async fn chat_and_synthesis_share_one_session() {
        let assistant = assistant();
        let session = assistant.start_session();

        let mut stream = assistant
            .send_message(&session, "build a wiki", CancellationToken::new())
            .expect("turn should start");
        while stream.next().await.is_some() {}
        drop(stream);
        assert_eq!(assistant.history(&session).expect("state readable").len(), 2);

        let mut doc = assistant
            .synthesize_document(&session, CancellationToken::new())
            .expect("synthesis should start");
        let mut text = String::new();
        while let Some(delta) = doc.next().await {
            text.push_str(&delta.expect("delta ok"));
        }
        drop(doc);

        assert_eq!(text, "reply");
        assert_eq!(assistant.history(&session).expect("state readable").len(), 2);
        assert!(!session.is_busy().expect("state readable"));
    }

    #[cfg(feature = "backend-openai")]
    #[test]
    fn build_assistant_rejects_blank_and_malformed_keys() {
        let error = build_assistant("   ").expect_err("blank key must fail");
        assert_eq!(error.kind, qprovider::ProviderErrorKind::Authentication);

        let error = build_assistant("not-an-openai-key").expect_err("prefix check must fail");
        assert_eq!(error.kind, qprovider::ProviderErrorKind::Authentication);

        assert!(build_assistant("sk-test-123").is_ok());
    }
}
