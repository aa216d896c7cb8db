//! OpenAI backend implementation over transport and shared models.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::{
    BoxedFragmentStream, CompletionBackend, CompletionRequest, CredentialStore, ProviderError,
    ProviderFuture, StreamFragment,
};

use super::auth::resolve_auth;
use super::transport::OpenAiTransport;

#[derive(Clone)]
pub struct OpenAiBackend {
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiBackend {
    pub fn new(credentials: Arc<CredentialStore>, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }
}

impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn stream<'a>(
        &'a self,
        request: CompletionRequest,
        cancel: CancellationToken,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_auth(&self.credentials)?;
            let mut chunks = self.transport.stream(request, auth, cancel).await?;

            let stream = try_stream! {
                while let Some(chunk) = chunks.next().await {
                    yield StreamFragment::from(chunk?);
                }
            };

            Ok(Box::pin(stream) as BoxedFragmentStream<'a>)
        })
    }
}
