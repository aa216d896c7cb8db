//! OpenAI transport trait and reqwest-based SSE implementation.

use std::pin::Pin;
use std::time::Duration;

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode, header};
use tokio_util::sync::CancellationToken;

use crate::{CompletionRequest, FinishReason, ProviderError, ProviderFuture};

use super::serde_api::{
    OpenAiApiStreamResponse, build_api_request, extract_error_message, parse_finish_reason,
};
use super::types::{OpenAiAuth, OpenAiCompletion, OpenAiStreamChunk};

pub type OpenAiChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<OpenAiStreamChunk, ProviderError>> + Send + 'a>>;

pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn stream<'a>(
        &'a self,
        request: CompletionRequest,
        auth: OpenAiAuth,
        cancel: CancellationToken,
    ) -> ProviderFuture<'a, Result<OpenAiChunkStream<'a>, ProviderError>>;
}

const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
    inactivity_timeout: Duration,
}

enum StreamStep {
    Data(String),
    Exhausted,
    TimedOut,
    Cancelled,
    Failed(String),
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.openai.com/v1".to_string(),
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_inactivity_timeout(mut self, inactivity_timeout: Duration) -> Self {
        self.inactivity_timeout = inactivity_timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("OpenAI request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => match retry_after {
                Some(hint) => ProviderError::rate_limited_after(message, hint),
                None => ProviderError::rate_limited(message),
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::transport(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn stream<'a>(
        &'a self,
        request: CompletionRequest,
        auth: OpenAiAuth,
        cancel: CancellationToken,
    ) -> ProviderFuture<'a, Result<OpenAiChunkStream<'a>, ProviderError>> {
        Box::pin(async move {
            let model_for_fallback = request.model.clone();
            let api_request = build_api_request(request)?;
            let url = self.endpoint("chat/completions");
            let response = self
                .client
                .post(url)
                .bearer_auth(auth.bearer())
                .json(&api_request)
                .send()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let inactivity_timeout = self.inactivity_timeout;
            let stream = try_stream! {
                let mut chunks = response.bytes_stream();
                let mut sse_buffer = String::new();
                let mut finished = false;
                let mut content = String::new();
                let mut model = None::<String>;
                let mut finish_reason = FinishReason::Other;

                while !finished {
                    let step = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => StreamStep::Cancelled,
                        next = tokio::time::timeout(inactivity_timeout, chunks.next()) => match next {
                            Err(_elapsed) => StreamStep::TimedOut,
                            Ok(None) => StreamStep::Exhausted,
                            Ok(Some(Err(err))) => StreamStep::Failed(err.to_string()),
                            Ok(Some(Ok(bytes))) => match std::str::from_utf8(&bytes) {
                                Ok(text) => StreamStep::Data(text.to_string()),
                                Err(err) => StreamStep::Failed(err.to_string()),
                            },
                        },
                    };

                    // Dropping out of this generator drops the response body,
                    // which closes the connection.
                    let text = match step {
                        StreamStep::Cancelled => {
                            Err(ProviderError::cancelled("completion stream cancelled by caller"))?
                        }
                        StreamStep::TimedOut => Err(ProviderError::stream_timeout(format!(
                            "no stream data within {}s",
                            inactivity_timeout.as_secs()
                        )))?,
                        StreamStep::Failed(message) => Err(ProviderError::transport(message))?,
                        StreamStep::Exhausted => break,
                        StreamStep::Data(text) => text,
                    };

                    sse_buffer.push_str(&text);

                    while let Some(newline_index) = sse_buffer.find('\n') {
                        let line = sse_buffer.drain(..=newline_index).collect::<String>();
                        let line = line.trim();

                        if !line.starts_with("data:") {
                            continue;
                        }

                        let payload = line.trim_start_matches("data:").trim();
                        if payload == "[DONE]" {
                            finished = true;
                            break;
                        }

                        let parsed: OpenAiApiStreamResponse = serde_json::from_str(payload)
                            .map_err(|err| ProviderError::transport(err.to_string()))?;

                        if model.is_none() {
                            model = Some(parsed.model.clone());
                        }

                        if let Some(choice) = parsed.choices.first() {
                            if let Some(delta) = &choice.delta.content {
                                if !delta.is_empty() {
                                    content.push_str(delta);
                                    yield OpenAiStreamChunk::TextDelta(delta.clone());
                                }
                            }

                            if choice.finish_reason.is_some() {
                                finish_reason = parse_finish_reason(choice.finish_reason.as_deref());
                            }
                        }
                    }
                }

                yield OpenAiStreamChunk::Completed(OpenAiCompletion {
                    model: model.unwrap_or(model_for_fallback),
                    content,
                    finish_reason,
                });
            };

            Ok(Box::pin(stream) as OpenAiChunkStream<'a>)
        })
    }
}
