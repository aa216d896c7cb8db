//! OpenAI HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, FinishReason, ProviderError, RequestParams, Role};

pub(crate) fn build_api_request(
    request: CompletionRequest,
) -> Result<OpenAiApiRequest, ProviderError> {
    let messages = request
        .messages
        .into_iter()
        .map(OpenAiApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    if messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "OpenAI request requires at least one message",
        ));
    }

    // Exactly one bound field serializes; reasoning models reject both
    // `max_tokens` and `temperature`.
    let (max_tokens, max_completion_tokens, temperature) = match request.params {
        RequestParams::General {
            max_tokens,
            temperature,
        } => (Some(max_tokens), None, Some(temperature)),
        RequestParams::Reasoning {
            max_completion_tokens,
        } => (None, Some(max_completion_tokens), None),
    };

    Ok(OpenAiApiRequest {
        model: request.model,
        messages,
        temperature,
        max_tokens,
        max_completion_tokens,
        stream: true,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> FinishReason {
    match value {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("cancelled") => FinishReason::Cancelled,
        _ => FinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<OpenAiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiErrorEnvelope {
    pub error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiRequest {
    pub model: String,
    pub messages: Vec<OpenAiApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiMessage {
    pub role: String,
    pub content: String,
}

impl TryFrom<crate::Message> for OpenAiApiMessage {
    type Error = ProviderError;

    fn try_from(value: crate::Message) -> Result<Self, Self::Error> {
        if value.content.trim().is_empty() && value.role != Role::Assistant {
            return Err(ProviderError::invalid_request(
                "OpenAI message content must not be empty",
            ));
        }

        Ok(Self {
            role: value.role.as_str().to_string(),
            content: value.content,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiStreamResponse {
    pub model: String,
    pub choices: Vec<OpenAiApiStreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiStreamChoice {
    pub delta: OpenAiApiStreamDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiStreamDelta {
    pub content: Option<String>,
}
