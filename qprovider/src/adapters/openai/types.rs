//! OpenAI adapter types and conversions to the shared stream contract.

use std::fmt::Formatter;

use crate::{CompletionSummary, FinishReason, SecretString, StreamFragment};

pub struct OpenAiAuth {
    bearer: SecretString,
}

impl OpenAiAuth {
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            bearer: SecretString::new(bearer),
        }
    }

    pub fn bearer(&self) -> &str {
        self.bearer.expose()
    }
}

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenAiAuth([REDACTED])")
    }
}

/// Terminal chunk summarizing one finished streaming response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCompletion {
    pub model: String,
    pub content: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAiStreamChunk {
    TextDelta(String),
    Completed(OpenAiCompletion),
}

impl From<OpenAiStreamChunk> for StreamFragment {
    fn from(value: OpenAiStreamChunk) -> Self {
        match value {
            OpenAiStreamChunk::TextDelta(delta) => Self::Delta(delta),
            OpenAiStreamChunk::Completed(completion) => Self::Completed(CompletionSummary {
                model: completion.model,
                content: completion.content,
                finish_reason: completion.finish_reason,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_debug_is_redacted() {
        let auth = OpenAiAuth::new("sk-live-123");
        assert_eq!(format!("{auth:?}"), "OpenAiAuth([REDACTED])");
        assert_eq!(auth.bearer(), "sk-live-123");
    }

    #[test]
    fn chunks_convert_to_stream_fragments() {
        let delta: StreamFragment = OpenAiStreamChunk::TextDelta("hi".to_string()).into();
        assert_eq!(delta, StreamFragment::Delta("hi".to_string()));

        let done: StreamFragment = OpenAiStreamChunk::Completed(OpenAiCompletion {
            model: "gpt-4".to_string(),
            content: "hi".to_string(),
            finish_reason: FinishReason::Stop,
        })
        .into();
        assert!(done.is_final());
    }
}
