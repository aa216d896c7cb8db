//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use qprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    InvalidModel,
    RateLimited,
    StreamTimeout,
    Transport,
    Cancelled,
    Session,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidModel, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Cancelled, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Session, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ChatErrorKind::Cancelled
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let kind = match value.kind {
            ProviderErrorKind::InvalidRequest => ChatErrorKind::InvalidRequest,
            ProviderErrorKind::InvalidModel => ChatErrorKind::InvalidModel,
            ProviderErrorKind::RateLimited => ChatErrorKind::RateLimited,
            ProviderErrorKind::StreamTimeout => ChatErrorKind::StreamTimeout,
            ProviderErrorKind::Transport | ProviderErrorKind::Unavailable => {
                ChatErrorKind::Transport
            }
            ProviderErrorKind::Cancelled => ChatErrorKind::Cancelled,
            ProviderErrorKind::Authentication | ProviderErrorKind::Other => ChatErrorKind::Provider,
        };

        ChatError::new(kind, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_classification() {
        let cases = [
            (ProviderError::invalid_model("x"), ChatErrorKind::InvalidModel),
            (ProviderError::rate_limited("x"), ChatErrorKind::RateLimited),
            (ProviderError::stream_timeout("x"), ChatErrorKind::StreamTimeout),
            (ProviderError::transport("x"), ChatErrorKind::Transport),
            (ProviderError::unavailable("x"), ChatErrorKind::Transport),
            (ProviderError::cancelled("x"), ChatErrorKind::Cancelled),
            (ProviderError::authentication("x"), ChatErrorKind::Provider),
        ];

        for (provider_error, expected) in cases {
            let chat_error = ChatError::from(provider_error);
            assert_eq!(chat_error.kind, expected);
        }
    }
}
