//! Request and message model types shared by every backend.
//!
//! ```rust
//! use qprovider::{CompletionRequest, Message, ParameterPolicy, ProviderErrorKind, Role};
//!
//! let params = ParameterPolicy::resolve("gpt-4").expect("known model");
//! let ok = CompletionRequest::new(
//!     "gpt-4",
//!     vec![Message::new(Role::User, "Draft a login requirement")],
//!     params,
//! );
//! assert!(ok.validate().is_ok());
//! ```

use crate::{ProviderError, RequestParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Cancelled,
    Other,
}

/// One invocation of the remote completion service.
///
/// The parameter shape is always policy-resolved, never free-form, so a
/// request can only carry fields its model family accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub params: RequestParams,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>, params: RequestParams) -> Self {
        Self {
            model: model.into(),
            messages,
            params,
        }
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterPolicy, ProviderErrorKind};

    #[test]
    fn role_strings_are_stable() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn validate_enforces_request_contract() {
        let params = ParameterPolicy::resolve("gpt-4").expect("known model");

        let empty_model =
            CompletionRequest::new("   ", vec![Message::new(Role::User, "hi")], params.clone());
        let err = empty_model.validate().expect_err("empty model must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let empty_messages = CompletionRequest::new("gpt-4", Vec::new(), params.clone());
        let err = empty_messages
            .validate()
            .expect_err("empty messages must fail");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);

        let valid =
            CompletionRequest::new("gpt-4", vec![Message::new(Role::User, "hi")], params);
        assert!(valid.validate().is_ok());
    }
}
