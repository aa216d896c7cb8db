//! Convenience re-exports for facade consumers.

pub use crate::{
    Assistant, CancellationToken, ChatError, ChatErrorKind, ChatMessage, DocumentStream,
    DocumentSynthesizer, Message, ModelCatalog, ParameterPolicy, ProviderError, ProviderErrorKind,
    RequestParams, RetryPolicy, Role, Session, SessionController, SessionId, StreamingClient,
    TurnStream,
};

#[cfg(feature = "backend-openai")]
pub use crate::{AssistantConfig, build_assistant, build_assistant_with_config};
