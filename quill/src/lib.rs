//! Unified facade over the quill workspace crates.
//!
//! This crate is designed to be the single dependency for most embedders.
//! It re-exports the core quill crates and provides the assistant surface a
//! presentation layer drives: session lifecycle, streaming chat turns,
//! model switching, and document synthesis.

mod assistant;
mod macros;

pub mod prelude;
pub mod util;

pub use qchat;
pub use qcommon;
pub use qdoc;
pub use qobserve;
pub use qprovider;

pub use qchat::{
    ADVISOR_SYSTEM_PROMPT, ChatError, ChatErrorKind, ChatMessage, GREETING_REQUEST,
    GREETING_SYSTEM_PROMPT, GenerationPermit, Session, SessionController, TurnStream,
};
pub use qcommon::{BoxFuture, SessionId};
pub use qdoc::{
    DocumentStream, DocumentSynthesizer, EXEMPLAR_COUNT, build_synthesis_messages,
    exemplar_messages,
};
pub use qobserve::{MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks};
pub use qprovider::{
    BoxedFragmentStream, COMPLETION_TOKEN_BOUND, CompletionBackend, CompletionRequest,
    CompletionSummary, CredentialStore, DETERMINISTIC_TEMPERATURE, FinishReason, FragmentStream,
    Message, ModelCatalog, ModelProfile, NoopOperationHooks, OperationHooks, ParamShape,
    ParameterPolicy, ProviderError, ProviderErrorKind, ProviderFuture, RequestParams, RetryPolicy,
    Role, SecretString, StreamFragment, StreamingClient, VecFragmentStream, execute_with_retry,
};
pub use tokio_util::sync::CancellationToken;

pub use assistant::Assistant;
#[cfg(feature = "backend-openai")]
pub use assistant::{AssistantConfig, build_assistant, build_assistant_with_config};

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn ql_msg_macro_creates_expected_message() {
        let message = crate::ql_msg!(user => "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn ql_messages_macro_builds_message_vector() {
        let messages = crate::ql_messages![
            system => "You are concise.",
            user => "Draft the login requirement",
        ];

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }
}
