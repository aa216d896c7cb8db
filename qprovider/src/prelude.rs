//! Convenience re-exports for qprovider consumers.

pub use crate::{
    BoxedFragmentStream, CompletionBackend, CompletionRequest, CompletionSummary, CredentialStore,
    FinishReason, FragmentStream, Message, ModelCatalog, ModelProfile, NoopOperationHooks,
    OperationHooks, ParamShape, ParameterPolicy, ProviderError, ProviderErrorKind, ProviderFuture,
    RequestParams, RetryPolicy, Role, SecretString, StreamFragment, StreamingClient,
    VecFragmentStream, execute_with_retry,
};
