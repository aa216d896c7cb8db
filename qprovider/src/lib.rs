//! Client library for the remote completion service: model catalog,
//! per-model request parameters, and resilient streaming.

mod backend;
mod catalog;
mod client;
mod credentials;
mod error;
mod model;
mod params;
mod resilience;
mod stream;

pub mod prelude;

pub use backend::{CompletionBackend, ProviderFuture};
pub use catalog::{ModelCatalog, ModelProfile};
pub use client::StreamingClient;
pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{CompletionRequest, FinishReason, Message, Role};
pub use params::{
    COMPLETION_TOKEN_BOUND, DETERMINISTIC_TEMPERATURE, ParamShape, ParameterPolicy, RequestParams,
};
pub use resilience::{NoopOperationHooks, OperationHooks, RetryPolicy, execute_with_retry};
pub use stream::{
    BoxedFragmentStream, CompletionSummary, FragmentStream, StreamFragment, VecFragmentStream,
};

#[cfg(feature = "backend-openai")]
pub mod adapters;
