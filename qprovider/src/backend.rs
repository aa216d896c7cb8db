use tokio_util::sync::CancellationToken;

use crate::{BoxedFragmentStream, CompletionRequest, ProviderError};

pub type ProviderFuture<'a, T> = qcommon::BoxFuture<'a, T>;

/// One remote completion service.
///
/// `stream` opens a single request and exposes the response as a lazy,
/// finite, non-restartable fragment stream. Cancelling the token must close
/// the underlying transport promptly; no fragment surfaces afterwards.
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn stream<'a>(
        &'a self,
        request: CompletionRequest,
        cancel: CancellationToken,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>>;
}
