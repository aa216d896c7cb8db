//! Streaming fragment contracts and in-memory stream utilities.
//!
//! ```rust
//! use qprovider::{BoxedFragmentStream, StreamFragment, VecFragmentStream};
//!
//! let stream = VecFragmentStream::new(vec![Ok(StreamFragment::Delta("hello".into()))]);
//! let _boxed: BoxedFragmentStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::{FinishReason, ProviderError};

/// Terminal summary of one completed streaming call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub model: String,
    pub content: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFragment {
    Delta(String),
    Completed(CompletionSummary),
}

impl StreamFragment {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Fragment stream contract.
///
/// Invariants for consumers:
/// - Fragments are emitted in source order.
/// - `Delta` may appear zero or more times.
/// - `Completed` is terminal and arrives after every delta.
/// - Once the stream yields `None`, it must not yield additional items.
/// - The stream is finite and non-restartable.
pub trait FragmentStream: Stream<Item = Result<StreamFragment, ProviderError>> + Send {}

impl<T> FragmentStream for T where T: Stream<Item = Result<StreamFragment, ProviderError>> + Send {}

pub type BoxedFragmentStream<'a> = Pin<Box<dyn FragmentStream + 'a>>;

#[derive(Debug)]
pub struct VecFragmentStream {
    fragments: VecDeque<Result<StreamFragment, ProviderError>>,
}

impl VecFragmentStream {
    pub fn new(fragments: Vec<Result<StreamFragment, ProviderError>>) -> Self {
        Self {
            fragments: fragments.into(),
        }
    }
}

impl Stream for VecFragmentStream {
    type Item = Result<StreamFragment, ProviderError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<StreamFragment, ProviderError>>> {
        Poll::Ready(self.fragments.pop_front())
    }
}
