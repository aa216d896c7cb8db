//! Drives one synthesis request from a history snapshot, leaving the
//! conversation untouched.

use async_stream::try_stream;
use futures_util::StreamExt;
use qchat::{ChatError, Session, TurnStream};
use qprovider::{
    CompletionRequest, ModelCatalog, ParameterPolicy, StreamFragment, StreamingClient,
};
use tokio_util::sync::CancellationToken;

use crate::build_synthesis_messages;

pub type DocumentStream<'a> = TurnStream<'a>;

/// Synthesizes the requirements-and-design document from a session's chat
/// history. Shares the session's busy flag with chat turns but never
/// appends to history; the document is a side artifact of the snapshot.
pub struct DocumentSynthesizer {
    client: StreamingClient,
}

impl DocumentSynthesizer {
    pub fn new(client: StreamingClient) -> Self {
        Self { client }
    }

    /// Streams the document's text deltas. Synthesis always runs on the
    /// catalog default model with deterministic general-purpose parameters,
    /// independent of the session's chat model selection.
    pub fn synthesize<'a>(
        &'a self,
        session: &Session,
        cancel: CancellationToken,
    ) -> Result<DocumentStream<'a>, ChatError> {
        let history = session.history()?;
        if history.is_empty() {
            return Err(ChatError::invalid_request(
                "cannot synthesize a document from an empty conversation",
            ));
        }

        let permit = session.begin_generation()?;
        let request = CompletionRequest::new(
            ModelCatalog::default_model(),
            build_synthesis_messages(&history),
            ParameterPolicy::synthesis_params(),
        );

        Ok(Box::pin(try_stream! {
            let mut permit = Some(permit);
            let mut fragments = self.client.open(request, cancel).await?;

            while let Some(fragment) = fragments.next().await {
                match fragment? {
                    StreamFragment::Delta(delta) => yield delta,
                    StreamFragment::Completed(_) => {
                        if let Some(permit) = permit.take() {
                            permit.finish();
                        }
                    }
                }
            }

            if let Some(permit) = permit.take() {
                permit.finish();
            }
        }))
    }
}
