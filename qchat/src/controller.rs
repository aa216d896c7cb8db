//! Session controller: owns conversation state transitions and republishes
//! streamed completion deltas to the caller.

use std::sync::atomic::{AtomicU64, Ordering};

use async_stream::try_stream;
use futures_util::StreamExt;
use qprovider::{
    CompletionRequest, Message, ModelCatalog, ParameterPolicy, Role, StreamFragment,
    StreamingClient,
};
use tokio_util::sync::CancellationToken;

use crate::{
    ADVISOR_SYSTEM_PROMPT, ChatError, ChatMessage, GREETING_REQUEST, GREETING_SYSTEM_PROMPT,
    GenerationPermit, Session, TurnStream,
};

pub struct SessionController {
    client: StreamingClient,
    next_session: AtomicU64,
}

impl SessionController {
    pub fn new(client: StreamingClient) -> Self {
        Self {
            client,
            next_session: AtomicU64::new(1),
        }
    }

    pub fn client(&self) -> &StreamingClient {
        &self.client
    }

    pub fn list_models(&self) -> Vec<&'static str> {
        ModelCatalog::list()
    }

    /// New session on the default model with empty history and the advisor
    /// system prompt.
    pub fn start_session(&self) -> Session {
        let n = self.next_session.fetch_add(1, Ordering::Relaxed);
        Session::new(format!("session-{n}"), ModelCatalog::default_model())
            .with_system_prompt(ADVISOR_SYSTEM_PROMPT)
    }

    /// Switches the model used by subsequent requests. Committed history is
    /// never rewritten.
    pub fn change_model(&self, session: &Session, model_id: &str) -> Result<(), ChatError> {
        if !ModelCatalog::is_valid(model_id) {
            return Err(ChatError::invalid_model(format!(
                "unknown model identifier '{model_id}'"
            )));
        }

        session.set_model(model_id)
    }

    pub fn history(&self, session: &Session) -> Result<Vec<ChatMessage>, ChatError> {
        session.history()
    }

    /// Runs one chat turn: appends the user message, streams the reply's
    /// deltas to the caller, and commits the assembled assistant message on
    /// the terminal fragment.
    ///
    /// On failure or cancellation the user message remains, no assistant
    /// message is committed, and the busy flag is released; deltas already
    /// delivered are not retracted.
    pub fn send_message<'a>(
        &'a self,
        session: &Session,
        text: impl Into<String>,
        cancel: CancellationToken,
    ) -> Result<TurnStream<'a>, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::invalid_request("message text must not be empty"));
        }

        let permit = session.begin_generation()?;
        permit.append(Role::User, text)?;

        let model = session.current_model()?;
        let params = ParameterPolicy::resolve(&model)?;

        let mut messages = Vec::new();
        if let Some(system_prompt) = session.system_prompt()? {
            messages.push(Message::new(Role::System, system_prompt));
        }

        messages.extend(
            session
                .history()?
                .into_iter()
                .map(|entry| Message::new(entry.role, entry.content)),
        );

        let request = CompletionRequest::new(model, messages, params);
        Ok(self.stream_reply(request, permit, cancel))
    }

    /// Generates and commits the assistant's opening message for a fresh
    /// conversation.
    pub fn open_conversation<'a>(
        &'a self,
        session: &Session,
        cancel: CancellationToken,
    ) -> Result<TurnStream<'a>, ChatError> {
        let permit = session.begin_generation()?;
        let model = session.current_model()?;
        let params = ParameterPolicy::resolve(&model)?;

        let messages = vec![
            Message::new(Role::System, GREETING_SYSTEM_PROMPT),
            Message::new(Role::User, GREETING_REQUEST),
        ];

        let request = CompletionRequest::new(model, messages, params);
        Ok(self.stream_reply(request, permit, cancel))
    }

    fn stream_reply<'a>(
        &'a self,
        request: CompletionRequest,
        permit: GenerationPermit,
        cancel: CancellationToken,
    ) -> TurnStream<'a> {
        Box::pin(try_stream! {
            let mut permit = Some(permit);
            let mut fragments = self.client.open(request, cancel).await?;
            let mut assistant_text = String::new();

            while let Some(fragment) = fragments.next().await {
                match fragment? {
                    StreamFragment::Delta(delta) => {
                        assistant_text.push_str(&delta);
                        yield delta;
                    }
                    StreamFragment::Completed(summary) => {
                        let text = if assistant_text.is_empty() {
                            summary.content
                        } else {
                            assistant_text.clone()
                        };

                        if let Some(permit) = permit.take() {
                            permit.commit_assistant(text);
                        }
                    }
                }
            }

            // The transport always ends with a terminal fragment; if a
            // backend stream stops without one, whatever accumulated is
            // still the turn's result.
            if let Some(permit) = permit.take() {
                permit.commit_assistant(assistant_text);
            }
        })
    }
}
