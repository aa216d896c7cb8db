//! Session state, committed chat messages, and the generation permit.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_core::Stream;
use qcommon::SessionId;
use qprovider::Role;

use crate::ChatError;

/// One committed history entry. `seq` is the zero-based commit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub seq: usize,
}

#[derive(Debug)]
struct SessionState {
    model: String,
    system_prompt: Option<String>,
    history: Vec<ChatMessage>,
    busy: bool,
}

#[derive(Debug)]
struct SessionShared {
    id: SessionId,
    state: Mutex<SessionState>,
}

impl SessionShared {
    fn state(&self) -> Result<MutexGuard<'_, SessionState>, ChatError> {
        self.state
            .lock()
            .map_err(|_| ChatError::session("session state lock poisoned"))
    }
}

/// Handle to one conversation's state: append-only history, current model,
/// and the busy flag. Clones share the same underlying session.
#[derive(Debug, Clone)]
pub struct Session {
    shared: Arc<SessionShared>,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, model: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                id: id.into(),
                state: Mutex::new(SessionState {
                    model: model.into(),
                    system_prompt: None,
                    history: Vec::new(),
                    busy: false,
                }),
            }),
        }
    }

    pub fn with_system_prompt(self, system_prompt: impl Into<String>) -> Self {
        if let Ok(mut state) = self.shared.state() {
            state.system_prompt = Some(system_prompt.into());
        }
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.shared.id
    }

    pub fn current_model(&self) -> Result<String, ChatError> {
        Ok(self.shared.state()?.model.clone())
    }

    pub fn system_prompt(&self) -> Result<Option<String>, ChatError> {
        Ok(self.shared.state()?.system_prompt.clone())
    }

    pub fn is_busy(&self) -> Result<bool, ChatError> {
        Ok(self.shared.state()?.busy)
    }

    /// Read-only snapshot of the committed history in commit order.
    pub fn history(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.shared.state()?.history.clone())
    }

    pub(crate) fn set_model(&self, model: &str) -> Result<(), ChatError> {
        self.shared.state()?.model = model.to_string();
        Ok(())
    }

    /// Atomically checks and sets the busy flag, returning the permit that
    /// guards this generation. Fails while another generation is in flight.
    pub fn begin_generation(&self) -> Result<GenerationPermit, ChatError> {
        let mut state = self.shared.state()?;
        if state.busy {
            return Err(ChatError::invalid_request(
                "a generation is already in flight for this session",
            ));
        }

        state.busy = true;
        Ok(GenerationPermit {
            shared: Arc::clone(&self.shared),
            released: false,
        })
    }
}

/// Exclusive right to run one generation on a session.
///
/// Commits release the busy flag together with the history append, in one
/// critical section. Dropping an uncommitted permit releases the flag and
/// leaves history as it was, which covers failure, cancellation, and a
/// consumer abandoning the turn stream.
#[derive(Debug)]
pub struct GenerationPermit {
    shared: Arc<SessionShared>,
    released: bool,
}

impl GenerationPermit {
    pub(crate) fn append(&self, role: Role, content: impl Into<String>) -> Result<(), ChatError> {
        let mut state = self.shared.state()?;
        let seq = state.history.len();
        state.history.push(ChatMessage {
            role,
            content: content.into(),
            seq,
        });
        Ok(())
    }

    pub(crate) fn commit_assistant(mut self, content: String) {
        if let Ok(mut state) = self.shared.state() {
            let seq = state.history.len();
            state.history.push(ChatMessage {
                role: Role::Assistant,
                content,
                seq,
            });
            state.busy = false;
        }
        self.released = true;
    }

    /// Releases the busy flag without touching history.
    pub fn finish(mut self) {
        if let Ok(mut state) = self.shared.state() {
            state.busy = false;
        }
        self.released = true;
    }
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Ok(mut state) = self.shared.state() {
            state.busy = false;
        }
    }
}

pub type TurnStream<'a> = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send + 'a>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatErrorKind;

    #[test]
    fn busy_flag_is_checked_and_set_atomically() {
        let session = Session::new("s1", "gpt-4");
        assert!(!session.is_busy().expect("state readable"));

        let permit = session.begin_generation().expect("first permit granted");
        assert!(session.is_busy().expect("state readable"));

        let error = session
            .begin_generation()
            .expect_err("second permit must fail");
        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);

        drop(permit);
        assert!(!session.is_busy().expect("state readable"));
    }

    #[test]
    fn commit_appends_and_releases_in_one_step() {
        let session = Session::new("s2", "gpt-4");
        let permit = session.begin_generation().expect("permit granted");
        permit.append(Role::User, "question").expect("append works");
        permit.commit_assistant("answer".to_string());

        assert!(!session.is_busy().expect("state readable"));
        let history = session.history().expect("state readable");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].seq, 0);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].seq, 1);
    }

    #[test]
    fn dropped_permit_keeps_appended_user_message_only() {
        let session = Session::new("s3", "gpt-4");
        let permit = session.begin_generation().expect("permit granted");
        permit.append(Role::User, "question").expect("append works");
        drop(permit);

        assert!(!session.is_busy().expect("state readable"));
        let history = session.history().expect("state readable");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::User);
    }

    #[test]
    fn finish_releases_without_touching_history() {
        let session = Session::new("s4", "gpt-4");
        let permit = session.begin_generation().expect("permit granted");
        permit.finish();

        assert!(!session.is_busy().expect("state readable"));
        assert!(session.history().expect("state readable").is_empty());
    }

    #[test]
    fn clones_share_the_same_session() {
        let session = Session::new("s5", "gpt-4");
        let twin = session.clone();

        let permit = session.begin_generation().expect("permit granted");
        assert!(twin.is_busy().expect("state readable"));
        permit.finish();
        assert!(!twin.is_busy().expect("state readable"));
    }
}
