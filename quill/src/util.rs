//! Small convenience constructors for common types.

use crate::{ChatMessage, Message, ModelCatalog, Role, Session, SessionId};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn session(id: impl Into<SessionId>, model: impl Into<String>) -> Session {
    Session::new(id, model)
}

/// Normalizes free-form model input to a catalog identifier.
pub fn parse_model_id(value: &str) -> Option<&'static str> {
    ModelCatalog::profile(value.trim()).map(|profile| profile.id)
}

/// Renders committed history as (user, assistant) turn pairs; a trailing
/// unanswered user message is omitted.
pub fn paired_turns(history: &[ChatMessage]) -> Vec<(String, String)> {
    history
        .chunks(2)
        .filter_map(|pair| match pair {
            [user, assistant] if user.role == Role::User && assistant.role == Role::Assistant => {
                Some((user.content.clone(), assistant.content.clone()))
            }
            _ => None,
        })
        .collect()
}
