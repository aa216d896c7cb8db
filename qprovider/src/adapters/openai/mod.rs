//! OpenAI-compatible chat-completions backend.

mod auth;
mod backend;
mod serde_api;
mod transport;
mod types;

pub use backend::OpenAiBackend;
pub use transport::{OpenAiChunkStream, OpenAiHttpTransport, OpenAiTransport};
pub use types::{OpenAiAuth, OpenAiCompletion, OpenAiStreamChunk};
