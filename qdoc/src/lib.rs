//! Document synthesis over an accumulated conversation.

mod exemplars;
mod synthesizer;

pub use exemplars::{EXEMPLAR_COUNT, build_synthesis_messages, exemplar_messages};
pub use synthesizer::{DocumentStream, DocumentSynthesizer};
