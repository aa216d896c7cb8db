//! Backend adapters for concrete remote completion services.

#[cfg(feature = "backend-openai")]
pub mod openai;
