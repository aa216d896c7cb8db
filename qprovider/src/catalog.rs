//! Static catalog of selectable model identifiers.
//!
//! ```rust
//! use qprovider::ModelCatalog;
//!
//! assert!(ModelCatalog::is_valid("o1"));
//! assert!(!ModelCatalog::is_valid("gpt-imaginary"));
//! assert_eq!(ModelCatalog::default_model(), "chatgpt-4o-latest");
//! ```

use crate::ParamShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelProfile {
    pub id: &'static str,
    pub shape: ParamShape,
    pub supports_streaming: bool,
}

// Catalog order is presentation order; the first entry is the default.
static MODELS: &[ModelProfile] = &[
    ModelProfile {
        id: "chatgpt-4o-latest",
        shape: ParamShape::General,
        supports_streaming: true,
    },
    ModelProfile {
        id: "gpt-4",
        shape: ParamShape::General,
        supports_streaming: true,
    },
    ModelProfile {
        id: "o1",
        shape: ParamShape::Reasoning,
        supports_streaming: true,
    },
    ModelProfile {
        id: "o3-mini",
        shape: ParamShape::Reasoning,
        supports_streaming: true,
    },
];

pub struct ModelCatalog;

impl ModelCatalog {
    pub fn models() -> &'static [ModelProfile] {
        MODELS
    }

    pub fn list() -> Vec<&'static str> {
        MODELS.iter().map(|profile| profile.id).collect()
    }

    pub fn profile(model_id: &str) -> Option<&'static ModelProfile> {
        MODELS.iter().find(|profile| profile.id == model_id)
    }

    pub fn is_valid(model_id: &str) -> bool {
        Self::profile(model_id).is_some()
    }

    pub fn default_model() -> &'static str {
        MODELS[0].id
    }
}
