//! Per-model request parameter policy.
//!
//! Reasoning-tier models reject a sampling temperature and name their
//! completion bound `max_completion_tokens`; general models take `max_tokens`
//! plus a temperature. The policy keeps that branching in one place so no
//! request is ever built with a shape its model family rejects.
//!
//! ```rust
//! use qprovider::{ParameterPolicy, RequestParams};
//!
//! let params = ParameterPolicy::resolve("o1").expect("known model");
//! assert!(matches!(params, RequestParams::Reasoning { .. }));
//! assert!(params.temperature().is_none());
//! ```

use crate::{ModelCatalog, ProviderError};

pub const COMPLETION_TOKEN_BOUND: u32 = 4000;
pub const DETERMINISTIC_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    Reasoning,
    General,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestParams {
    Reasoning { max_completion_tokens: u32 },
    General { max_tokens: u32, temperature: f32 },
}

impl RequestParams {
    pub fn reasoning_defaults() -> Self {
        Self::Reasoning {
            max_completion_tokens: COMPLETION_TOKEN_BOUND,
        }
    }

    pub fn general_defaults() -> Self {
        Self::General {
            max_tokens: COMPLETION_TOKEN_BOUND,
            temperature: DETERMINISTIC_TEMPERATURE,
        }
    }

    pub fn shape(&self) -> ParamShape {
        match self {
            Self::Reasoning { .. } => ParamShape::Reasoning,
            Self::General { .. } => ParamShape::General,
        }
    }

    pub fn temperature(&self) -> Option<f32> {
        match self {
            Self::Reasoning { .. } => None,
            Self::General { temperature, .. } => Some(*temperature),
        }
    }
}

pub struct ParameterPolicy;

impl ParameterPolicy {
    /// Resolves the request shape for a catalog model identifier.
    pub fn resolve(model_id: &str) -> Result<RequestParams, ProviderError> {
        let profile = ModelCatalog::profile(model_id).ok_or_else(|| {
            ProviderError::invalid_model(format!("unknown model identifier '{model_id}'"))
        })?;

        Ok(match profile.shape {
            ParamShape::Reasoning => RequestParams::reasoning_defaults(),
            ParamShape::General => RequestParams::general_defaults(),
        })
    }

    /// Deterministic general-purpose shape used for document synthesis,
    /// independent of any chat model selection.
    pub fn synthesis_params() -> RequestParams {
        RequestParams::general_defaults()
    }
}
