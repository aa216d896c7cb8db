//! OpenAI-specific credential helpers and auth resolution.

use crate::{CredentialStore, ProviderError};

use super::types::OpenAiAuth;

impl CredentialStore {
    /// Stores an OpenAI API key for bearer-authenticated requests.
    ///
    /// OpenAI keys are expected to start with `sk-`.
    pub fn set_openai_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.starts_with("sk-") {
            return Err(ProviderError::authentication(
                "OpenAI API key must start with 'sk-'",
            ));
        }

        self.set_api_key(api_key)
    }
}

pub(crate) fn resolve_auth(credentials: &CredentialStore) -> Result<OpenAiAuth, ProviderError> {
    credentials
        .with_api_key(|key| OpenAiAuth::new(key))?
        .ok_or_else(|| ProviderError::authentication("no OpenAI API key configured"))
}
