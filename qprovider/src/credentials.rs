//! Secure in-memory credential handling.

use std::sync::{Mutex, MutexGuard};

use crate::ProviderError;

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Holds the API key the assistant passes through to the remote service.
#[derive(Default)]
pub struct CredentialStore {
    api_key: Mutex<Option<SecretString>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        *self.slot()? = Some(api_key);
        Ok(())
    }

    pub fn has_credentials(&self) -> Result<bool, ProviderError> {
        Ok(self.slot()?.is_some())
    }

    pub fn with_api_key<R>(&self, f: impl FnOnce(&str) -> R) -> Result<Option<R>, ProviderError> {
        let slot = self.slot()?;
        Ok(slot.as_ref().map(|secret| f(secret.expose())))
    }

    pub fn clear(&self) -> Result<bool, ProviderError> {
        Ok(self.slot()?.take().is_some())
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<SecretString>>, ProviderError> {
        self.api_key
            .lock()
            .map_err(|_| ProviderError::other("credential store lock poisoned"))
    }
}
