use std::sync::Mutex;
use std::sync::PoisonError;

use anyhow::Result;

use crate::domain::models::TokenStore;

/// Keeps the token for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        return Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone());
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        return Ok(());
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        return Ok(());
    }
}
