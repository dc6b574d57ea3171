#[cfg(test)]
#[path = "session_context_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::AccessToken;
use crate::domain::models::TokenStore;

/// Shared handle on the stored access token.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn TokenStore + Send + Sync>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore + Send + Sync>) -> SessionContext {
        return SessionContext { store };
    }

    /// Storage failures read as "no token".
    pub fn get(&self) -> Option<AccessToken> {
        return match self.store.get() {
            Ok(Some(token)) if !token.is_empty() => Some(AccessToken::new(&token)),
            Ok(_) => None,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to read access token");
                None
            }
        };
    }

    pub fn set(&self, token: &str) -> Result<()> {
        tracing::debug!("Storing access token");
        return self.store.set(token);
    }

    pub fn clear(&self) -> Result<()> {
        tracing::debug!("Clearing access token");
        return self.store.clear();
    }
}
