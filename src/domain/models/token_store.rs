use anyhow::Result;

/// Persistent storage holding at most one access token.
pub trait TokenStore {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
