#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde_json::Map;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::TokenStore;
use crate::domain::models::ACCESS_TOKEN_KEY;

/// Stores the token in a small JSON document on disk, keyed by
/// `accessToken`. Other keys in the document are left untouched.
pub struct FileTokenStore {
    pub file_path: PathBuf,
}

impl Default for FileTokenStore {
    fn default() -> FileTokenStore {
        return FileTokenStore::new(PathBuf::from(Config::get(ConfigKey::TokenFile)));
    }
}

impl FileTokenStore {
    pub fn new(file_path: PathBuf) -> FileTokenStore {
        return FileTokenStore { file_path };
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        if !self.file_path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.file_path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        let doc: Value = serde_json::from_str(&contents).with_context(|| {
            return format!("Token file {} is not valid JSON", self.file_path.display());
        })?;

        return match doc {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        };
    }

    fn write_document(&self, doc: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.file_path, serde_json::to_string_pretty(&doc)?)?;
        return Ok(());
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        let doc = self.read_document()?;
        return Ok(doc
            .get(ACCESS_TOKEN_KEY)
            .and_then(|e| return e.as_str())
            .map(|e| return e.to_string()));
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut doc = self.read_document().unwrap_or_default();
        doc.insert(ACCESS_TOKEN_KEY.to_string(), Value::from(token));
        return self.write_document(doc);
    }

    fn clear(&self) -> Result<()> {
        let mut doc = self.read_document().unwrap_or_default();
        if doc.remove(ACCESS_TOKEN_KEY).is_none() {
            return Ok(());
        }

        return self.write_document(doc);
    }
}
