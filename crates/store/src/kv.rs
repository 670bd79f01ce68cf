//! The storage trait every dashboard module persists through.

use {async_trait::async_trait, serde_json::Value};

use crate::Result;

/// Async JSON key-value store. Keys are flat names like `dashboard_wallets`;
/// values are whole documents, replaced atomically per `set`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the document stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Delete the document stored under `key`. Deleting an absent key is a
    /// no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Keys are used as file names by the file store, so restrict them to a safe
/// alphabet up front rather than in one backend only.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(crate::Error::invalid_key(key))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        validate_key("dashboard_wallets").unwrap();
        validate_key("burn-history-2").unwrap();
    }

    #[test]
    fn test_invalid_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("has space").is_err());
        assert!(validate_key("dot.json").is_err());
    }
}
