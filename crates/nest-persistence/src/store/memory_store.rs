use crate::traits::PersistenceStore;
use nest_core::{NestError, NestResult};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process store with an optional size quota, mirroring a browser's
/// bounded local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes larger than `quota` bytes fail with a storage error.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    pub fn insert_raw(&self, key: &str, data: impl Into<Vec<u8>>) {
        self.values.lock().insert(key.to_string(), data.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().get(key).cloned()
    }
}

#[async_trait::async_trait]
impl PersistenceStore for MemoryStore {
    async fn read(&self, key: &str) -> NestResult<Option<Vec<u8>>> {
        Ok(self.get_raw(key))
    }

    async fn write(&self, key: &str, data: &[u8]) -> NestResult<()> {
        if let Some(quota) = self.quota {
            if data.len() > quota {
                return Err(NestError::Storage(format!(
                    "quota exceeded: {} bytes > {} bytes",
                    data.len(),
                    quota
                )));
            }
        }
        self.insert_raw(key, data);
        Ok(())
    }

    async fn remove(&self, key: &str) -> NestResult<bool> {
        Ok(self.values.lock().remove(key).is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quota_rejects_large_writes() {
        let store = MemoryStore::with_quota(4);
        store.write("k", b"tiny").await.unwrap();
        let err = store.write("k", b"too large").await.unwrap_err();
        assert!(matches!(err, NestError::Storage(_)));
        assert_eq!(store.get_raw("k").unwrap(), b"tiny");
    }
}
