use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nest_core::NestResult;
use serde::Serialize;

/// Confirmation that a value reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReceipt {
    pub key: String,
    pub bytes: usize,
    pub saved_at: DateTime<Utc>,
}

impl SaveReceipt {
    pub fn new(key: impl Into<String>, bytes: usize) -> Self {
        Self {
            key: key.into(),
            bytes,
            saved_at: Utc::now(),
        }
    }
}

/// String-keyed storage holding one document per key.
/// Writes replace any previous value; last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    async fn read(&self, key: &str) -> NestResult<Option<Vec<u8>>>;

    async fn write(&self, key: &str, data: &[u8]) -> NestResult<()>;

    /// Returns whether a value was present.
    async fn remove(&self, key: &str) -> NestResult<bool>;

    /// Human-readable description of where values live.
    fn location(&self) -> String;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> NestResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> NestResult<T>;
}
