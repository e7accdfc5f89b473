use crate::store::atomic_writer::AtomicWriter;
use crate::traits::PersistenceStore;
use nest_core::{NestError, NestResult};
use std::path::{Path, PathBuf};

/// Directory-backed key-value store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// File backing `key`. Keys are restricted so they cannot escape the root.
    pub fn path_for(&self, key: &str) -> NestResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(NestError::Validation(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn read(&self, key: &str) -> NestResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        AtomicWriter::read_optional(&path).await
    }

    async fn write(&self, key: &str, data: &[u8]) -> NestResult<()> {
        let path = self.path_for(key)?;
        AtomicWriter::write_atomic(&path, data)
            .await
            .map_err(|e| NestError::Storage(format!("writing {}: {}", path.display(), e)))?;
        tracing::info!("Saved {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> NestResult<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}
