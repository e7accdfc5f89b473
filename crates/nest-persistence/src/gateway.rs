//! Board persistence: save/load under a fixed key plus backup export and
//! import.

use crate::migration::Migrator;
use crate::store::AtomicWriter;
use crate::traits::{PersistenceStore, SaveReceipt, Serializer};
use crate::JsonSerializer;
use chrono::NaiveDate;
use nest_core::config::DEFAULT_STORAGE_KEY;
use nest_core::NestResult;
use nest_domain::{Board, BoardExporter, BoardImporter, ImportReport};
use std::path::{Path, PathBuf};

pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: PersistenceStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes the whole board and overwrites the stored value. The
    /// receipt exists only once the store confirmed the write.
    pub async fn save(&self, board: &Board) -> NestResult<SaveReceipt> {
        let bytes = Self::export_bytes(board)?;
        self.store.write(&self.key, &bytes).await?;
        Ok(SaveReceipt::new(&self.key, bytes.len()))
    }

    /// `Ok(None)` means nothing was ever saved. A stored value that cannot be
    /// parsed is a `Parse` error; the stored bytes are left untouched.
    pub async fn load(&self) -> NestResult<Option<Board>> {
        let Some(bytes) = self.store.read(&self.key).await? else {
            tracing::info!("No saved board under '{}'", self.key);
            return Ok(None);
        };
        let (board, report) = BoardImporter::from_slice(&bytes)?;
        if let Err(e) = Migrator::upgrade(&self.store, &self.key, &board, report.format).await {
            tracing::warn!("Could not rewrite migrated board: {}", e);
        }
        tracing::info!(
            "Loaded {} tasks in {} columns from {}",
            board.task_count(),
            board.columns.len(),
            self.store.location()
        );
        Ok(Some(board))
    }

    pub async fn clear(&self) -> NestResult<bool> {
        self.store.remove(&self.key).await
    }

    pub fn export_bytes(board: &Board) -> NestResult<Vec<u8>> {
        JsonSerializer.serialize(&BoardExporter::snapshot(board))
    }

    pub fn backup_filename(date: NaiveDate) -> String {
        format!("gtd-nest-backup-{}.json", date.format("%Y-%m-%d"))
    }

    pub async fn export_to_dir(&self, board: &Board, dir: &Path, date: NaiveDate) -> NestResult<PathBuf> {
        let path = dir.join(Self::backup_filename(date));
        let bytes = Self::export_bytes(board)?;
        AtomicWriter::write_atomic(&path, &bytes).await?;
        tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Parses a backup. Nothing is written; replacing state is the caller's
    /// decision.
    pub fn import_bytes(bytes: &[u8]) -> NestResult<(Board, ImportReport)> {
        BoardImporter::from_slice(bytes)
    }
}
