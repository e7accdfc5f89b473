use crate::traits::{PersistenceStore, Serializer};
use crate::JsonSerializer;
use nest_core::NestResult;
use nest_domain::export::SnapshotFormat;
use nest_domain::{Board, BoardExporter};

/// Upgrades stored values written in the older flat task-list format.
pub struct Migrator;

impl Migrator {
    /// Rewrites `key` in board format when it was loaded from the flat
    /// format. Returns whether a rewrite happened.
    pub async fn upgrade<S: PersistenceStore + ?Sized>(
        store: &S,
        key: &str,
        board: &Board,
        loaded_from: SnapshotFormat,
    ) -> NestResult<bool> {
        if loaded_from == SnapshotFormat::Board {
            return Ok(false);
        }
        tracing::info!(
            "Detected flat format under '{}' at {}. Migrating to board format...",
            key,
            store.location()
        );
        let bytes = JsonSerializer.serialize(&BoardExporter::snapshot(board))?;
        store.write(key, &bytes).await?;
        tracing::info!("Migration completed successfully");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use nest_domain::BoardImporter;

    const FLAT: &str = r#"{"tasks":[{"id":"1","title":"Plan week","status":"today"}],"tags":[]}"#;

    #[tokio::test]
    async fn test_upgrade_rewrites_flat_value() {
        let store = MemoryStore::new();
        store.insert_raw("state", FLAT);
        let (board, report) = BoardImporter::from_slice(FLAT.as_bytes()).unwrap();

        assert!(Migrator::upgrade(&store, "state", &board, report.format).await.unwrap());

        let stored = store.get_raw("state").unwrap();
        let (reloaded, report) = BoardImporter::from_slice(&stored).unwrap();
        assert_eq!(report.format, SnapshotFormat::Board);
        assert_eq!(reloaded, board);
    }

    #[tokio::test]
    async fn test_board_format_is_left_alone() {
        let store = MemoryStore::new();
        let board = Board::seed();
        assert!(!Migrator::upgrade(&store, "state", &board, SnapshotFormat::Board)
            .await
            .unwrap());
        assert!(store.get_raw("state").is_none());
    }
}
