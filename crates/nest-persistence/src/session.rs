//! Effect runner around the pure reducer.
//!
//! Every mutation goes through [`Session::dispatch`]: the reducer computes
//! the next board, the session commits it in memory and then persists it.
//! Persistence failures never roll back the in-memory change; they are
//! reported as notifications instead.

use crate::gateway::PersistenceGateway;
use crate::traits::{PersistenceStore, SaveReceipt};
use chrono::{DateTime, NaiveDate, Utc};
use nest_core::{NestError, NestResult};
use nest_domain::{reduce, Action, Board, ImportReport};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub changed: bool,
    /// Present only when the store confirmed the write.
    pub saved: Option<SaveReceipt>,
}

pub struct Session<S> {
    board: Board,
    gateway: PersistenceGateway<S>,
    saving_enabled: bool,
    notifications: Vec<Notification>,
}

impl<S: PersistenceStore> Session<S> {
    /// Loads the stored board, or the seed board on a fresh install.
    ///
    /// A stored value that cannot be parsed is reported, the seed board is
    /// shown, and saving stays disabled until an import or reset so the
    /// unreadable value is not overwritten.
    pub async fn open(gateway: PersistenceGateway<S>) -> Self {
        let mut session = Self {
            board: Board::seed(),
            gateway,
            saving_enabled: true,
            notifications: Vec::new(),
        };

        match session.gateway.load().await {
            Ok(Some(board)) => session.board = board,
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to load board: {}", e);
                session.saving_enabled = false;
                session.notify(NotificationLevel::Error, format!("Load failed: {}", e));
            }
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn saving_enabled(&self) -> bool {
        self.saving_enabled
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Reduces `action` against the current board and persists the result.
    /// Reducer errors leave everything untouched.
    pub async fn dispatch(&mut self, action: Action) -> NestResult<DispatchOutcome> {
        self.apply(action, false).await
    }

    async fn apply(&mut self, action: Action, force_save: bool) -> NestResult<DispatchOutcome> {
        let description = action.description();
        let transition = reduce(&self.board, &action)?;
        let changed = transition.is_changed();
        if let nest_domain::Transition::Changed(board) = transition {
            tracing::debug!("{}", description);
            self.board = board;
        }

        let saved = if changed || force_save {
            self.persist().await
        } else {
            None
        };
        Ok(DispatchOutcome { changed, saved })
    }

    async fn persist(&mut self) -> Option<SaveReceipt> {
        if !self.saving_enabled {
            tracing::debug!("Saving disabled, keeping change in memory only");
            return None;
        }
        match self.gateway.save(&self.board).await {
            Ok(receipt) => {
                self.notify(NotificationLevel::Info, "Saved");
                Some(receipt)
            }
            Err(e) => {
                tracing::warn!("Failed to save board: {}", e);
                self.notify(NotificationLevel::Warning, format!("Save failed: {}", e));
                None
            }
        }
    }

    /// Replaces the whole board with an imported snapshot. On a parse
    /// failure the current board is kept and an "Import failed" notification
    /// is recorded.
    pub async fn import_bytes(&mut self, bytes: &[u8]) -> NestResult<(ImportReport, DispatchOutcome)> {
        let (board, report) = match PersistenceGateway::<S>::import_bytes(bytes) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.notify(NotificationLevel::Error, format!("Import failed: {}", e));
                return Err(e);
            }
        };
        self.saving_enabled = true;
        let outcome = self.apply(Action::Replace(board), true).await?;
        self.notify(NotificationLevel::Info, "Import succeeded");
        Ok((report, outcome))
    }

    pub async fn import_file(&mut self, path: &Path) -> NestResult<(ImportReport, DispatchOutcome)> {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.import_bytes(&bytes).await,
            Err(e) => {
                self.notify(
                    NotificationLevel::Error,
                    format!("Import failed: {}: {}", path.display(), e),
                );
                Err(e.into())
            }
        }
    }

    /// Restores the seed board. Requires explicit confirmation.
    pub async fn reset(&mut self, confirmed: bool) -> NestResult<DispatchOutcome> {
        if !confirmed {
            return Err(NestError::Validation(
                "Reset discards every column, task and tag; confirmation required".into(),
            ));
        }
        self.saving_enabled = true;
        let outcome = self.apply(Action::Replace(Board::seed()), true).await?;
        self.notify(NotificationLevel::Info, "Board reset to defaults");
        Ok(outcome)
    }

    /// Writes a dated backup. Refused while saving is disabled after a
    /// failed load.
    pub async fn export_to_dir(&mut self, dir: &Path, date: NaiveDate) -> NestResult<PathBuf> {
        if !self.saving_enabled {
            let e = NestError::Validation(
                "stored board could not be loaded; import or reset before exporting".into(),
            );
            self.notify(NotificationLevel::Error, format!("Export failed: {}", e));
            return Err(e);
        }
        match self.gateway.export_to_dir(&self.board, dir, date).await {
            Ok(path) => {
                self.notify(
                    NotificationLevel::Info,
                    format!("Exported to {}", path.display()),
                );
                Ok(path)
            }
            Err(e) => {
                self.notify(NotificationLevel::Error, format!("Export failed: {}", e));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::traits::MockPersistenceStore;
    use nest_core::config::DEFAULT_STORAGE_KEY;
    use nest_domain::{BoardExporter, DragCommand};

    async fn memory_session() -> Session<MemoryStore> {
        Session::open(PersistenceGateway::new(MemoryStore::new())).await
    }

    fn stored_board(session: &Session<MemoryStore>) -> Option<Board> {
        session
            .gateway()
            .store()
            .get_raw(DEFAULT_STORAGE_KEY)
            .map(|bytes| nest_domain::BoardImporter::from_slice(&bytes).unwrap().0)
    }

    #[tokio::test]
    async fn test_fresh_install_uses_seed() {
        let session = memory_session().await;
        assert_eq!(*session.board(), Board::seed());
        assert!(session.saving_enabled());
        assert!(session.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_persists_after_each_change() {
        let mut session = memory_session().await;
        let outcome = session
            .dispatch(Action::AddTag { name: "errands".into() })
            .await
            .unwrap();
        assert!(outcome.changed);
        assert!(outcome.saved.is_some());
        assert_eq!(stored_board(&session).unwrap(), *session.board());
        assert_eq!(session.notifications().last().unwrap().message, "Saved");
    }

    #[tokio::test]
    async fn test_noop_drag_skips_save() {
        let mut session = memory_session().await;
        let before = session.board().clone();
        let outcome = session
            .dispatch(Action::MoveTask(DragCommand::at_index("1", "today", 0)))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome {
                changed: false,
                saved: None
            }
        );
        assert_eq!(*session.board(), before);
        assert!(stored_board(&session).is_none());
    }

    #[tokio::test]
    async fn test_validation_error_changes_nothing() {
        let mut session = memory_session().await;
        let err = session
            .dispatch(Action::AddTask {
                column_id: "today".into(),
                title: "  ".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(*session.board(), Board::seed());
        assert!(stored_board(&session).is_none());
    }

    #[tokio::test]
    async fn test_import_failure_keeps_state() {
        let mut session = memory_session().await;
        session
            .dispatch(Action::AddTag { name: "errands".into() })
            .await
            .unwrap();
        let before = session.board().clone();
        let stored_before = stored_board(&session);

        let err = session
            .import_bytes(b"{\"columns\": [{\"id\": \"today\", \"tit")
            .await
            .unwrap_err();

        assert!(err.is_parse());
        assert_eq!(*session.board(), before);
        assert_eq!(stored_board(&session), stored_before);
        let last = session.notifications().last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert!(last.message.starts_with("Import failed"));
    }

    #[tokio::test]
    async fn test_import_replaces_wholesale() {
        let mut session = memory_session().await;
        let mut replacement = Board::new();
        replacement
            .columns
            .push(nest_domain::Column::with_id("inbox", "Inbox"));
        let bytes = BoardExporter::to_json(&replacement).unwrap();

        let (report, outcome) = session.import_bytes(bytes.as_bytes()).await.unwrap();
        assert!(report.is_clean());
        assert!(outcome.changed);
        assert_eq!(*session.board(), replacement);
        assert_eq!(stored_board(&session).unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_corrupt_store_disables_saving_until_import() {
        let store = MemoryStore::new();
        store.insert_raw(DEFAULT_STORAGE_KEY, "not json");
        let mut session = Session::open(PersistenceGateway::new(store)).await;

        assert!(!session.saving_enabled());
        assert_eq!(*session.board(), Board::seed());
        assert!(session.notifications()[0].message.starts_with("Load failed"));

        let outcome = session
            .dispatch(Action::AddTag { name: "x".into() })
            .await
            .unwrap();
        assert!(outcome.changed);
        assert!(outcome.saved.is_none());
        assert_eq!(
            session.gateway().store().get_raw(DEFAULT_STORAGE_KEY).unwrap(),
            b"not json"
        );

        let bytes = BoardExporter::to_json(&Board::seed()).unwrap();
        let (_, outcome) = session.import_bytes(bytes.as_bytes()).await.unwrap();
        assert!(outcome.saved.is_some());
        assert!(session.saving_enabled());
        assert_eq!(stored_board(&session).unwrap(), Board::seed());
    }

    #[tokio::test]
    async fn test_export_refused_while_store_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let backup = dir
            .path()
            .join(PersistenceGateway::<MemoryStore>::backup_filename(date));
        std::fs::write(&backup, "earlier backup").unwrap();

        let store = MemoryStore::new();
        store.insert_raw(DEFAULT_STORAGE_KEY, "{ truncated");
        let mut session = Session::open(PersistenceGateway::new(store)).await;

        let err = session.export_to_dir(dir.path(), date).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "earlier backup");
        let last = session.notifications().last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert!(last.message.starts_with("Export failed"));

        session.reset(true).await.unwrap();
        let path = session.export_to_dir(dir.path(), date).await.unwrap();
        assert_eq!(path, backup);
        assert_ne!(std::fs::read_to_string(&backup).unwrap(), "earlier backup");
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let mut session = memory_session().await;
        session
            .dispatch(Action::DeleteTask { task_id: "1".into() })
            .await
            .unwrap();

        assert!(session.reset(false).await.unwrap_err().is_validation());
        assert!(session.board().task("1").is_none());

        let outcome = session.reset(true).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(*session.board(), Board::seed());
    }

    #[tokio::test]
    async fn test_quota_failure_keeps_memory_change() {
        let mut session = Session::open(PersistenceGateway::new(MemoryStore::with_quota(16))).await;
        let outcome = session
            .dispatch(Action::AddTag { name: "errands".into() })
            .await
            .unwrap();
        assert!(outcome.changed);
        assert!(outcome.saved.is_none());
        assert!(session.board().tags.contains("errands"));
        let last = session.notifications().last().unwrap();
        assert_eq!(last.level, NotificationLevel::Warning);
        assert!(last.message.starts_with("Save failed"));
        assert!(!session.notifications().iter().any(|n| n.message == "Saved"));
    }

    #[tokio::test]
    async fn test_store_write_error_is_reported() {
        let mut store = MockPersistenceStore::new();
        store.expect_read().returning(|_| Ok(None));
        store
            .expect_write()
            .times(1)
            .returning(|_, _| Err(NestError::Storage("permission denied".into())));
        store.expect_location().return_const("mock".to_string());

        let mut session = Session::open(PersistenceGateway::new(store)).await;
        let outcome = session
            .dispatch(Action::ToggleCompleted { task_id: "3".into() })
            .await
            .unwrap();

        assert!(outcome.saved.is_none());
        assert!(session.board().task("3").unwrap().completed);
        assert!(session
            .notifications()
            .iter()
            .any(|n| n.message.contains("permission denied")));
    }

    #[tokio::test]
    async fn test_take_notifications_drains() {
        let mut session = memory_session().await;
        session
            .dispatch(Action::AddTag { name: "a".into() })
            .await
            .unwrap();
        assert_eq!(session.take_notifications().len(), 1);
        assert!(session.notifications().is_empty());
    }
}
