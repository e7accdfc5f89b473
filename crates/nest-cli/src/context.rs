use anyhow::bail;
use nest_core::AppConfig;
use nest_domain::export::{ColumnRecord, TaskRecord};
use nest_domain::{Action, Board, BoardExporter};
use nest_persistence::{
    DispatchOutcome, JsonFileStore, NotificationLevel, PersistenceGateway, Session,
};
use std::path::{Path, PathBuf};

pub struct CliContext {
    pub config: AppConfig,
    session: Session<JsonFileStore>,
}

impl CliContext {
    pub async fn load(config: AppConfig, dir: Option<PathBuf>, key: Option<String>) -> Self {
        let data_dir = dir.unwrap_or_else(|| config.effective_data_dir());
        let key = key.unwrap_or_else(|| config.effective_storage_key().to_string());
        tracing::debug!("Opening board {} in {}", key, data_dir.display());

        let gateway = PersistenceGateway::with_key(JsonFileStore::new(&data_dir), key);
        let session = Session::open(gateway).await;
        let ctx = Self { config, session };
        ctx.report_load_failure();
        ctx
    }

    /// Read-only commands still run on the seed board after a failed load,
    /// so the failure is repeated on stderr for every command.
    fn report_load_failure(&self) {
        if self.session.saving_enabled() {
            return;
        }
        for note in self.session.notifications() {
            if note.level == NotificationLevel::Error {
                eprintln!("warning: {}", note.message);
            }
        }
    }

    pub fn board(&self) -> &Board {
        self.session.board()
    }

    pub fn session_mut(&mut self) -> &mut Session<JsonFileStore> {
        &mut self.session
    }

    /// Mutations are refused while the stored board is unreadable, so the
    /// user notices before editing a board that will not be kept.
    pub fn ensure_writable(&self) -> anyhow::Result<()> {
        if !self.session.saving_enabled() {
            let reason = self
                .session
                .notifications()
                .last()
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "stored board is unreadable".to_string());
            bail!(
                "{}; run `nest import <FILE>` or `nest reset --yes` to recover",
                reason
            );
        }
        Ok(())
    }

    pub async fn dispatch(&mut self, action: Action) -> anyhow::Result<DispatchOutcome> {
        self.ensure_writable()?;
        let outcome = self.session.dispatch(action).await?;
        self.report_failed_save(&outcome);
        Ok(outcome)
    }

    /// A failed save keeps the change in memory only; for a one-shot command
    /// that means the change is lost, so it is surfaced on stderr.
    pub fn report_failed_save(&self, outcome: &DispatchOutcome) {
        if outcome.changed && outcome.saved.is_none() {
            if let Some(note) = self.session.notifications().last() {
                eprintln!("warning: {}", note.message);
            }
        }
    }

    pub fn column_record(&self, column_id: &str) -> Option<ColumnRecord> {
        BoardExporter::snapshot(self.board())
            .columns
            .into_iter()
            .find(|c| c.id == column_id)
    }

    pub fn task_record(&self, task_id: &str) -> Option<TaskRecord> {
        BoardExporter::snapshot(self.board())
            .columns
            .into_iter()
            .flat_map(|c| c.tasks)
            .find(|t| t.id == task_id)
    }

    pub fn export_dir(&self, out_dir: Option<&Path>) -> PathBuf {
        out_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.effective_export_dir())
    }
}
