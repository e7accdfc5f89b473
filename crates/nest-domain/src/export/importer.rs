use nest_core::{NestError, NestResult};
use serde::Serialize;
use std::collections::HashSet;

use super::models::{BoardSnapshot, FlatSnapshot, TaskRecord};
use crate::board::{seed_title, Board, SEED_COLUMNS};
use crate::column::Column;
use crate::tag::TagRegistry;
use crate::task::Task;

/// Column that receives flat-format tasks without a status.
const DEFAULT_STATUS: &str = "today";
const UNTITLED_TASK: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// `{ "columns": [...], "tags": [...] }`
    Board,
    /// `{ "tasks": [...], "tags": [...] }`
    Flat,
}

impl SnapshotFormat {
    /// Sniffs the format from a parsed document.
    pub fn detect(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.get("columns").is_some_and(|c| c.is_array()) {
            Some(Self::Board)
        } else if object.get("tasks").is_some_and(|t| t.is_array()) {
            Some(Self::Flat)
        } else {
            None
        }
    }
}

/// Repairs applied while turning a snapshot into a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub format: SnapshotFormat,
    pub untitled_columns: usize,
    pub merged_columns: usize,
    pub untitled_tasks: usize,
    pub dropped_duplicates: usize,
    pub registered_tags: usize,
}

impl ImportReport {
    fn new(format: SnapshotFormat) -> Self {
        Self {
            format,
            untitled_columns: 0,
            merged_columns: 0,
            untitled_tasks: 0,
            dropped_duplicates: 0,
            registered_tags: 0,
        }
    }

    pub fn repairs(&self) -> usize {
        self.untitled_columns
            + self.merged_columns
            + self.untitled_tasks
            + self.dropped_duplicates
            + self.registered_tags
    }

    pub fn is_clean(&self) -> bool {
        self.repairs() == 0
    }
}

/// Parses snapshots in either format and repairs them into a sound board.
pub struct BoardImporter;

impl BoardImporter {
    pub fn from_slice(bytes: &[u8]) -> NestResult<(Board, ImportReport)> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| NestError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> NestResult<(Board, ImportReport)> {
        let format = SnapshotFormat::detect(&value).ok_or_else(|| {
            NestError::Parse("expected an object with a \"columns\" or \"tasks\" array".into())
        })?;

        let (board, report) = match format {
            SnapshotFormat::Board => {
                let snapshot: BoardSnapshot =
                    serde_json::from_value(value).map_err(|e| NestError::Parse(e.to_string()))?;
                Self::from_board_snapshot(snapshot)
            }
            SnapshotFormat::Flat => {
                let snapshot: FlatSnapshot =
                    serde_json::from_value(value).map_err(|e| NestError::Parse(e.to_string()))?;
                Self::from_flat_snapshot(snapshot)
            }
        };

        if !report.is_clean() {
            tracing::warn!("Repaired snapshot during import: {:?}", report);
        }
        Ok((board, report))
    }

    pub fn from_board_snapshot(snapshot: BoardSnapshot) -> (Board, ImportReport) {
        let mut report = ImportReport::new(SnapshotFormat::Board);
        let mut builder = Builder::new(&snapshot.tags);

        for record in snapshot.columns {
            let title = match record.title.filter(|t| !t.trim().is_empty()) {
                Some(title) => title,
                None => {
                    report.untitled_columns += 1;
                    record.id.clone()
                }
            };
            if !builder.ensure_column(&record.id, title) {
                report.merged_columns += 1;
            }
            for task in record.tasks {
                builder.push_task(&record.id, task, &mut report);
            }
        }

        (builder.board, report)
    }

    /// Places tasks into columns by their `status`. The standard GTD columns
    /// are always present; unknown statuses become extra columns.
    pub fn from_flat_snapshot(snapshot: FlatSnapshot) -> (Board, ImportReport) {
        let mut report = ImportReport::new(SnapshotFormat::Flat);
        let mut builder = Builder::new(&snapshot.tags);
        for (id, title) in SEED_COLUMNS {
            builder.ensure_column(id, title.to_string());
        }

        for task in snapshot.tasks {
            let status = task
                .status
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_STATUS)
                .to_string();
            let title = seed_title(&status).map_or_else(|| status.clone(), str::to_string);
            builder.ensure_column(&status, title);
            builder.push_task(&status, task, &mut report);
        }

        (builder.board, report)
    }
}

struct Builder {
    board: Board,
    seen: HashSet<String>,
}

impl Builder {
    fn new(tags: &[String]) -> Self {
        let board = Board {
            tags: TagRegistry::from_names(tags),
            ..Board::new()
        };
        Self {
            board,
            seen: HashSet::new(),
        }
    }

    /// Returns false when the column already existed.
    fn ensure_column(&mut self, id: &str, title: String) -> bool {
        if self.board.column(id).is_some() {
            return false;
        }
        self.board.columns.push(Column::with_id(id, title));
        true
    }

    fn push_task(&mut self, column_id: &str, record: TaskRecord, report: &mut ImportReport) {
        if !self.seen.insert(record.id.clone()) {
            tracing::warn!("Dropping duplicate task {} in column {}", record.id, column_id);
            report.dropped_duplicates += 1;
            return;
        }

        let title = if record.title.trim().is_empty() {
            report.untitled_tasks += 1;
            UNTITLED_TASK.to_string()
        } else {
            record.title
        };

        let mut task = Task::with_id(record.id, title);
        task.completed = record.completed;
        task.color = record.color;
        task.update_description(record.description);
        task.replace_tags(&record.tags);
        for tag in &task.tags {
            if self.board.tags.add(tag) {
                report.registered_tags += 1;
            }
        }

        self.board.place(task, column_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::BoardExporter;

    #[test]
    fn test_round_trip_preserves_board() {
        let mut board = Board::seed();
        if let Some(task) = board.task_mut("3") {
            task.update_description(Some("before the offsite".into()));
            task.completed = true;
        }
        let json = BoardExporter::to_json(&board).unwrap();
        let (restored, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(restored, board);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_column_title_defaults_to_id() {
        let json = r#"{"columns":[{"id":"inbox","tasks":[{"id":"1","title":"Sort mail"}]},{"id":"later","title":"  "}]}"#;
        let (board, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(board.column("inbox").unwrap().title, "inbox");
        assert_eq!(board.column("later").unwrap().title, "later");
        assert_eq!(report.untitled_columns, 2);
        assert_eq!(board.tasks_in("inbox")[0].title, "Sort mail");
    }

    #[test]
    fn test_duplicate_task_keeps_first_column() {
        let json = r#"{"columns":[
            {"id":"today","title":"Today","tasks":[{"id":"1","title":"A"}]},
            {"id":"tomorrow","title":"Tomorrow","tasks":[{"id":"1","title":"A copy"}]}
        ]}"#;
        let (board, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(report.dropped_duplicates, 1);
        assert_eq!(board.task("1").unwrap().title, "A");
        assert!(board.column("tomorrow").unwrap().is_empty());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_unregistered_task_tags_are_registered() {
        let json = r#"{"columns":[{"id":"today","title":"Today","tasks":[{"id":"1","title":"A","tags":["Home"]}]}],"tags":["work"]}"#;
        let (board, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(report.registered_tags, 1);
        assert_eq!(board.tags.as_slice(), ["work".to_string(), "home".to_string()]);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_flat_format_is_grouped_by_status() {
        let json = r#"{"tasks":[
            {"id":"1","title":"Complete project proposal","status":"today","completed":false,"tags":["work"]},
            {"id":"2","title":"Review quarterly goals","status":"tomorrow"},
            {"id":"3","title":"Learn piano","status":"hobby"},
            {"id":"4","title":"No status"}
        ],"tags":["work"]}"#;
        let (board, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(report.format, SnapshotFormat::Flat);
        assert_eq!(board.columns.len(), 6);
        assert_eq!(board.columns[5].id, "hobby");
        assert_eq!(board.columns[5].title, "hobby");
        let today: Vec<&str> = board.tasks_in("today").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(today, vec!["1", "4"]);
        assert_eq!(board.tasks_in("tomorrow")[0].title, "Review quarterly goals");
    }

    #[test]
    fn test_flat_status_is_trimmed() {
        let json = r#"{"tasks":[
            {"id":"1","title":"Water plants","status":" today "},
            {"id":"2","title":"Call dentist","status":"waiting\n"},
            {"id":"3","title":"Sort receipts","status":"   "}
        ]}"#;
        let (board, _) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(board.columns.len(), 5);
        let today: Vec<&str> = board.tasks_in("today").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(today, vec!["1", "3"]);
        assert_eq!(board.column_of("2").unwrap().id, "waiting");
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        for input in [
            &b"{\"columns\": [{\"id\": \"today\""[..],
            b"not json",
            b"[]",
            b"{\"boards\": []}",
            b"{\"columns\": [{\"title\": \"no id\"}]}",
        ] {
            let err = BoardImporter::from_slice(input).unwrap_err();
            assert!(err.is_parse(), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_blank_task_title_is_repaired() {
        let json = r#"{"columns":[{"id":"today","title":"Today","tasks":[{"id":"1","title":""}]}]}"#;
        let (board, report) = BoardImporter::from_slice(json.as_bytes()).unwrap();
        assert_eq!(report.untitled_tasks, 1);
        assert_eq!(board.task("1").unwrap().title, "Untitled");
    }
}
