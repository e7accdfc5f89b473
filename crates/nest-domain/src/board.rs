use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::column::{Column, ColumnId};
use crate::tag::TagRegistry;
use crate::task::{Task, TaskId};

/// Seed columns shown on a fresh install: (id, title).
pub const SEED_COLUMNS: [(&str, &str); 5] = [
    ("today", "Today"),
    ("tomorrow", "Tomorrow"),
    ("next", "Next Actions"),
    ("waiting", "Waiting For"),
    ("someday", "Someday"),
];

/// Title a well-known status id is displayed under.
pub fn seed_title(column_id: &str) -> Option<&'static str> {
    SEED_COLUMNS
        .iter()
        .find(|(id, _)| *id == column_id)
        .map(|(_, title)| *title)
}

/// Complete in-memory state: ordered columns owning task ids, the task map,
/// and the tag registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub tasks: BTreeMap<TaskId, Task>,
    pub tags: TagRegistry,
}

/// A broken placement invariant found by [`Board::check_integrity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// Task in the map that no column lists.
    Unplaced(TaskId),
    /// Task id listed more than once across columns.
    Duplicated(TaskId),
    /// Column lists an id with no task behind it.
    Dangling { column_id: ColumnId, task_id: TaskId },
    /// Task carries a tag missing from the registry.
    UnregisteredTag { task_id: TaskId, tag: String },
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set of columns, tasks and tags used when nothing is stored.
    pub fn seed() -> Self {
        let mut board = Self::new();
        for (id, title) in SEED_COLUMNS {
            board.columns.push(Column::with_id(id, title));
        }
        board.tags = TagRegistry::from_names(["work", "important"]);

        let mut proposal = Task::with_id("1", "Complete project proposal");
        proposal.add_tag("work");
        let mut meeting = Task::with_id("2", "Schedule team meeting");
        meeting.add_tag("work");
        meeting.add_tag("important");
        let review = Task::with_id("3", "Review quarterly goals");

        board.place(proposal, "today");
        board.place(meeting, "today");
        board.place(review, "tomorrow");
        board
    }

    /// Appends a task to the end of a column. Returns false if the column
    /// does not exist.
    pub(crate) fn place(&mut self, task: Task, column_id: &str) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) else {
            return false;
        };
        column.task_ids.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task);
        true
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(task_id)
    }

    /// Column index and position of a task within that column.
    pub fn locate(&self, task_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, column)| column.position_of(task_id).map(|pos| (ci, pos)))
    }

    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.locate(task_id).map(|(ci, _)| &self.columns[ci])
    }

    /// Tasks of a column in display order.
    pub fn tasks_in(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Sum of all column list lengths; equals `task_count` on a sound board.
    pub fn placed_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for column in &self.columns {
            for task_id in &column.task_ids {
                if !seen.insert(task_id.as_str()) {
                    violations.push(IntegrityViolation::Duplicated(task_id.clone()));
                }
                if !self.tasks.contains_key(task_id) {
                    violations.push(IntegrityViolation::Dangling {
                        column_id: column.id.clone(),
                        task_id: task_id.clone(),
                    });
                }
            }
        }

        for task in self.tasks.values() {
            if !seen.contains(task.id.as_str()) {
                violations.push(IntegrityViolation::Unplaced(task.id.clone()));
            }
            for tag in &task.tags {
                if !self.tags.contains(tag) {
                    violations.push(IntegrityViolation::UnregisteredTag {
                        task_id: task.id.clone(),
                        tag: tag.clone(),
                    });
                }
            }
        }

        violations
    }

    pub fn is_consistent(&self) -> bool {
        self.check_integrity().is_empty()
    }
}
