use serde::Serialize;
use uuid::Uuid;

use crate::task::TaskId;

pub type ColumnId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Ordered task identities; order is the user's drag order.
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(title: String) -> Self {
        Self {
            id: format!("column-{}", Uuid::new_v4()),
            title,
            task_ids: Vec::new(),
        }
    }

    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    pub fn rename(&mut self, title: String) {
        self.title = title;
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.position_of(task_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}
