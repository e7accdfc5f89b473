//! Drag-and-drop reordering.
//!
//! A drag gesture is reduced to a [`DragCommand`] and applied with
//! [`move_task`]. Unresolvable gestures are no-ops, never errors: a failed
//! drag should look like nothing happened.

use crate::board::Board;
use crate::column::ColumnId;
use crate::task::TaskId;

/// Outcome of a drag gesture, ready to apply to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommand {
    pub task_id: TaskId,
    /// Column the gesture started in. Only a hint; the board is searched.
    pub source_column_id: Option<ColumnId>,
    pub dest_column_id: ColumnId,
    /// Insertion point in the destination list as it is before the task is
    /// removed. `None` appends.
    pub dest_index: Option<usize>,
}

impl DragCommand {
    pub fn to_column(task_id: impl Into<TaskId>, dest_column_id: impl Into<ColumnId>) -> Self {
        Self {
            task_id: task_id.into(),
            source_column_id: None,
            dest_column_id: dest_column_id.into(),
            dest_index: None,
        }
    }

    pub fn at_index(
        task_id: impl Into<TaskId>,
        dest_column_id: impl Into<ColumnId>,
        dest_index: usize,
    ) -> Self {
        Self {
            dest_index: Some(dest_index),
            ..Self::to_column(task_id, dest_column_id)
        }
    }

    /// Resolves a raw drop: `over_id` may name a task (insert right after it)
    /// or a column (append). Returns `None` when either end is unknown.
    pub fn from_drop(board: &Board, task_id: &str, over_id: &str) -> Option<Self> {
        let (source_ci, _) = board.locate(task_id)?;
        let source_column_id = Some(board.columns[source_ci].id.clone());

        if let Some((ci, pos)) = board.locate(over_id) {
            return Some(Self {
                task_id: task_id.to_string(),
                source_column_id,
                dest_column_id: board.columns[ci].id.clone(),
                dest_index: Some(pos + 1),
            });
        }

        board.column(over_id).map(|column| Self {
            task_id: task_id.to_string(),
            source_column_id,
            dest_column_id: column.id.clone(),
            dest_index: None,
        })
    }
}

/// Applies a drag to a board. `None` means the board is unchanged.
pub fn move_task(board: &Board, command: &DragCommand) -> Option<Board> {
    let Some((source_ci, from)) = board.locate(&command.task_id) else {
        tracing::debug!("Drag of unknown task {} ignored", command.task_id);
        return None;
    };
    if let Some(hint) = &command.source_column_id {
        if *hint != board.columns[source_ci].id {
            tracing::debug!(
                "Stale source column {} for task {}, found in {}",
                hint,
                command.task_id,
                board.columns[source_ci].id
            );
        }
    }

    let Some(dest_ci) = board.column_index(&command.dest_column_id) else {
        tracing::debug!("Drop on unknown column {} ignored", command.dest_column_id);
        return None;
    };

    let dest_len = board.columns[dest_ci].len();
    let mut index = command.dest_index.unwrap_or(dest_len).min(dest_len);
    if source_ci == dest_ci {
        if index > from {
            index -= 1;
        }
        if index == from {
            return None;
        }
    }

    let mut next = board.clone();
    next.columns[source_ci]
        .task_ids
        .retain(|id| *id != command.task_id);
    next.columns[dest_ci]
        .task_ids
        .insert(index, command.task_id.clone());

    tracing::debug!(
        "Moved task {} to {}[{}]",
        command.task_id,
        command.dest_column_id,
        index
    );
    Some(next)
}
