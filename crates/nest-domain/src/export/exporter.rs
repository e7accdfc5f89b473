use nest_core::{NestError, NestResult};

use super::models::{BoardSnapshot, ColumnRecord, TaskRecord};
use crate::board::Board;

/// Converts a board into its portable snapshot form.
pub struct BoardExporter;

impl BoardExporter {
    pub fn snapshot(board: &Board) -> BoardSnapshot {
        let columns = board
            .columns
            .iter()
            .map(|column| ColumnRecord {
                id: column.id.clone(),
                title: Some(column.title.clone()),
                tasks: board
                    .tasks_in(&column.id)
                    .into_iter()
                    .map(|task| TaskRecord {
                        id: task.id.clone(),
                        title: task.title.clone(),
                        status: Some(column.id.clone()),
                        completed: task.completed,
                        tags: task.tags.clone(),
                        description: task.description.clone(),
                        color: task.color,
                    })
                    .collect(),
            })
            .collect();

        BoardSnapshot {
            columns,
            tags: board.tags.as_slice().to_vec(),
        }
    }

    /// Pretty JSON with 2-space indentation.
    pub fn to_json(board: &Board) -> NestResult<String> {
        serde_json::to_string_pretty(&Self::snapshot(board))
            .map_err(|e| NestError::Serialization(e.to_string()))
    }
}
