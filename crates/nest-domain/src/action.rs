//! Pure state transitions.
//!
//! Every user-visible mutation is an [`Action`] fed to [`reduce`], which
//! returns a new board or reports that nothing changed. Persisting the
//! result is the caller's concern.

use nest_core::{NestError, NestResult};

use crate::board::Board;
use crate::column::{Column, ColumnId};
use crate::drag::{move_task, DragCommand};
use crate::field_update::FieldUpdate;
use crate::tag::normalize_tag;
use crate::task::{Task, TaskId};

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub completed: Option<bool>,
    /// Replaces the task's tag list; new names are registered.
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTask { column_id: ColumnId, title: String },
    UpdateTask { task_id: TaskId, update: TaskUpdate },
    ToggleCompleted { task_id: TaskId },
    DeleteTask { task_id: TaskId },
    TagTask { task_id: TaskId, tag: String },
    UntagTask { task_id: TaskId, tag: String },
    AddColumn { title: String },
    RenameColumn { column_id: ColumnId, title: String },
    DeleteColumn { column_id: ColumnId },
    AddTag { name: String },
    DeleteTag { name: String },
    MoveTask(DragCommand),
    Replace(Board),
}

impl Action {
    pub fn description(&self) -> String {
        match self {
            Action::AddTask { title, .. } => format!("Add task '{}'", title),
            Action::UpdateTask { task_id, .. } => format!("Update task {}", task_id),
            Action::ToggleCompleted { task_id } => format!("Toggle task {}", task_id),
            Action::DeleteTask { task_id } => format!("Delete task {}", task_id),
            Action::TagTask { task_id, tag } => format!("Tag task {} with '{}'", task_id, tag),
            Action::UntagTask { task_id, tag } => format!("Untag '{}' from task {}", tag, task_id),
            Action::AddColumn { title } => format!("Add column '{}'", title),
            Action::RenameColumn { column_id, .. } => format!("Rename column {}", column_id),
            Action::DeleteColumn { column_id } => format!("Delete column {}", column_id),
            Action::AddTag { name } => format!("Add tag '{}'", name),
            Action::DeleteTag { name } => format!("Delete tag '{}'", name),
            Action::MoveTask(cmd) => format!("Move task {} to {}", cmd.task_id, cmd.dest_column_id),
            Action::Replace(_) => "Replace board".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Changed(Board),
    Unchanged,
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed(_))
    }
}

fn required_title(title: &str, what: &str) -> NestResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NestError::Validation(format!("{} title cannot be empty", what)));
    }
    Ok(title.to_string())
}

fn task_not_found(task_id: &str) -> NestError {
    NestError::NotFound(format!("Task {}", task_id))
}

fn column_not_found(column_id: &str) -> NestError {
    NestError::NotFound(format!("Column {}", column_id))
}

/// Computes the board that results from `action`. Validation happens before
/// anything is copied, so an `Err` never implies a partial change.
pub fn reduce(board: &Board, action: &Action) -> NestResult<Transition> {
    match action {
        Action::AddTask { column_id, title } => {
            let title = required_title(title, "Task")?;
            if board.column(column_id).is_none() {
                return Err(column_not_found(column_id));
            }
            let mut next = board.clone();
            next.place(Task::new(title), column_id);
            Ok(Transition::Changed(next))
        }

        Action::UpdateTask { task_id, update } => {
            let title = update
                .title
                .as_deref()
                .map(|t| required_title(t, "Task"))
                .transpose()?;
            let current = board.task(task_id).ok_or_else(|| task_not_found(task_id))?;

            let mut task = current.clone();
            if let Some(title) = title {
                task.update_title(title);
            }
            if update.description.is_change() {
                let mut description = task.description.take();
                update.description.clone().apply_to(&mut description);
                task.update_description(description);
            }
            if let Some(completed) = update.completed {
                task.completed = completed;
            }

            let mut next = board.clone();
            if let Some(tags) = &update.tags {
                task.replace_tags(tags);
                for tag in &task.tags {
                    next.tags.add(tag);
                }
            }
            if task == *current && next.tags == board.tags {
                return Ok(Transition::Unchanged);
            }
            next.tasks.insert(task.id.clone(), task);
            Ok(Transition::Changed(next))
        }

        Action::ToggleCompleted { task_id } => {
            if board.task(task_id).is_none() {
                return Err(task_not_found(task_id));
            }
            let mut next = board.clone();
            if let Some(task) = next.task_mut(task_id) {
                task.toggle_completed();
            }
            Ok(Transition::Changed(next))
        }

        Action::DeleteTask { task_id } => {
            let (ci, _) = board.locate(task_id).ok_or_else(|| task_not_found(task_id))?;
            let mut next = board.clone();
            next.columns[ci].task_ids.retain(|id| id != task_id);
            next.tasks.remove(task_id);
            Ok(Transition::Changed(next))
        }

        Action::TagTask { task_id, tag } => {
            let tag = normalize_tag(tag);
            if tag.is_empty() {
                return Err(NestError::Validation("Tag name cannot be empty".into()));
            }
            let task = board.task(task_id).ok_or_else(|| task_not_found(task_id))?;
            if task.has_tag(&tag) && board.tags.contains(&tag) {
                return Ok(Transition::Unchanged);
            }
            let mut next = board.clone();
            next.tags.add(&tag);
            if let Some(task) = next.task_mut(task_id) {
                task.add_tag(&tag);
            }
            Ok(Transition::Changed(next))
        }

        Action::UntagTask { task_id, tag } => {
            let task = board.task(task_id).ok_or_else(|| task_not_found(task_id))?;
            if !task.has_tag(tag) {
                return Ok(Transition::Unchanged);
            }
            let mut next = board.clone();
            if let Some(task) = next.task_mut(task_id) {
                task.remove_tag(tag);
            }
            Ok(Transition::Changed(next))
        }

        Action::AddColumn { title } => {
            let title = required_title(title, "Column")?;
            let mut next = board.clone();
            next.columns.push(Column::new(title));
            Ok(Transition::Changed(next))
        }

        Action::RenameColumn { column_id, title } => {
            let title = required_title(title, "Column")?;
            let column = board
                .column(column_id)
                .ok_or_else(|| column_not_found(column_id))?;
            if column.title == title {
                return Ok(Transition::Unchanged);
            }
            let mut next = board.clone();
            if let Some(column) = next.column_mut(column_id) {
                column.rename(title);
            }
            Ok(Transition::Changed(next))
        }

        Action::DeleteColumn { column_id } => {
            let ci = board
                .column_index(column_id)
                .ok_or_else(|| column_not_found(column_id))?;
            let mut next = board.clone();
            let removed = next.columns.remove(ci);
            for task_id in &removed.task_ids {
                next.tasks.remove(task_id);
            }
            Ok(Transition::Changed(next))
        }

        Action::AddTag { name } => {
            if normalize_tag(name).is_empty() {
                return Err(NestError::Validation("Tag name cannot be empty".into()));
            }
            let mut next = board.clone();
            if next.tags.add(name) {
                Ok(Transition::Changed(next))
            } else {
                Ok(Transition::Unchanged)
            }
        }

        Action::DeleteTag { name } => {
            let in_use = board.tasks.values().any(|t| t.has_tag(name));
            if !board.tags.contains(name) && !in_use {
                return Ok(Transition::Unchanged);
            }
            let mut next = board.clone();
            next.tags.remove(name);
            for task in next.tasks.values_mut() {
                task.remove_tag(name);
            }
            Ok(Transition::Changed(next))
        }

        Action::MoveTask(command) => Ok(match move_task(board, command) {
            Some(next) => Transition::Changed(next),
            None => Transition::Unchanged,
        }),

        Action::Replace(replacement) => {
            if replacement == board {
                Ok(Transition::Unchanged)
            } else {
                Ok(Transition::Changed(replacement.clone()))
            }
        }
    }
}
