pub mod action;
pub mod board;
pub mod column;
pub mod drag;
pub mod export;
pub mod field_update;
pub mod tag;
pub mod task;

pub use action::{reduce, Action, TaskUpdate, Transition};
pub use board::{Board, IntegrityViolation};
pub use column::{Column, ColumnId};
pub use drag::{move_task, DragCommand};
pub use export::{BoardExporter, BoardImporter, BoardSnapshot, ImportReport};
pub use field_update::FieldUpdate;
pub use tag::{normalize_tag, TagRegistry};
pub use task::{Task, TaskColor, TaskId};
