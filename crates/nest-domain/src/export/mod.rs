//! Snapshot import/export.
//!
//! The wire shape nests tasks inside their columns and derives each task's
//! `status` from the owning column. It is used both for the persisted value
//! and for backup files.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::BoardExporter;
pub use importer::{BoardImporter, ImportReport, SnapshotFormat};
pub use models::{BoardSnapshot, ColumnRecord, FlatSnapshot, TaskRecord};
