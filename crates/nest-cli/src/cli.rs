use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nest")]
#[command(about = "A personal getting-things-done task board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the saved board (or set NEST_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", env = "NEST_DATA_DIR")]
    pub dir: Option<PathBuf>,

    /// Storage key the board is saved under
    #[arg(long, global = true, value_name = "KEY", env = "NEST_STORAGE_KEY")]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every column with its tasks
    Show,
    /// Task operations
    Task(TaskCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Tag registry operations
    Tag(TagCommand),
    /// Drag a task onto another task or a column
    Move(MoveArgs),
    /// Write a dated backup file
    Export(ExportArgs),
    /// Replace the board with a backup file
    Import(ImportArgs),
    /// Restore the default columns, tasks and tags
    Reset {
        /// Confirm discarding the current board
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the end of a column
    Add {
        #[arg(long)]
        column: String,
        #[arg(long)]
        title: String,
    },
    /// Show a single task
    Get {
        #[arg(long)]
        id: String,
    },
    /// Edit a task
    Edit(TaskEditArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Toggle a task's completion
    Complete {
        #[arg(long)]
        id: String,
    },
    /// Add a tag to a task (registers the tag)
    Tag {
        #[arg(long)]
        id: String,
        #[arg(long)]
        tag: String,
    },
    /// Remove a tag from a task
    Untag {
        #[arg(long)]
        id: String,
        #[arg(long)]
        tag: String,
    },
}

#[derive(Args)]
pub struct TaskEditArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub completed: Option<bool>,
    /// Replace the task's tags (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a column at the end of the board
    Add {
        #[arg(long)]
        title: String,
    },
    /// List columns
    List,
    /// Rename a column
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a column and the tasks in it
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct TagCommand {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Register a tag
    Add {
        #[arg(long)]
        name: String,
    },
    /// List registered tags
    List,
    /// Delete a tag and remove it from every task
    Delete {
        #[arg(long)]
        name: String,
    },
}

#[derive(Args)]
pub struct MoveArgs {
    /// Task being dragged
    #[arg(long)]
    pub task: String,
    /// Task or column the task is dropped on
    #[arg(long, conflicts_with_all = ["column", "index"], required_unless_present = "column")]
    pub over: Option<String>,
    /// Destination column
    #[arg(long)]
    pub column: Option<String>,
    /// Insertion index in the destination column (defaults to the end)
    #[arg(long, requires = "column")]
    pub index: Option<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory for the backup file (defaults to the configured export dir)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
