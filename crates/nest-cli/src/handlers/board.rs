use crate::cli::MoveArgs;
use crate::context::CliContext;
use crate::output;
use nest_domain::{Action, BoardExporter, DragCommand};
use serde::Serialize;

#[derive(Serialize)]
struct MoveResult {
    moved: bool,
    task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

pub fn handle_show(ctx: &CliContext) {
    output::output_success(BoardExporter::snapshot(ctx.board()));
}

pub async fn handle_move(ctx: &mut CliContext, args: MoveArgs) -> anyhow::Result<()> {
    let command = match (args.over, args.column) {
        (Some(over), _) => DragCommand::from_drop(ctx.board(), &args.task, &over),
        (None, Some(column)) => Some(match args.index {
            Some(index) => DragCommand::at_index(args.task.clone(), column, index),
            None => DragCommand::to_column(args.task.clone(), column),
        }),
        (None, None) => None,
    };

    let moved = match command {
        Some(command) => ctx.dispatch(Action::MoveTask(command)).await?.changed,
        None => {
            tracing::debug!("Drop target for {} did not resolve", args.task);
            false
        }
    };

    let placement = ctx.board().locate(&args.task);
    output::output_success(MoveResult {
        moved,
        column_id: placement.map(|(ci, _)| ctx.board().columns[ci].id.clone()),
        index: placement.map(|(_, pos)| pos),
        task_id: args.task,
    });
    Ok(())
}
