use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use nest_domain::Action;
use serde::Serialize;

#[derive(Serialize)]
struct ColumnSummary<'a> {
    id: &'a str,
    title: &'a str,
    task_count: usize,
}

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Add { title } => {
            ctx.dispatch(Action::AddColumn { title }).await?;
            match ctx.board().columns.last() {
                Some(column) => output::output_success(ColumnSummary {
                    id: &column.id,
                    title: &column.title,
                    task_count: column.len(),
                }),
                None => output::output_error("Column was not added"),
            }
        }
        ColumnAction::List => {
            let columns = ctx
                .board()
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    id: &c.id,
                    title: &c.title,
                    task_count: c.len(),
                })
                .collect();
            output::output_list::<ColumnSummary<'_>>(columns);
        }
        ColumnAction::Rename { id, title } => {
            ctx.dispatch(Action::RenameColumn {
                column_id: id.clone(),
                title,
            })
            .await?;
            match ctx.column_record(&id) {
                Some(column) => output::output_success(&column),
                None => output::output_error(&format!("Column not found: {}", id)),
            }
        }
        ColumnAction::Delete { id } => {
            let removed_tasks = ctx.board().column(&id).map(|c| c.len()).unwrap_or(0);
            ctx.dispatch(Action::DeleteColumn {
                column_id: id.clone(),
            })
            .await?;
            output::output_success(serde_json::json!({
                "deleted": id,
                "deleted_tasks": removed_tasks,
            }));
        }
    }
    Ok(())
}
