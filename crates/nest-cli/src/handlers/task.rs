use crate::cli::{TaskAction, TaskEditArgs};
use crate::context::CliContext;
use crate::output;
use nest_domain::{Action, FieldUpdate, TaskUpdate};

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add { column, title } => {
            ctx.dispatch(Action::AddTask {
                column_id: column.clone(),
                title,
            })
            .await?;
            let created = ctx
                .board()
                .column(&column)
                .and_then(|c| c.task_ids.last().cloned())
                .and_then(|id| ctx.task_record(&id));
            match created {
                Some(task) => output::output_success(&task),
                None => output::output_error(&format!("Task was not added to {}", column)),
            }
        }
        TaskAction::Get { id } => match ctx.task_record(&id) {
            Some(task) => output::output_success(&task),
            None => output::output_error(&format!("Task not found: {}", id)),
        },
        TaskAction::Edit(args) => {
            let id = args.id.clone();
            ctx.dispatch(Action::UpdateTask {
                task_id: id.clone(),
                update: task_update(args),
            })
            .await?;
            output_task(ctx, &id);
        }
        TaskAction::Delete { id } => {
            ctx.dispatch(Action::DeleteTask {
                task_id: id.clone(),
            })
            .await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Complete { id } => {
            ctx.dispatch(Action::ToggleCompleted {
                task_id: id.clone(),
            })
            .await?;
            output_task(ctx, &id);
        }
        TaskAction::Tag { id, tag } => {
            ctx.dispatch(Action::TagTask {
                task_id: id.clone(),
                tag,
            })
            .await?;
            output_task(ctx, &id);
        }
        TaskAction::Untag { id, tag } => {
            ctx.dispatch(Action::UntagTask {
                task_id: id.clone(),
                tag,
            })
            .await?;
            output_task(ctx, &id);
        }
    }
    Ok(())
}

fn task_update(args: TaskEditArgs) -> TaskUpdate {
    let description = match (args.clear_description, args.description) {
        (true, _) => FieldUpdate::Clear,
        (false, Some(text)) => FieldUpdate::Set(text),
        (false, None) => FieldUpdate::NoChange,
    };
    TaskUpdate {
        title: args.title,
        description,
        completed: args.completed,
        tags: args.tags,
    }
}

fn output_task(ctx: &CliContext, id: &str) {
    match ctx.task_record(id) {
        Some(task) => output::output_success(&task),
        None => output::output_error(&format!("Task not found: {}", id)),
    }
}
