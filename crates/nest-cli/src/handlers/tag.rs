use crate::cli::TagAction;
use crate::context::CliContext;
use crate::output;
use nest_domain::{normalize_tag, Action};

pub async fn handle(ctx: &mut CliContext, action: TagAction) -> anyhow::Result<()> {
    match action {
        TagAction::Add { name } => {
            let outcome = ctx.dispatch(Action::AddTag { name: name.clone() }).await?;
            output::output_success(serde_json::json!({
                "tag": normalize_tag(&name),
                "added": outcome.changed,
            }));
        }
        TagAction::List => {
            output::output_list(ctx.board().tags.as_slice().to_vec());
        }
        TagAction::Delete { name } => {
            let outcome = ctx.dispatch(Action::DeleteTag { name: name.clone() }).await?;
            output::output_success(serde_json::json!({
                "deleted": normalize_tag(&name),
                "changed": outcome.changed,
            }));
        }
    }
    Ok(())
}
