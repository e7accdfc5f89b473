use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use nest_domain::export::SnapshotFormat;
use serde::Serialize;

#[derive(Serialize)]
struct ImportSummary {
    format: SnapshotFormat,
    columns: usize,
    tasks: usize,
    tags: usize,
    repairs: usize,
    saved: bool,
}

pub async fn handle_export(ctx: &mut CliContext, args: ExportArgs) -> anyhow::Result<()> {
    ctx.ensure_writable()?;
    let dir = ctx.export_dir(args.out_dir.as_deref());
    let today = chrono::Local::now().date_naive();
    let path = ctx.session_mut().export_to_dir(&dir, today).await?;
    output::output_success(serde_json::json!({ "path": path.display().to_string() }));
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let (report, outcome) = match ctx.session_mut().import_file(&args.file).await {
        Ok(result) => result,
        Err(e) => output::output_error(&format!("Import failed: {}", e)),
    };
    ctx.report_failed_save(&outcome);

    let board = ctx.board();
    output::output_success(ImportSummary {
        format: report.format,
        columns: board.columns.len(),
        tasks: board.task_count(),
        tags: board.tags.len(),
        repairs: report.repairs(),
        saved: outcome.saved.is_some(),
    });
    Ok(())
}

pub async fn handle_reset(ctx: &mut CliContext, confirmed: bool) -> anyhow::Result<()> {
    let outcome = ctx.session_mut().reset(confirmed).await?;
    ctx.report_failed_save(&outcome);
    output::output_success(serde_json::json!({
        "reset": true,
        "saved": outcome.saved.is_some(),
    }));
    Ok(())
}
