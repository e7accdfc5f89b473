mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use nest_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("NEST_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON responses
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "nest", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = CliContext::load(AppConfig::load(), cli.dir, cli.key).await;

    let result = match cli.command {
        Commands::Show => {
            handlers::board::handle_show(&ctx);
            Ok(())
        }
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await,
        Commands::Column(column_cmd) => {
            handlers::column::handle(&mut ctx, column_cmd.action).await
        }
        Commands::Tag(tag_cmd) => handlers::tag::handle(&mut ctx, tag_cmd.action).await,
        Commands::Move(args) => handlers::board::handle_move(&mut ctx, args).await,
        Commands::Export(args) => handlers::export::handle_export(&mut ctx, args).await,
        Commands::Import(args) => handlers::export::handle_import(&mut ctx, args).await,
        Commands::Reset { yes } => handlers::export::handle_reset(&mut ctx, yes).await,
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        output::output_error(&e.to_string());
    }
    Ok(())
}
