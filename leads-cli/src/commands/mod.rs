//! Command handlers

pub mod board;
pub mod column;
pub mod lead;

use crate::cli::{Cli, ColumnCommands, Commands, LeadCommands};
use crate::context::CliContext;
use crate::error::CliResult;
use std::io::Write;

/// Run the parsed command and return the exit code to end with
pub async fn execute(cli: &Cli, ctx: &CliContext, out: &mut dyn Write) -> CliResult<i32> {
    let result = match &cli.command {
        Commands::Board => board::show(ctx, out).await,
        Commands::Columns => column::list(ctx, out).await,
        Commands::Move { lead, target } => {
            lead::move_lead(ctx, lead, target.as_deref(), out).await
        }
        Commands::Column { command } => match command {
            ColumnCommands::Add { title } => column::add(ctx, title, out).await,
            ColumnCommands::Delete { id } => column::delete(ctx, id, out).await,
            ColumnCommands::Restore { status } => column::restore(ctx, *status, out).await,
        },
        Commands::Lead { command } => match command {
            LeadCommands::Delete { id } => lead::delete(ctx, id, out).await,
        },
    };

    if !cli.command.is_mutation() {
        return result;
    }
    // A failed command may still have written some leads, so save either way
    let saved = ctx.save().await;
    match (result, saved) {
        (Ok(code), saved) => saved.map(|()| code),
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(save_error)) => {
            tracing::error!("{}", save_error.full_chain());
            Err(error)
        }
    }
}
