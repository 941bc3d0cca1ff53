//! `leads board`

use crate::context::CliContext;
use crate::error::CliResult;
use crate::exit_codes::EXIT_SUCCESS;
use crate::output;
use leads_kanban::{board::GetBoard, OperationProcessor};
use std::io::Write;

pub async fn show(ctx: &CliContext, out: &mut dyn Write) -> CliResult<i32> {
    tracing::debug!("Fetching board");
    let board = ctx.processor.process(&GetBoard, &ctx.board).await?;

    output::write_value(out, ctx.format, &board, output::board_table)?;
    if let Some(hidden) = board["hidden"].as_array().filter(|h| !h.is_empty()) {
        if ctx.format == crate::cli::OutputFormat::Table {
            let names: Vec<&str> = hidden.iter().filter_map(|s| s.as_str()).collect();
            writeln!(out, "Hidden: {}", names.join(", ")).map_err(anyhow::Error::from)?;
        }
    }
    Ok(EXIT_SUCCESS)
}
