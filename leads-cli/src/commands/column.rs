//! `leads columns` and `leads column ...`

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::output;
use leads_kanban::column::{AddColumn, DeleteColumn, ListColumns, RestoreColumn};
use leads_kanban::{LeadStatus, OperationProcessor};
use std::io::Write;

pub async fn list(ctx: &CliContext, out: &mut dyn Write) -> CliResult<i32> {
    let columns = ctx.processor.process(&ListColumns, &ctx.board).await?;
    output::write_value(out, ctx.format, &columns, output::columns_table)?;
    Ok(EXIT_SUCCESS)
}

pub async fn add(ctx: &CliContext, title: &str, out: &mut dyn Write) -> CliResult<i32> {
    let column = ctx
        .processor
        .process(&AddColumn::new(title), &ctx.board)
        .await
        .map_err(CliError::from_mutation)?;
    let summary = format!(
        "Added column '{}' ({})",
        column["title"].as_str().unwrap_or(title),
        column["id"].as_str().unwrap_or_default()
    );
    output::write_summary(out, ctx.format, &column, &summary)?;
    Ok(EXIT_SUCCESS)
}

/// Exits with a warning when some leads could not be moved out first
pub async fn delete(ctx: &CliContext, id: &str, out: &mut dyn Write) -> CliResult<i32> {
    let result = ctx
        .processor
        .process(&DeleteColumn::new(id), &ctx.board)
        .await
        .map_err(CliError::from_mutation)?;

    if !result["deleted"].as_bool().unwrap_or(false) {
        let reason = result["reason"].as_str().unwrap_or("column kept");
        output::write_summary(out, ctx.format, &result, &format!("Kept {id}: {reason}"))?;
        return Ok(EXIT_SUCCESS);
    }

    let report = &result["report"];
    let failed = report["failed"].as_array().map_or(0, Vec::len);
    let mut summary = format!(
        "Deleted column {id}; moved {} lead(s) to New",
        report["succeeded"]
    );
    if let Some(failures) = report["failed"].as_array().filter(|f| !f.is_empty()) {
        summary.push_str(&format!("\n{failed} lead(s) could not be moved:"));
        for failure in failures {
            summary.push_str(&format!(
                "\n  {}: {}",
                failure["lead"].as_str().unwrap_or("?"),
                failure["error"].as_str().unwrap_or("?")
            ));
        }
    }
    output::write_summary(out, ctx.format, &result, &summary)?;

    Ok(if failed == 0 { EXIT_SUCCESS } else { EXIT_WARNING })
}

pub async fn restore(ctx: &CliContext, status: LeadStatus, out: &mut dyn Write) -> CliResult<i32> {
    let result = ctx
        .processor
        .process(&RestoreColumn::new(status), &ctx.board)
        .await
        .map_err(CliError::from_mutation)?;
    let summary = if result["restored"].as_bool().unwrap_or(false) {
        format!("Restored column {status}")
    } else {
        format!("Column {status} was not hidden")
    };
    output::write_summary(out, ctx.format, &result, &summary)?;
    Ok(EXIT_SUCCESS)
}
