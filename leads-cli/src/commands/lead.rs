//! `leads move` and `leads lead ...`

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_SUCCESS;
use crate::output;
use leads_kanban::lead::{DeleteLead, MoveLead};
use leads_kanban::OperationProcessor;
use std::io::Write;

pub async fn move_lead(
    ctx: &CliContext,
    lead: &str,
    target: Option<&str>,
    out: &mut dyn Write,
) -> CliResult<i32> {
    let operation = match target {
        Some(target) => MoveLead::new(lead, target),
        None => MoveLead::nowhere(lead),
    };
    let result = ctx
        .processor
        .process(&operation, &ctx.board)
        .await
        .map_err(CliError::from_mutation)?;

    let summary = match result["result"].as_str() {
        Some("reassign") => format!(
            "Moved {lead} from {} to {}",
            result["from"]["id"].as_str().unwrap_or("?"),
            result["to"]["id"].as_str().unwrap_or("?"),
        ),
        Some("reorder") => format!("Reordered {lead} within its column (not saved)"),
        _ => format!("{lead} stays where it is"),
    };
    output::write_summary(out, ctx.format, &result, &summary)?;
    Ok(EXIT_SUCCESS)
}

pub async fn delete(ctx: &CliContext, id: &str, out: &mut dyn Write) -> CliResult<i32> {
    let result = ctx
        .processor
        .process(&DeleteLead::new(id), &ctx.board)
        .await
        .map_err(CliError::from_mutation)?;
    output::write_summary(out, ctx.format, &result, &format!("Deleted lead {id}"))?;
    Ok(EXIT_SUCCESS)
}
