//! Rendering operation results as tables, JSON or YAML

use crate::cli::OutputFormat;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use serde_json::Value;
use std::io::Write;

/// Write `value` as JSON or YAML, or as the table built by `table` for the table format
pub fn write_value<F>(out: &mut dyn Write, format: OutputFormat, value: &Value, table: F) -> Result<()>
where
    F: FnOnce(&Value) -> Table,
{
    match format {
        OutputFormat::Table => writeln!(out, "{}", table(value))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml_ng::to_string(value)?)?,
    }
    Ok(())
}

/// Write a one-line summary for the table format, or the value otherwise
pub fn write_summary(
    out: &mut dyn Write,
    format: OutputFormat,
    value: &Value,
    summary: &str,
) -> Result<()> {
    match format {
        OutputFormat::Table => writeln!(out, "{summary}")?,
        _ => write_value(out, format, value, |_| Table::new())?,
    }
    Ok(())
}

/// One table column per board column, leads listed top to bottom
pub fn board_table(board: &Value) -> Table {
    let columns = array(&board["columns"]);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|column| {
        format!(
            "{} ({})",
            text(&column["title"]),
            array(&column["leads"]).len()
        )
    }));

    let depth = columns
        .iter()
        .map(|column| array(&column["leads"]).len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        table.add_row(columns.iter().map(|column| {
            array(&column["leads"])
                .get(row)
                .map(lead_cell)
                .unwrap_or_default()
        }));
    }
    table
}

/// Id, title, kind and lead count of each column
pub fn columns_table(list: &Value) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Title", "Kind", "Leads"]);

    for column in array(&list["columns"]) {
        let mut kind = text(&column["kind"]);
        if column["fallback"].as_bool().unwrap_or(false) {
            kind.push_str(" (fallback)");
        }
        table.add_row(vec![
            text(&column["id"]),
            text(&column["title"]),
            kind,
            column["lead_count"].to_string(),
        ]);
    }
    table
}

fn lead_cell(lead: &Value) -> String {
    let id = text(&lead["id"]);
    match lead["companyName"].as_str() {
        Some(company) => format!("{company}\n{id}"),
        None => id,
    }
}

fn array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board() -> Value {
        json!({
            "columns": [
                {"kind": "status", "id": "New", "title": "New", "leads": [
                    {"id": "1", "companyName": "Acme"},
                    {"id": "2"}
                ]},
                {"kind": "custom", "id": "custom-1", "title": "Hot Leads", "leads": []}
            ]
        })
    }

    #[test]
    fn test_board_table() {
        let rendered = board_table(&board()).to_string();

        assert!(rendered.contains("New (2)"));
        assert!(rendered.contains("Hot Leads (0)"));
        assert!(rendered.contains("Acme"));
        assert_eq!(board_table(&board()).row_iter().count(), 2);
    }

    #[test]
    fn test_columns_table_marks_fallback() {
        let list = json!({"columns": [
            {"id": "New", "title": "New", "kind": "status", "fallback": true, "lead_count": 0}
        ]});
        let rendered = columns_table(&list).to_string();
        assert!(rendered.contains("status (fallback)"));
    }

    #[test]
    fn test_write_value_formats() {
        let value = json!({"deleted": true});

        let mut json_out = Vec::new();
        write_value(&mut json_out, OutputFormat::Json, &value, |_| Table::new()).unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&json_out).unwrap(),
            value
        );

        let mut yaml_out = Vec::new();
        write_value(&mut yaml_out, OutputFormat::Yaml, &value, |_| Table::new()).unwrap();
        assert_eq!(String::from_utf8(yaml_out).unwrap(), "deleted: true\n");
    }

    #[test]
    fn test_summary_only_for_tables() {
        let mut out = Vec::new();
        write_summary(&mut out, OutputFormat::Table, &json!({}), "Moved 1").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Moved 1\n");
    }
}
