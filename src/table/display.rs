use super::entities::Row;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

/// Columns to display: the configured ones, or every key of the first row
pub fn resolve_columns(rows: &[&Row], configured: &[String]) -> Vec<String> {
    if !configured.is_empty() {
        return configured.to_vec();
    }

    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::new(""),
        Some(Value::String(s)) => Cell::new(s),
        Some(number @ Value::Number(_)) => {
            Cell::new(number.to_string()).set_alignment(CellAlignment::Right)
        }
        Some(other) => Cell::new(other.to_string()),
    }
}

/// Render rows as a text table
pub fn render_table(rows: &[&Row], columns: &[String]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
        );

    for row in rows {
        table.add_row(columns.iter().map(|c| value_cell(row.get(c))));
    }

    table.to_string()
}

pub fn rows_to_json(rows: &[&Row]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
