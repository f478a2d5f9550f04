//! Plain-text summary of a table model, for debugging parser output.

use std::fmt::Write;

use crate::table::{Cell, Table};
use crate::types::Color;

/// Describe a table as text: title, settings, then one line per row.
///
/// Cells are written as `[title] content (cs:N) (rs:N)`, followed by
/// `{bg:#RRGGBB}` and `{ref:id}` when set, and separated by ` | `.
pub fn describe(table: &Table) -> String {
    let mut out = String::new();

    if !table.title.is_empty() {
        let _ = writeln!(out, "Table: {}", table.title);
    }

    let settings = &table.settings;
    let _ = writeln!(
        out,
        "  Settings: EdgeColor: '{}', EdgeThickness: {}, DefaultCellBG: '{}', TableBG: '{}'",
        color_or_empty(settings.edge_color),
        settings.edge_thickness,
        color_or_empty(settings.cell_background),
        color_or_empty(settings.table_background),
    );

    for row in &table.rows {
        let line = row
            .cells
            .iter()
            .map(describe_cell)
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn describe_cell(cell: &Cell) -> String {
    let mut parts = Vec::new();
    if let Some(title) = cell.title() {
        parts.push(format!("[{title}]"));
    }
    if let Some(content) = cell.content() {
        parts.push(content.to_string());
    }
    parts.push(format!("(cs:{})", cell.colspan));
    parts.push(format!("(rs:{})", cell.rowspan));
    if let Some(bg) = cell.background {
        parts.push(format!("{{bg:{bg}}}"));
    }
    if let Some(reference) = &cell.table_ref {
        parts.push(format!("{{ref:{}}}", reference.id));
    }
    parts.join(" ")
}

fn color_or_empty(color: Option<Color>) -> String {
    color.map(|c| c.to_string()).unwrap_or_default()
}
