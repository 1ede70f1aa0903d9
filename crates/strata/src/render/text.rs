//! Plain-text and Markdown table layouts.

use unicode_width::UnicodeWidthStr;

use crate::summary::RowTable;

/// Gap between text columns.
const COLUMN_GAP: &str = "  ";

fn column_widths(header: &[String], records: &[Vec<&str>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for record in records {
        for (width, cell) in widths.iter_mut().zip(record) {
            *width = (*width).max(cell.width());
        }
    }
    widths
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

fn text_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| pad(cell.as_ref(), width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

/// Column-aligned text with a rule under the header.
pub(super) fn render_text(table: &RowTable) -> String {
    let header = table.headers();
    let records: Vec<Vec<&str>> = table.records().collect();
    let widths = column_widths(&header, &records);

    let mut out = String::new();
    out.push_str(&text_line(&header, &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&text_line(&rule, &widths));
    out.push('\n');
    for record in &records {
        out.push_str(&text_line(record, &widths));
        out.push('\n');
    }
    out
}

fn escape_markdown(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn markdown_line<S: AsRef<str>>(cells: &[S]) -> String {
    let inner = cells
        .iter()
        .map(|c| escape_markdown(c.as_ref()))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("| {} |", inner)
}

/// Markdown table: label column left-aligned, group columns centered.
pub(super) fn render_markdown(table: &RowTable) -> String {
    let header = table.headers();
    let mut out = markdown_line(&header);
    out.push('\n');

    let align: Vec<&str> = std::iter::once(":---")
        .chain(std::iter::repeat_n(":---:", table.groups.len()))
        .collect();
    out.push_str(&markdown_line(&align));
    out.push('\n');

    for record in table.records() {
        out.push_str(&markdown_line(&record));
        out.push('\n');
    }
    out
}
