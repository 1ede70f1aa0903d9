//! Export of summary tables.

mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::summary::RowTable;

/// Output format for a [`RowTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Column-aligned plain text.
    Text,
    /// GitHub-flavored Markdown table.
    Markdown,
    Csv,
    Json,
}

impl TableFormat {
    /// Every format, in the order reports write them.
    pub const ALL: [TableFormat; 4] = [
        TableFormat::Text,
        TableFormat::Markdown,
        TableFormat::Csv,
        TableFormat::Json,
    ];

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Text => "txt",
            TableFormat::Markdown => "md",
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableFormat::Text => "text",
            TableFormat::Markdown => "markdown",
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for TableFormat {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(TableFormat::Text),
            "markdown" | "md" => Ok(TableFormat::Markdown),
            "csv" => Ok(TableFormat::Csv),
            "json" => Ok(TableFormat::Json),
            other => Err(StrataError::Configuration(format!(
                "unknown table format '{}'",
                other
            ))),
        }
    }
}

/// Render a table in the given format.
pub fn render(table: &RowTable, format: TableFormat) -> Result<String> {
    match format {
        TableFormat::Text => Ok(text::render_text(table)),
        TableFormat::Markdown => Ok(text::render_markdown(table)),
        TableFormat::Csv => render_csv(table),
        TableFormat::Json => Ok(serde_json::to_string_pretty(table)?),
    }
}

fn render_csv(table: &RowTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StrataError::Csv(csv::Error::from(e.into_error())))?;
    String::from_utf8(bytes)
        .map_err(|e| StrataError::Configuration(format!("table is not valid UTF-8: {}", e)))
}
