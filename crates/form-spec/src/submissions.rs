//! Tabular view of collected submissions for a form's owner.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::document::Document;
use crate::field::FieldType;
use crate::validate::Values;

/// One stored submission, already decoded into its value map.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRow {
    pub values: Values,
    pub submitted_at: OffsetDateTime,
}

impl SubmittedRow {
    /// Decodes stored submission content (a JSON object of strings).
    pub fn from_content(content: &str, submitted_at: OffsetDateTime) -> Result<Self, serde_json::Error> {
        Ok(Self {
            values: serde_json::from_str(content)?,
            submitted_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    /// `dd/MM/yyyy`, or the raw value when it is not a recognizable date.
    Date(String),
    Checkbox(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) | Cell::Date(text) => f.write_str(text),
            Cell::Checkbox(true) => f.write_str("[x]"),
            Cell::Checkbox(false) => f.write_str("[ ]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: BTreeMap<String, Cell>,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionTable {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
}

impl SubmissionTable {
    /// Columns are the data-entry elements in document order; values for ids
    /// no longer in the form are dropped.
    pub fn build(document: &Document, submissions: &[SubmittedRow]) -> Self {
        let columns = document
            .elements()
            .iter()
            .filter(|element| element.kind().collects_value())
            .map(|element| Column {
                id: element.id().to_string(),
                label: element.attr_str("label").unwrap_or(element.id()).to_string(),
                required: element.is_required(),
                kind: element.kind(),
            })
            .collect::<Vec<_>>();

        let rows = submissions
            .iter()
            .map(|submission| TableRow {
                cells: columns
                    .iter()
                    .map(|column| {
                        let raw = submission
                            .values
                            .get(&column.id)
                            .map(String::as_str)
                            .unwrap_or("");
                        (column.id.clone(), cell(column.kind, raw))
                    })
                    .collect(),
                submitted_at: submission.submitted_at,
            })
            .collect();

        Self { columns, rows }
    }

    pub fn render_text(&self) -> String {
        let mut header: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.label.clone())
            .collect();
        header.push("Submitted at".to_string());

        let stamp = format_description!("[year]-[month]-[day] [hour]:[minute]");
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut line: Vec<String> = self
                    .columns
                    .iter()
                    .map(|column| {
                        row.cells
                            .get(&column.id)
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    })
                    .collect();
                line.push(
                    row.submitted_at
                        .format(stamp)
                        .unwrap_or_else(|_| row.submitted_at.to_string()),
                );
                line
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (width, text) in widths.iter_mut().zip(line) {
                *width = (*width).max(text.chars().count());
            }
        }

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(text, &width)| format!("{text:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_line(&header)];
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        if body.is_empty() {
            lines.push("No rows".to_string());
        }
        lines.extend(body.iter().map(|line| format_line(line)));
        lines.join("\n")
    }
}

fn cell(kind: FieldType, raw: &str) -> Cell {
    match kind {
        FieldType::CheckboxField => Cell::Checkbox(raw == "true"),
        FieldType::DateField => Cell::Date(format_date(raw)),
        _ => Cell::Text(raw.to_string()),
    }
}

/// Renders a submitted date as `dd/MM/yyyy`. Accepts RFC 3339, plain
/// `yyyy-mm-dd`, the browser's UTC string and RFC 2822; anything else is
/// shown as submitted.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_date(trimmed) {
        Some(date) => date
            .format(format_description!("[day]/[month]/[year]"))
            .unwrap_or_else(|_| trimmed.to_string()),
        None => trimmed.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at.date());
    }
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    let utc_string = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    if let Ok(at) = PrimitiveDateTime::parse(raw, utc_string) {
        return Some(at.date());
    }
    OffsetDateTime::parse(raw, &Rfc2822).ok().map(|at| at.date())
}
