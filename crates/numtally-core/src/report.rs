//! Report rendering.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::FetchError;
use crate::extract::NumericToken;
use crate::models::report::{Report, SumDisplay};

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Write the human-readable report.
pub fn write_text<W: Write>(report: &Report, show_preview: bool, out: &mut W) -> io::Result<()> {
    if show_preview {
        writeln!(
            out,
            "=== {} (first {} characters) ===\n",
            report.resource, report.preview_chars
        )?;
        writeln!(out, "{}", report.preview)?;
        writeln!(out, "\n=== end snippet ===\n")?;
    }

    match report.aggregate() {
        Some(aggregate) => {
            writeln!(
                out,
                "Found {} numeric tokens in {}.",
                aggregate.count, report.resource
            )?;
            writeln!(out, "Sum of numbers: {}", aggregate.display())?;
        }
        None => writeln!(out, "No numbers found in {}.", report.resource)?,
    }
    Ok(())
}

/// Write the message shown when the source could not be read.
pub fn write_failure<W: Write>(resource: &str, error: &FetchError, out: &mut W) -> io::Result<()> {
    writeln!(out, "Failed to fetch {}: {}", resource, error)
}

/// Machine-readable view of a report.
#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub resource: &'a str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<SumDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_kind: Option<&'static str>,
    pub tokens: &'a [NumericToken],
}

impl<'a> ReportSummary<'a> {
    pub fn new(report: &'a Report) -> Self {
        let display = report.aggregate().map(|a| a.display());
        Self {
            resource: &report.resource,
            count: report.tokens().len(),
            sum: display,
            sum_kind: display.map(|d| d.kind()),
            tokens: report.tokens(),
        }
    }
}

/// Serialize a report summary as pretty JSON.
pub fn to_json(report: &Report) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(&ReportSummary::new(report))?)
}
