//! Table-ready data structures for summary output.
//!
//! `SummaryTable` is a pure presentation layer: it turns a [`Summary`] into
//! labelled rows with a shared label width. Renderers (console text, styled
//! terminal output) only lay these out; no counting or sorting happens here.

use serde::{Deserialize, Serialize};

use crate::query::summary::Summary;

/// Title shown above the counts.
pub const SUMMARY_TITLE: &str = "BC Objects Summary";

/// Label of the footer row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Object type keyword, or `TOTAL`
    pub label: String,
    /// Number of objects
    pub count: usize,
}

impl TableRow {
    /// The label padded on the right to `width`.
    pub fn padded_label(&self, width: usize) -> String {
        format!("{:<width$}", self.label, width = width)
    }
}

/// Table-ready summary data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub title: String,
    /// One row per object type, in summary order
    pub rows: Vec<TableRow>,
    /// Total row
    pub footer: TableRow,
    /// Width of the label column (at least the footer label)
    pub label_width: usize,
}

impl SummaryTable {
    /// Build a table from an aggregated summary.
    pub fn from_summary(summary: &Summary) -> Self {
        let rows: Vec<TableRow> = summary
            .counts_by_type
            .iter()
            .map(|c| TableRow {
                label: c.kind.as_str().to_string(),
                count: c.count,
            })
            .collect();

        let label_width = rows
            .iter()
            .map(|r| r.label.len())
            .chain(std::iter::once(TOTAL_LABEL.len()))
            .max()
            .unwrap_or(TOTAL_LABEL.len());

        Self {
            title: SUMMARY_TITLE.to_string(),
            rows,
            footer: TableRow {
                label: TOTAL_LABEL.to_string(),
                count: summary.total_objects,
            },
            label_width,
        }
    }
}
