//! Template rendering for CLI output using outstanding

use bcobjlib::{ObjectKind, SummaryTable};
use console::Style;
use outstanding::{render_with_output, Theme};
use serde::Serialize;

/// Include templates at compile time
const SUMMARY_TEMPLATE: &str = include_str!("../templates/summary.jinja");
const TYPES_TEMPLATE: &str = include_str!("../templates/types.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Width of the banner and separator lines
const BANNER_WIDTH: usize = 43;

/// Indent of the title inside the banner
const TITLE_INDENT: usize = 7;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded label (left-aligned, padded to the table's label width)
    label: String,
    count: usize,
}

/// Data context for the summary template
#[derive(Debug, Serialize)]
struct SummaryContext {
    banner: String,
    separator: String,
    title_indent: String,
    title: String,
    rows: Vec<TemplateRow>,
    total: TemplateRow,
}

#[derive(Debug, Serialize)]
struct KindRow {
    label: String,
    id: &'static str,
}

#[derive(Debug, Serialize)]
struct TypesContext {
    kinds: Vec<KindRow>,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("total", Style::new().bold())
        .add("muted", Style::new().dim())
}

/// Templates end their loops on a line of their own; keep exactly one newline.
fn finish(rendered: &str) -> String {
    format!("{}\n", rendered.trim_end())
}

/// Render the summary table as console text.
///
/// Title and total are bold when the output mode allows styling.
pub fn render_summary(
    table: &SummaryTable,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let width = table.label_width;
    let context = SummaryContext {
        banner: "═".repeat(BANNER_WIDTH),
        separator: "─".repeat(BANNER_WIDTH),
        title_indent: " ".repeat(TITLE_INDENT),
        title: table.title.clone(),
        rows: table
            .rows
            .iter()
            .map(|row| TemplateRow {
                label: row.padded_label(width),
                count: row.count,
            })
            .collect(),
        total: TemplateRow {
            label: table.footer.padded_label(width),
            count: table.footer.count,
        },
    };

    let rendered = render_with_output(SUMMARY_TEMPLATE, &context, &create_theme(), output_mode)?;
    Ok(format!("\n{}", finish(&rendered)))
}

/// List supported object types and whether they carry an ID
pub fn render_types(output_mode: OutputMode) -> Result<String, Box<dyn std::error::Error>> {
    let width = ObjectKind::keywords().map(str::len).max().unwrap_or(0);
    let context = TypesContext {
        kinds: ObjectKind::ALL
            .iter()
            .map(|kind| KindRow {
                label: format!("{:<width$}", kind.as_str(), width = width),
                id: if kind.requires_id() { "ID" } else { "no ID" },
            })
            .collect(),
    };

    let rendered = render_with_output(TYPES_TEMPLATE, &context, &create_theme(), output_mode)?;
    Ok(finish(&rendered))
}

/// Confirmation line for an exported file
pub fn exported(path: &str) -> String {
    format!("{} Exported to {}", Style::new().green().apply_to("✓"), path)
}
