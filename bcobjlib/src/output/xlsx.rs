//! Excel workbook export.
//!
//! The workbook has two sheets. `Summary` holds the title, the per-type counts
//! and a bold total row. `Details` lists every object in scan order.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::BcobjError;
use crate::output::table::{SUMMARY_TITLE, TOTAL_LABEL};
use crate::query::summary::Summary;
use crate::Result;

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAILS_SHEET: &str = "Details";

/// Header fill shared by both sheets
const HEADER_FILL: u32 = 0x4472C4;

/// Zero-based row of the counts header on the summary sheet
const COUNTS_HEADER_ROW: u32 = 2;

/// Zero-based row of the total on the summary sheet: one blank row after the counts.
pub fn total_row(type_count: usize) -> u32 {
    COUNTS_HEADER_ROW + 1 + type_count as u32 + 1
}

fn build_workbook(summary: &Summary) -> Result<Workbook> {
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL));
    let title = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();

    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.write_string_with_format(0, 0, SUMMARY_TITLE, &title)?;
    sheet.write_string_with_format(COUNTS_HEADER_ROW, 0, "Object Type", &header)?;
    sheet.write_string_with_format(COUNTS_HEADER_ROW, 1, "Count", &header)?;

    let mut row = COUNTS_HEADER_ROW + 1;
    for c in &summary.counts_by_type {
        sheet.write_string(row, 0, c.kind.as_str())?;
        sheet.write_number(row, 1, c.count as f64)?;
        row += 1;
    }

    let total = total_row(summary.counts_by_type.len());
    sheet.write_string_with_format(total, 0, TOTAL_LABEL, &bold)?;
    sheet.write_number_with_format(total, 1, summary.total_objects as f64, &bold)?;
    sheet.set_column_width(0, 25)?;
    sheet.set_column_width(1, 12)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(DETAILS_SHEET)?;
    for (col, name) in ["Type", "ID", "Name", "File Path"].into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (i, obj) in summary.objects.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, obj.kind.as_str())?;
        sheet.write_string(row, 1, obj.id.as_str())?;
        sheet.write_string(row, 2, obj.name.as_str())?;
        sheet.write_string(row, 3, obj.source_location.to_string_lossy().into_owned())?;
    }

    for (col, width) in [20, 10, 40, 60].into_iter().enumerate() {
        sheet.set_column_width(col as u16, width)?;
    }

    Ok(workbook)
}

/// Serialize a summary as an xlsx workbook in memory.
pub fn to_xlsx_bytes(summary: &Summary) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(summary)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write a summary to `path` as an xlsx workbook.
pub fn write_xlsx(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = to_xlsx_bytes(summary)?;
    fs::write(path, data).map_err(|e| BcobjError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::declaration::Declaration;
    use crate::data::kind::ObjectKind;
    use tempfile::tempdir;

    fn sample() -> Summary {
        Summary::from_declarations(vec![
            Declaration::new(ObjectKind::Table, "50100", "Test Table", Path::new("a.al")),
            Declaration::new(ObjectKind::Page, "50100", "Test Page", Path::new("b.al")),
            Declaration::new(ObjectKind::Interface, "", "ITest", Path::new("c.al")),
        ])
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_total_row_leaves_blank_line() {
        // Title on row 0, header on row 2, counts from row 3, then a blank row
        assert_eq!(total_row(0), 4);
        assert_eq!(total_row(3), 7);
    }

    #[test]
    fn test_workbook_has_two_sheets() {
        let bytes = to_xlsx_bytes(&sample()).unwrap();

        assert!(bytes.starts_with(b"PK"));
        assert!(contains(&bytes, b"xl/worksheets/sheet1.xml"));
        assert!(contains(&bytes, b"xl/worksheets/sheet2.xml"));
        assert!(!contains(&bytes, b"xl/worksheets/sheet3.xml"));
    }

    #[test]
    fn test_empty_summary_workbook() {
        let bytes = to_xlsx_bytes(&Summary::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_xlsx() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("objects.xlsx");

        write_xlsx(&sample(), &path).unwrap();

        let written = fs::read(&path).unwrap();
        assert!(written.starts_with(b"PK"));
    }

    #[test]
    fn test_write_xlsx_bad_path() {
        let result = write_xlsx(&sample(), "/nonexistent/dir/out.xlsx");
        assert!(matches!(result, Err(BcobjError::Export { .. })));
    }
}
