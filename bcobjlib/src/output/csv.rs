//! CSV spreadsheet export.
//!
//! A summary becomes two sheets: per-type counts (`<base>-summary.csv`) and
//! the full object list (`<base>.csv`).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::BcobjError;
use crate::output::table::TOTAL_LABEL;
use crate::query::summary::Summary;
use crate::Result;

/// Write `Object Type,Count` rows followed by the total.
pub fn write_counts<W: Write>(summary: &Summary, writer: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(["Object Type", "Count"])?;
    for c in &summary.counts_by_type {
        wtr.write_record([c.kind.as_str(), c.count.to_string().as_str()])?;
    }
    wtr.write_record([TOTAL_LABEL, summary.total_objects.to_string().as_str()])?;
    wtr.flush()?;
    Ok(())
}

/// Write one `Type,ID,Name,File Path` row per object, in scan order.
pub fn write_details<W: Write>(summary: &Summary, writer: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(["Type", "ID", "Name", "File Path"])?;
    for obj in &summary.objects {
        let path = obj.source_location.to_string_lossy();
        wtr.write_record([obj.kind.as_str(), obj.id.as_str(), obj.name.as_str(), &*path])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both sheets next to `base` (no extension).
///
/// Returns the paths written: the counts sheet, then the details sheet.
pub fn write_csv(summary: &Summary, base: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let base = base.as_ref().to_string_lossy().into_owned();
    let counts_path = PathBuf::from(format!("{base}-summary.csv"));
    let details_path = PathBuf::from(format!("{base}.csv"));

    write_counts(summary, create(&counts_path)?)?;
    write_details(summary, create(&details_path)?)?;

    Ok(vec![counts_path, details_path])
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| BcobjError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}
