//! Output formatting: present summaries as tables and export files.
//!
//! - **SummaryTable**: Table-ready rows with a shared label width
//! - **JSON**: Pretty-printed summary (`to_json_string`, `write_json`)
//! - **Excel**: Summary and Details sheets (`write_xlsx`)
//! - **PDF**: Counts page followed by paginated details (`write_pdf`)
//! - **CSV**: Counts and details sheets as plain text (`write_csv`)

pub mod csv;
pub mod json;
pub mod pdf;
pub mod table;
pub mod xlsx;

pub use self::csv::{write_counts, write_csv, write_details};
pub use json::{to_json_string, write_json};
pub use pdf::{to_pdf_bytes, write_pdf};
pub use table::{SummaryTable, TableRow, SUMMARY_TITLE, TOTAL_LABEL};
pub use xlsx::{to_xlsx_bytes, write_xlsx};
