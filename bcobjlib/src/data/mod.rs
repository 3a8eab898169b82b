//! Data collection: classify lines and scan files.
//!
//! This module handles the core of the pipeline - turning AL source text
//! into declaration records. It provides:
//!
//! - **Kinds**: The supported object kinds (`ObjectKind`)
//! - **Classification**: Per-line comment tracking and declaration matching
//! - **Scanning**: Stream a file through the classifier (`scan_file`)
//! - **Walking**: Scan a whole directory tree (`scan_directory`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use bcobjlib::data::{scan_directory_with, ScanOptions};
//!
//! let report = scan_directory_with("./app", &ScanOptions::new().recursive(true))?;
//! println!("Found {} objects", report.declarations.len());
//! ```

pub mod classifier;
pub mod declaration;
pub mod kind;
pub mod scanner;
pub mod walker;

pub use classifier::{Classification, CommentState, LineClassifier};
pub use declaration::Declaration;
pub use kind::ObjectKind;
pub use scanner::scan_file;
pub use walker::{
    scan_directory, scan_directory_using, scan_directory_with, ScanFailure, ScanOptions,
    ScanReport,
};
