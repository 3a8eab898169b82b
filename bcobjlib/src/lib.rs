//! # bcobjlib
//!
//! Scan Business Central AL source trees and count the objects they declare.
//!
//! ## Overview
//!
//! Every AL object starts with a declaration line such as
//! `table 50100 "My Custom Table"` or `interface "IMyInterface"`. This library
//! finds those lines while skipping comments and, importantly, references that
//! look like declarations (`table "PTE HS User" = X,` inside a permission set).
//!
//! The pipeline has four stages:
//!
//! - **source**: Discover `.al` files under a root, with glob filtering
//! - **data**: Classify lines and scan files into `Declaration` records
//! - **query**: Aggregate records into per-type counts (`Summary`)
//! - **output**: Table rows, JSON, Excel, PDF and CSV exports
//!
//! ## Example
//!
//! ```rust
//! use bcobjlib::{scan_directory, ObjectKind, Summary};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("Customer.Table.al"), r#"
//! table 50100 "My Custom Table"
//! {
//! }
//! "#).unwrap();
//! fs::write(dir.path().join("Perms.PermissionSet.al"), r#"
//! permissionset 50101 "My Perms"
//! {
//!     Permissions = table "My Custom Table" = X;
//! }
//! "#).unwrap();
//!
//! let found = scan_directory(dir.path(), true).unwrap();
//! assert_eq!(found.len(), 2);
//!
//! let summary = Summary::from_declarations(found);
//! assert_eq!(summary.count_of_type(ObjectKind::Table), 1);
//! assert_eq!(summary.count_of_type(ObjectKind::PermissionSet), 1);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    scan_directory, scan_directory_using, scan_directory_with, scan_file, Classification,
    CommentState, Declaration, LineClassifier, ObjectKind, ScanFailure, ScanOptions, ScanReport,
};
pub use error::BcobjError;
pub use output::{SummaryTable, TableRow};
pub use query::{ObjectCount, Summary};
pub use source::FilterConfig;

/// Result type for bcobjlib operations
pub type Result<T> = std::result::Result<T, BcobjError>;
