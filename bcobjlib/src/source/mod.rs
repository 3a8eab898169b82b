//! Source discovery: find files to scan.
//!
//! This module handles the first stage of the pipeline - discovering which
//! AL files to scan. Files are selected by suffix (`.al`, any case) and
//! optional include/exclude glob patterns.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bcobjlib::source::{discover_files, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/.alpackages/**")?;
//! let found = discover_files("./app", true, &filter)?;
//! ```

pub mod filter;

pub use filter::{check_root, discover_files, is_al_file, Discovery, FilterConfig};
