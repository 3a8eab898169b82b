//! Query processing: group, count and sort declarations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bcobjlib::query::Summary;
//!
//! let summary = Summary::from_declarations(declarations);
//! for c in &summary.counts_by_type {
//!     println!("{}: {}", c.kind, c.count);
//! }
//! ```

pub mod summary;

pub use summary::{ObjectCount, Summary};
