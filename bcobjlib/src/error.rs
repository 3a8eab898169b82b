//! Error types for bcobjlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning AL sources or exporting results
#[derive(Error, Debug)]
pub enum BcobjError {
    /// Failed to open or read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Scan root does not exist
    #[error("path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Scan root exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Scan root could not be enumerated
    #[error("cannot read directory '{path}': {source}")]
    RootInaccessible {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A directory below the root could not be walked
    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Unknown object type keyword
    #[error("unknown object type: {0}")]
    UnknownKind(String),

    /// Declaration matcher failed to compile
    #[error("invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Worker pool could not be started
    #[error("failed to start scan workers: {0}")]
    ThreadPool(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Excel workbook could not be built
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF document could not be built
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Failed to write an export file
    #[error("failed to write '{path}': {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
