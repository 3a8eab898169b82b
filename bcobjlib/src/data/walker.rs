//! Tree walker: scan every AL file under a root directory.
//!
//! Files are discovered in sorted path order and scanned one by one (or on a
//! bounded worker pool). A file that fails to scan is reported in
//! [`ScanReport::failures`] and never aborts the walk. Only problems with the
//! root itself are returned as errors.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::BcobjError;
use crate::source::filter::{discover_files, FilterConfig};
use crate::Result;

use super::classifier::LineClassifier;
use super::declaration::Declaration;

/// Options for scanning a directory.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Descend into subdirectories of the root
    pub recursive: bool,
    /// File filter configuration
    pub filter: FilterConfig,
    /// Number of scan workers (1 = sequential, 0 = one per available CPU)
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            filter: FilterConfig::new(),
            jobs: 1,
        }
    }
}

impl ScanOptions {
    /// Create new default options (recursive, no filter, sequential).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to descend into subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the number of scan workers.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    fn worker_count(&self) -> usize {
        match self.jobs {
            0 => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            n => n,
        }
    }
}

/// A file or directory that was skipped during a scan.
#[derive(Debug)]
pub struct ScanFailure {
    /// Path that failed
    pub path: PathBuf,
    /// Why it failed
    pub error: BcobjError,
}

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Declarations in traversal order (files sorted by path, lines in order)
    pub declarations: Vec<Declaration>,
    /// Number of files scanned successfully
    pub files_scanned: usize,
    /// Files and directories that could not be read
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Whether every discovered file was scanned.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Scan a directory for AL object declarations.
///
/// Per-file failures are logged and dropped; use [`scan_directory_with`]
/// to inspect them.
///
/// # Example
///
/// ```rust
/// use bcobjlib::scan_directory;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::create_dir(dir.path().join("src")).unwrap();
/// fs::write(dir.path().join("App.Codeunit.al"), "codeunit 50100 \"App\"\n").unwrap();
/// fs::write(dir.path().join("src/Shipping.Interface.al"), "interface \"IShipping\"\n").unwrap();
///
/// assert_eq!(scan_directory(dir.path(), false).unwrap().len(), 1);
/// assert_eq!(scan_directory(dir.path(), true).unwrap().len(), 2);
/// ```
pub fn scan_directory(root: impl AsRef<Path>, recursive: bool) -> Result<Vec<Declaration>> {
    let report = scan_directory_with(root, &ScanOptions::new().recursive(recursive))?;
    Ok(report.declarations)
}

/// Scan a directory with full options, returning declarations and failures.
pub fn scan_directory_with(root: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanReport> {
    let classifier = LineClassifier::new()?;
    scan_directory_using(&classifier, root, options)
}

/// Scan a directory with an already compiled classifier.
pub fn scan_directory_using(
    classifier: &LineClassifier,
    root: impl AsRef<Path>,
    options: &ScanOptions,
) -> Result<ScanReport> {
    let root = root.as_ref();
    let discovery = discover_files(root, options.recursive, &options.filter)?;
    debug!(
        root = %root.display(),
        recursive = options.recursive,
        files = discovery.files.len(),
        "discovered AL files"
    );

    let mut report = ScanReport::default();
    for error in discovery.errors {
        let path = match &error {
            BcobjError::Walk { path, .. } => path.clone(),
            _ => root.to_path_buf(),
        };
        report.failures.push(ScanFailure { path, error });
    }

    let results = scan_all(classifier, &discovery.files, options.worker_count())?;

    for (path, result) in results {
        match result {
            Ok(declarations) => {
                report.files_scanned += 1;
                report.declarations.extend(declarations);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable file");
                report.failures.push(ScanFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

type FileResult<'a> = (&'a Path, Result<Vec<Declaration>>);

/// Scan every file, returning per-file results in the order of `files`.
fn scan_all<'a>(
    classifier: &LineClassifier,
    files: &'a [PathBuf],
    workers: usize,
) -> Result<Vec<FileResult<'a>>> {
    if workers <= 1 || files.len() <= 1 {
        return Ok(files
            .iter()
            .map(|path| (path.as_path(), classifier.scan_file(path)))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| BcobjError::ThreadPool(e.to_string()))?;

    // Indexed collect keeps the input order regardless of completion order
    Ok(pool.install(|| {
        files
            .par_iter()
            .map(|path| (path.as_path(), classifier.scan_file(path)))
            .collect()
    }))
}
