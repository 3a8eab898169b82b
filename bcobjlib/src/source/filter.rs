//! AL file filtering and discovery with glob pattern support.
//!
//! Discovery walks a root directory (optionally only its top level) and
//! returns every `.al` file that passes the filter, sorted by path so that
//! scans are deterministic.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::BcobjError;
use crate::Result;

/// File suffix of AL source files (matched case-insensitively).
pub const AL_EXTENSION: &str = ".al";

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all .al files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all .al files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. Its file name ends in `.al` (any case)
    /// 2. It matches at least one include pattern (or include is empty)
    /// 3. It doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        if !is_al_file(path) {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| BcobjError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Whether the file name carries the AL suffix, ignoring ASCII case.
pub fn is_al_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|name| name.ends_with(AL_EXTENSION))
}

/// Result of enumerating a root directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Matching files, sorted by path
    pub files: Vec<PathBuf>,
    /// Directories below the root that could not be read
    pub errors: Vec<BcobjError>,
}

/// Check that `root` exists, is a directory and can be enumerated.
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(BcobjError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(BcobjError::NotADirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|e| BcobjError::RootInaccessible {
        path: root.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Regular files, and symlinks that do not resolve to a directory.
///
/// Linked directories are never descended into; a dangling link is kept so
/// the failed read shows up in the scan report.
fn is_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// Discover AL source files under `root`.
///
/// With `recursive` false only the root's direct entries are considered.
/// Symbolic links to directories are not followed.
/// Fails only when the root itself cannot be enumerated; unreadable
/// subdirectories are reported in [`Discovery::errors`] and skipped.
pub fn discover_files(
    root: impl AsRef<Path>,
    recursive: bool,
    filter: &FilterConfig,
) -> Result<Discovery> {
    let root = root.as_ref();
    check_root(root)?;

    let mut walker = WalkDir::new(root);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut discovery = Discovery::default();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                discovery.errors.push(BcobjError::Walk {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if is_candidate(&entry) && filter.matches(entry.path()) {
            discovery.files.push(entry.into_path());
        }
    }

    // Sort for deterministic output
    discovery.files.sort();

    Ok(discovery)
}
