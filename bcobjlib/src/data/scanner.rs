//! File scanner: stream a file's lines through the classifier.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::BcobjError;
use crate::Result;

use super::classifier::{CommentState, LineClassifier};
use super::declaration::Declaration;

impl LineClassifier {
    /// Scan one AL file and return its declarations in line order.
    ///
    /// Fails the whole file if it cannot be opened or a read fails partway;
    /// no partial result is returned. Bytes that are not valid UTF-8 (legacy
    /// cp1252 captions, for instance) are decoded lossily and do not fail it.
    pub fn scan_file(&self, path: impl AsRef<Path>) -> Result<Vec<Declaration>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BcobjError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let declarations = self.scan_reader(BufReader::new(file), path)?;
        debug!(
            path = %path.display(),
            declarations = declarations.len(),
            "scanned file"
        );
        Ok(declarations)
    }

    /// Scan any line-oriented reader, attributing records to `source`.
    ///
    /// Useful for testing without actual files.
    pub fn scan_reader<R: BufRead>(&self, mut reader: R, source: &Path) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        let mut state = CommentState::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| BcobjError::FileRead {
                    path: source.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            let (classification, next) = self.classify(&line, state);
            state = next;

            if let Some(decl) = classification.into_declaration(source) {
                declarations.push(decl);
            }
        }

        Ok(declarations)
    }
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scan a single AL file with a freshly compiled classifier.
///
/// # Example
///
/// ```rust
/// use bcobjlib::{scan_file, ObjectKind};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("Customer.Table.al");
/// fs::write(&path, "table 50100 \"My Custom Table\"\n{\n}\n").unwrap();
///
/// let found = scan_file(&path).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].kind, ObjectKind::Table);
/// assert_eq!(found[0].id, "50100");
/// ```
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<Declaration>> {
    LineClassifier::new()?.scan_file(path)
}
