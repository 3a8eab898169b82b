//! Line classifier for AL object declarations.
//!
//! Classification happens in two stages for every physical line:
//!
//! 1. **Comment tracking**: a coarse, line-granular tracker decides whether
//!    the line can hold a declaration at all. Any line touching a block
//!    comment marker (`/*` or `*/`) is consumed, as is every line between
//!    them, and lines starting with `//` are skipped.
//! 2. **Declaration matching**: two anchored patterns are tried in order.
//!    Kinds that require an ID must be written `keyword <digits> "name"`;
//!    kinds without one must be written `keyword "name"`.
//!
//! The two keyword sets are disjoint, so `table "PTE HS User" = X,` (a
//! reference inside a permission set body) matches neither pattern. Telling
//! declarations apart from references like this is what the classifier exists
//! for.
//!
//! The tracker does not understand markers inside string literals, nested
//! block comments, or code sharing a line with a marker. Such lines are
//! treated as comment lines.

use std::path::Path;

use regex::{Captures, Regex};

use crate::Result;

use super::declaration::Declaration;
use super::kind::ObjectKind;

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

/// Block comment tracking state, scoped to a single file.
///
/// This is a plain value: each call to [`LineClassifier::classify`] takes the
/// state for the current line and returns the state for the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentState {
    in_block: bool,
}

impl CommentState {
    /// State at the start of a file (outside any block comment).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scan is currently inside a block comment.
    pub fn in_block(&self) -> bool {
        self.in_block
    }

    /// Step over one line.
    ///
    /// Returns the state for the next line, and whether this line is
    /// eligible for declaration matching.
    pub fn advance(self, line: &str) -> (Self, bool) {
        let in_block = self.in_block || line.contains(BLOCK_OPEN);

        // A closing marker ends the block and consumes the whole line
        if line.contains(BLOCK_CLOSE) {
            return (Self { in_block: false }, false);
        }
        if in_block {
            return (Self { in_block: true }, false);
        }

        let eligible = !line.trim_start().starts_with(LINE_COMMENT);
        (Self { in_block: false }, eligible)
    }
}

/// Result of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `keyword <id> "name"` for a kind that requires an ID
    WithId {
        kind: ObjectKind,
        id: String,
        name: String,
    },
    /// `keyword "name"` for a kind without an ID
    WithoutId { kind: ObjectKind, name: String },
    /// Not a declaration (code, comment, reference, blank, ...)
    NoMatch,
}

impl Classification {
    /// Turn a match into a declaration record found in `source`.
    pub fn into_declaration(self, source: &Path) -> Option<Declaration> {
        match self {
            Classification::WithId { kind, id, name } => {
                Some(Declaration::new(kind, id, name, source))
            }
            Classification::WithoutId { kind, name } => {
                Some(Declaration::new(kind, String::new(), name, source))
            }
            Classification::NoMatch => None,
        }
    }
}

/// Compiled declaration matchers.
///
/// Build one per process (or per scan) and share it by reference; the
/// classifier is immutable and `Send + Sync`.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    with_id: Regex,
    without_id: Regex,
}

impl LineClassifier {
    /// Compile the declaration patterns.
    pub fn new() -> Result<Self> {
        // Only the keyword is case-insensitive. IDs are ASCII digits.
        let with_id = Regex::new(&format!(
            r#"^\s*(?i:({}))\s+([0-9]+)\s*"([^"]+)""#,
            keyword_alternation(&ObjectKind::REQUIRES_ID)
        ))?;
        let without_id = Regex::new(&format!(
            r#"^\s*(?i:({}))\s+"([^"]+)""#,
            keyword_alternation(&ObjectKind::WITHOUT_ID)
        ))?;

        Ok(Self {
            with_id,
            without_id,
        })
    }

    /// Classify one physical line given the comment state before it.
    ///
    /// Returns the classification and the state for the following line.
    pub fn classify(&self, line: &str, state: CommentState) -> (Classification, CommentState) {
        let (next, eligible) = state.advance(line);
        if !eligible {
            return (Classification::NoMatch, next);
        }
        (self.match_declaration(line), next)
    }

    /// Match a line against the declaration patterns, ignoring comments.
    pub fn match_declaration(&self, line: &str) -> Classification {
        if let Some(caps) = self.with_id.captures(line) {
            if let Some(found) = with_id_from(&caps) {
                return found;
            }
        }
        if let Some(caps) = self.without_id.captures(line) {
            if let Some(found) = without_id_from(&caps) {
                return found;
            }
        }
        Classification::NoMatch
    }
}

fn with_id_from(caps: &Captures<'_>) -> Option<Classification> {
    let kind = caps.get(1)?.as_str().parse().ok()?;
    Some(Classification::WithId {
        kind,
        id: caps.get(2)?.as_str().to_string(),
        name: caps.get(3)?.as_str().to_string(),
    })
}

fn without_id_from(caps: &Captures<'_>) -> Option<Classification> {
    let kind = caps.get(1)?.as_str().parse().ok()?;
    Some(Classification::WithoutId {
        kind,
        name: caps.get(2)?.as_str().to_string(),
    })
}

/// Build a regex alternation, longest keyword first so that a keyword which
/// prefixes another (`table`, `tableextension`) never shadows it.
fn keyword_alternation(kinds: &[ObjectKind]) -> String {
    let mut keywords: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
    keywords.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    keywords.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new().unwrap()
    }

    fn with_id(kind: ObjectKind, id: &str, name: &str) -> Classification {
        Classification::WithId {
            kind,
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn without_id(kind: ObjectKind, name: &str) -> Classification {
        Classification::WithoutId {
            kind,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_declarations_with_id() {
        let c = classifier();
        let cases = [
            (r#"table 50100 "My Custom Table""#, ObjectKind::Table, "My Custom Table"),
            (r#"codeunit 50100 "My Codeunit""#, ObjectKind::Codeunit, "My Codeunit"),
            (r#"page 50100 "My Page""#, ObjectKind::Page, "My Page"),
            (r#"report 50100 "My Report""#, ObjectKind::Report, "My Report"),
            (r#"xmlport 50100 "My XMLport""#, ObjectKind::XmlPort, "My XMLport"),
            (r#"query 50100 "My Query""#, ObjectKind::Query, "My Query"),
            (r#"enum 50100 "My Enum""#, ObjectKind::Enum, "My Enum"),
            (
                r#"permissionset 50100 "My Permission Set""#,
                ObjectKind::PermissionSet,
                "My Permission Set",
            ),
        ];

        for (line, kind, name) in cases {
            assert_eq!(c.match_declaration(line), with_id(kind, "50100", name), "{line}");
        }
    }

    #[test]
    fn test_extensions_are_not_shadowed_by_base_keyword() {
        let c = classifier();
        let cases = [
            (
                r#"tableextension 50100 "My Table Ext" extends "Customer""#,
                ObjectKind::TableExtension,
                "My Table Ext",
            ),
            (
                r#"pageextension 50100 "My Page Ext" extends "Customer Card""#,
                ObjectKind::PageExtension,
                "My Page Ext",
            ),
            (
                r#"reportextension 50100 "My Report Ext" extends "Standard Sales - Invoice""#,
                ObjectKind::ReportExtension,
                "My Report Ext",
            ),
            (
                r#"enumextension 50100 "My Enum Ext" extends "Sales Document Type""#,
                ObjectKind::EnumExtension,
                "My Enum Ext",
            ),
            (
                r#"permissionsetextension 50100 "My Perm Set Ext" extends "D365 BASIC""#,
                ObjectKind::PermissionSetExtension,
                "My Perm Set Ext",
            ),
        ];

        for (line, kind, name) in cases {
            assert_eq!(c.match_declaration(line), with_id(kind, "50100", name), "{line}");
        }
    }

    #[test]
    fn test_declarations_without_id() {
        let c = classifier();
        assert_eq!(
            c.match_declaration(r#"interface "IMyInterface""#),
            without_id(ObjectKind::Interface, "IMyInterface")
        );
        assert_eq!(
            c.match_declaration(r#"profile "My Profile""#),
            without_id(ObjectKind::Profile, "My Profile")
        );
        assert_eq!(
            c.match_declaration(r#"controladdin "My Control Addin""#),
            without_id(ObjectKind::ControlAddIn, "My Control Addin")
        );
        assert_eq!(
            c.match_declaration(r#"entitlement "My Entitlement""#),
            without_id(ObjectKind::Entitlement, "My Entitlement")
        );
    }

    #[test]
    fn test_keyword_case_insensitive_name_verbatim() {
        let c = classifier();
        assert_eq!(
            c.match_declaration(r#"TABLE 50100 "My Table""#),
            with_id(ObjectKind::Table, "50100", "My Table")
        );
        assert_eq!(
            c.match_declaration(r#"CodeUnit 50100 "sAlEs-PoSt""#),
            with_id(ObjectKind::Codeunit, "50100", "sAlEs-PoSt")
        );
        assert_eq!(
            c.match_declaration(r#"Interface "IMyInterface""#),
            without_id(ObjectKind::Interface, "IMyInterface")
        );
    }

    #[test]
    fn test_leading_whitespace() {
        let c = classifier();
        assert_eq!(
            c.match_declaration(r#"    table 50100 "My Table""#),
            with_id(ObjectKind::Table, "50100", "My Table")
        );
        assert_eq!(
            c.match_declaration("\tinterface \"I\""),
            without_id(ObjectKind::Interface, "I")
        );
    }

    #[test]
    fn test_references_are_not_declarations() {
        let c = classifier();
        let lines = [
            r#"        table "PTE HS User" = X,"#,
            r#"        tabledata "PTE HS User" = RIMD,"#,
            r#"        codeunit "My Codeunit" = X,"#,
            r#"        page "My Page" = X,"#,
            r#"        report "My Report" = X,"#,
            r#"        query "My Query" = X,"#,
            r#"        xmlport "My XMLport" = X,"#,
            r#"table "No Id""#,
        ];

        for line in lines {
            assert_eq!(c.match_declaration(line), Classification::NoMatch, "{line}");
        }
    }

    #[test]
    fn test_every_requires_id_keyword_needs_digits() {
        let c = classifier();
        for kind in ObjectKind::REQUIRES_ID {
            let line = format!("{} \"Referenced\" = X,", kind.as_str());
            assert_eq!(c.match_declaration(&line), Classification::NoMatch, "{line}");
        }
    }

    #[test]
    fn test_without_id_keyword_rejects_digits() {
        let c = classifier();
        for kind in ObjectKind::WITHOUT_ID {
            let line = format!("{} 50100 \"Name\"", kind.as_str());
            assert_eq!(c.match_declaration(&line), Classification::NoMatch, "{line}");
        }
    }

    #[test]
    fn test_ids_are_ascii_digits() {
        let c = classifier();
        for kind in ObjectKind::REQUIRES_ID {
            let line = format!("{} 7 \"Name\"", kind.as_str());
            match c.match_declaration(&line) {
                Classification::WithId { kind: found, id, .. } => {
                    assert_eq!(found, kind);
                    assert!(!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()));
                }
                other => panic!("expected WithId for {line}, got {other:?}"),
            }
        }
        // Fullwidth digits are not decimal IDs
        assert_eq!(
            c.match_declaration("table \u{ff15}\u{ff10} \"Name\""),
            Classification::NoMatch
        );
    }

    #[test]
    fn test_non_declarations() {
        let c = classifier();
        let lines = [
            "var myVar: Integer;",
            "",
            r#"    MyTable: Record "Customer";"#,
            r#"    MyCU: Codeunit "Sales-Post";"#,
            r#"tablex 50100 "Nope""#,
            r#"table 50100 """#,
            r#"table50100 "Glued""#,
            r#"x table 50100 "Not At Start""#,
        ];

        for line in lines {
            assert_eq!(c.match_declaration(line), Classification::NoMatch, "{line:?}");
        }
    }

    #[test]
    fn test_classify_skips_line_comment() {
        let c = classifier();
        let (result, state) = c.classify(r#"// table 50100 "Commented Table""#, CommentState::new());
        assert_eq!(result, Classification::NoMatch);
        assert!(!state.in_block());

        let (result, _) = c.classify(r#"    // page 1 "Indented""#, CommentState::new());
        assert_eq!(result, Classification::NoMatch);
    }

    #[test]
    fn test_classify_block_comment_lines() {
        let c = classifier();
        let lines = [
            ("/*", false, true),
            (r#"codeunit 99999 "Should Be Ignored""#, false, true),
            ("*/", false, false),
            (r#"codeunit 50101 "Sales Management""#, true, false),
        ];

        let mut state = CommentState::new();
        for (line, expect_match, expect_in_block) in lines {
            let (result, next) = c.classify(line, state);
            assert_eq!(result != Classification::NoMatch, expect_match, "{line}");
            assert_eq!(next.in_block(), expect_in_block, "{line}");
            state = next;
        }
    }

    #[test]
    fn test_classify_marker_lines_are_consumed() {
        let c = classifier();

        // Declaration before an opening marker
        let (result, state) = c.classify(r#"table 1 "A" /* note"#, CommentState::new());
        assert_eq!(result, Classification::NoMatch);
        assert!(state.in_block());

        // Declaration after a closing marker
        let (result, state) = c.classify(r#"*/ table 2 "B""#, state);
        assert_eq!(result, Classification::NoMatch);
        assert!(!state.in_block());

        // Single-line block comment
        let (result, state) = c.classify(r#"/* x */ table 3 "C""#, CommentState::new());
        assert_eq!(result, Classification::NoMatch);
        assert!(!state.in_block());
    }

    #[test]
    fn test_into_declaration() {
        let source = Path::new("app/Customer.Table.al");
        let decl = with_id(ObjectKind::Table, "50100", "My Custom Table")
            .into_declaration(source)
            .unwrap();
        assert_eq!(decl.kind, ObjectKind::Table);
        assert_eq!(decl.id, "50100");
        assert_eq!(decl.name, "My Custom Table");
        assert_eq!(decl.source_location, source);

        let decl = without_id(ObjectKind::Interface, "IMyInterface")
            .into_declaration(source)
            .unwrap();
        assert_eq!(decl.id, "");
        assert!(Classification::NoMatch.into_declaration(source).is_none());
    }

    #[test]
    fn test_keyword_alternation_longest_first() {
        let alt = keyword_alternation(&ObjectKind::REQUIRES_ID);
        let keywords: Vec<&str> = alt.split('|').collect();
        let pos = |k: &str| keywords.iter().position(|x| *x == k).unwrap();

        assert!(pos("tableextension") < pos("table"));
        assert!(pos("permissionsetextension") < pos("permissionset"));
        assert!(pos("enumextension") < pos("enum"));
    }
}
