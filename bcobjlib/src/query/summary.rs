//! Aggregate scanned declarations into per-type counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::declaration::Declaration;
use crate::data::kind::ObjectKind;

/// Number of declarations of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCount {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub count: usize,
}

/// Aggregated scan results.
///
/// `counts_by_type` is sorted by count (descending), then by type keyword.
/// `objects` and every list in `objects_by_type` keep scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_objects: usize,
    pub counts_by_type: Vec<ObjectCount>,
    pub objects: Vec<Declaration>,
    pub objects_by_type: BTreeMap<ObjectKind, Vec<Declaration>>,
}

impl Summary {
    /// Group and count declarations.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bcobjlib::{LineClassifier, ObjectKind, Summary};
    /// use std::io::Cursor;
    /// use std::path::Path;
    ///
    /// let classifier = LineClassifier::new().unwrap();
    /// let source = "table 1 \"A\"\ntable 2 \"B\"\npage 1 \"C\"\n";
    /// let found = classifier.scan_reader(Cursor::new(source), Path::new("x.al")).unwrap();
    ///
    /// let summary = Summary::from_declarations(found);
    /// assert_eq!(summary.total_objects, 3);
    /// assert_eq!(summary.counts_by_type[0].kind, ObjectKind::Table);
    /// assert_eq!(summary.count_of_type(ObjectKind::Page), 1);
    /// ```
    pub fn from_declarations(declarations: Vec<Declaration>) -> Self {
        let mut objects_by_type: BTreeMap<ObjectKind, Vec<Declaration>> = BTreeMap::new();
        for decl in &declarations {
            objects_by_type
                .entry(decl.kind)
                .or_default()
                .push(decl.clone());
        }

        let mut counts_by_type: Vec<ObjectCount> = objects_by_type
            .iter()
            .map(|(kind, objects)| ObjectCount {
                kind: *kind,
                count: objects.len(),
            })
            .collect();
        counts_by_type.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
        });

        Self {
            total_objects: declarations.len(),
            counts_by_type,
            objects: declarations,
            objects_by_type,
        }
    }

    /// Group and count only the listed kinds (an empty list keeps all).
    pub fn with_kinds(declarations: Vec<Declaration>, kinds: &[ObjectKind]) -> Self {
        if kinds.is_empty() {
            return Self::from_declarations(declarations);
        }
        let selected = declarations
            .into_iter()
            .filter(|d| kinds.contains(&d.kind))
            .collect();
        Self::from_declarations(selected)
    }

    /// All declarations of one kind, in scan order.
    pub fn objects_of_type(&self, kind: ObjectKind) -> &[Declaration] {
        self.objects_by_type
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of declarations of one kind.
    pub fn count_of_type(&self, kind: ObjectKind) -> usize {
        self.counts_by_type
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.total_objects == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn decl(kind: ObjectKind, id: &str, name: &str, file: &str) -> Declaration {
        Declaration::new(kind, id, name, Path::new(file))
    }

    fn sample() -> Vec<Declaration> {
        vec![
            decl(ObjectKind::Table, "50100", "Table 1", "file1.al"),
            decl(ObjectKind::Table, "50101", "Table 2", "file2.al"),
            decl(ObjectKind::Codeunit, "50100", "Codeunit 1", "file3.al"),
            decl(ObjectKind::Page, "50100", "Page 1", "file4.al"),
            decl(ObjectKind::Page, "50101", "Page 2", "file5.al"),
            decl(ObjectKind::Page, "50102", "Page 3", "file6.al"),
        ]
    }

    #[test]
    fn test_count_objects() {
        let summary = Summary::from_declarations(sample());

        assert_eq!(summary.total_objects, 6);
        assert_eq!(summary.counts_by_type.len(), 3);
        assert_eq!(
            summary.counts_by_type[0],
            ObjectCount {
                kind: ObjectKind::Page,
                count: 3
            }
        );
        assert_eq!(summary.objects_of_type(ObjectKind::Table).len(), 2);
        assert_eq!(summary.objects_of_type(ObjectKind::Codeunit).len(), 1);
        assert_eq!(summary.objects_of_type(ObjectKind::Page).len(), 3);
        assert_eq!(summary.objects.len(), 6);
    }

    #[test]
    fn test_ties_sorted_by_type_name() {
        let summary = Summary::from_declarations(vec![
            decl(ObjectKind::Table, "1", "T", "a.al"),
            decl(ObjectKind::Interface, "", "I", "a.al"),
            decl(ObjectKind::Codeunit, "1", "C", "a.al"),
            decl(ObjectKind::Codeunit, "2", "D", "a.al"),
        ]);

        let order: Vec<&str> = summary
            .counts_by_type
            .iter()
            .map(|c| c.kind.as_str())
            .collect();
        assert_eq!(order, vec!["codeunit", "interface", "table"]);
    }

    #[test]
    fn test_objects_keep_scan_order() {
        let summary = Summary::from_declarations(sample());
        let pages: Vec<&str> = summary
            .objects_of_type(ObjectKind::Page)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(pages, vec!["Page 1", "Page 2", "Page 3"]);
        assert_eq!(summary.objects[0].name, "Table 1");
    }

    #[test]
    fn test_count_of_type() {
        let summary = Summary::from_declarations(sample());

        assert_eq!(summary.count_of_type(ObjectKind::Table), 2);
        assert_eq!(summary.count_of_type(ObjectKind::Page), 3);
        assert_eq!(summary.count_of_type(ObjectKind::Report), 0);
        assert!(summary.objects_of_type(ObjectKind::Report).is_empty());
    }

    #[test]
    fn test_with_kinds() {
        let summary = Summary::with_kinds(sample(), &[ObjectKind::Table, ObjectKind::Codeunit]);
        assert_eq!(summary.total_objects, 3);
        assert_eq!(summary.count_of_type(ObjectKind::Page), 0);

        let all = Summary::with_kinds(sample(), &[]);
        assert_eq!(all.total_objects, 6);
    }

    #[test]
    fn test_empty() {
        let summary = Summary::from_declarations(Vec::new());

        assert_eq!(summary.total_objects, 0);
        assert!(summary.counts_by_type.is_empty());
        assert!(summary.objects_by_type.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let summary = Summary::from_declarations(sample());
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["totalObjects"], 6);
        assert_eq!(value["countsByType"][0]["type"], "page");
        assert_eq!(value["countsByType"][0]["count"], 3);
        assert_eq!(value["objects"][0]["filePath"], "file1.al");
        assert_eq!(value["objectsByType"]["table"].as_array().unwrap().len(), 2);
    }
}
