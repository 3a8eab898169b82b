//! JSON export of a summary.

use std::fs;
use std::path::Path;

use crate::error::BcobjError;
use crate::query::summary::Summary;
use crate::Result;

/// Serialize a summary as pretty-printed JSON.
pub fn to_json_string(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Write a summary to `path` as pretty-printed JSON.
pub fn write_json(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = to_json_string(summary)?;
    fs::write(path, data).map_err(|e| BcobjError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::declaration::Declaration;
    use crate::data::kind::ObjectKind;
    use tempfile::tempdir;

    fn sample() -> Summary {
        Summary::from_declarations(vec![
            Declaration::new(ObjectKind::Table, "50100", "Test Table", Path::new("test.al")),
            Declaration::new(ObjectKind::Interface, "", "ITest", Path::new("test.al")),
        ])
    }

    #[test]
    fn test_to_json_string() {
        let json = to_json_string(&sample()).unwrap();

        assert!(json.contains("\"totalObjects\": 2"));
        assert!(json.contains("\"countsByType\""));
        assert!(json.contains("\"Test Table\""));

        let parsed: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out.json");

        write_json(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["totalObjects"], 2);
        assert_eq!(value["objects"][1]["id"], "");
    }

    #[test]
    fn test_write_json_bad_path() {
        let result = write_json(&sample(), "/nonexistent/dir/out.json");
        assert!(matches!(result, Err(BcobjError::Export { .. })));
    }
}
