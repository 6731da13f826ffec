//! Error-table loader with compile-time limits and global logging integration

use super::entry::{ErrorEntry, ErrorTable, RawEntry};
use super::error::TableError;
use crate::config::compile_time::table::{MAX_ENTRIES, MAX_TABLE_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Load and parse the error table at `path`
pub fn load_table(path: &Path) -> Result<ErrorTable, TableError> {
    let start_time = Instant::now();
    let path_str = path.display().to_string();

    log_debug!("Loading error table", "path" => path_str);

    let source = read_source(path).inspect_err(|error| {
        log_error!(error.error_code(), "Failed to read error table",
            "path" => path_str,
            "error" => error
        );
    })?;

    let table = parse_table(&source).inspect_err(|error| {
        log_error!(error.error_code(), "Failed to parse error table",
            "path" => path_str,
            "error" => error
        );
    })?;

    log_success!(codes::success::TABLE_LOADED, "Error table loaded",
        "path" => path_str,
        "entries" => table.len(),
        "emittable" => table.emittable().count(),
        "skipped" => table.skipped().count(),
        "duration_ms" => format!("{:.2}", start_time.elapsed().as_secs_f64() * 1000.0)
    );

    Ok(table)
}

/// Parse an error table from JSON text, keeping source key order
pub fn parse_table(source: &str) -> Result<ErrorTable, TableError> {
    let value: serde_json::Value =
        serde_json::from_str(source).map_err(|e| TableError::from_json(&e))?;

    let object = match value {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(TableError::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    if object.len() > MAX_ENTRIES {
        return Err(TableError::TooManyEntries {
            count: object.len(),
            max: MAX_ENTRIES,
        });
    }

    let mut seen = HashSet::with_capacity(object.len());
    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        let code = parse_code(&key)?;
        // "12" and "012" are distinct JSON keys but the same map key downstream
        if !seen.insert(code) {
            return Err(TableError::InvalidEntry {
                code,
                message: format!("duplicate error code (key {:?})", key),
            });
        }
        entries.push(parse_entry(code, value)?);
    }

    Ok(ErrorTable::new(entries))
}

fn read_source(path: &Path) -> Result<String, TableError> {
    let path_str = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TableError::NotFound {
            path: path_str.clone(),
        },
        ErrorKind::PermissionDenied => TableError::PermissionDenied {
            path: path_str.clone(),
        },
        _ => TableError::Io {
            message: format!("Failed to read metadata for '{}': {}", path_str, e),
        },
    })?;

    if !metadata.is_file() {
        return Err(TableError::NotAFile { path: path_str });
    }

    if metadata.len() == 0 {
        return Err(TableError::Empty { path: path_str });
    }

    if metadata.len() > MAX_TABLE_FILE_SIZE {
        return Err(TableError::TooLarge {
            size: metadata.len(),
            max_size: MAX_TABLE_FILE_SIZE,
        });
    }

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => TableError::PermissionDenied {
            path: path_str.clone(),
        },
        _ => TableError::Io {
            message: format!("Failed to read '{}': {}", path_str, e),
        },
    })?;

    String::from_utf8(bytes).map_err(|_| TableError::InvalidEncoding { path: path_str })
}

fn parse_code(key: &str) -> Result<i64, TableError> {
    key.trim()
        .parse::<i64>()
        .map_err(|_| TableError::InvalidCode {
            key: key.to_string(),
        })
}

fn parse_entry(code: i64, value: serde_json::Value) -> Result<ErrorEntry, TableError> {
    if !value.is_object() {
        return Err(TableError::InvalidEntry {
            code,
            message: format!("expected an object, found {}", json_kind(&value)),
        });
    }

    let raw: RawEntry = serde_json::from_value(value).map_err(|e| TableError::InvalidEntry {
        code,
        message: e.to_string(),
    })?;

    Ok(ErrorEntry {
        code,
        class: raw.class.filter(|c| !c.is_empty()),
        name: raw.name,
        comment: raw.comment,
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_parse_keeps_source_order() {
        let table = parse_table(
            r#"{
                "30": {"class": "G2RetryableError"},
                "7": {"class": "G2BadInputError"},
                "1001": {"class": "G2NotFoundError", "name": "Foo", "comment": "Bar"}
            }"#,
        )
        .unwrap();

        let codes: Vec<i64> = table.entries().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![30, 7, 1001]);

        let last = &table.entries()[2];
        assert_eq!(last.class.as_deref(), Some("G2NotFoundError"));
        assert_eq!(last.name.as_deref(), Some("Foo"));
        assert_eq!(last.comment.as_deref(), Some("Bar"));
    }

    #[test]
    fn test_missing_class_is_not_an_error() {
        let table = parse_table(r#"{"1002": {"name": "NoClass"}}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.emittable().count(), 0);
        assert_eq!(table.skipped().count(), 1);
    }

    #[test]
    fn test_empty_class_counts_as_missing() {
        let table = parse_table(r#"{"5": {"class": ""}}"#).unwrap();
        assert_eq!(table.emittable().count(), 0);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let table = parse_table(r#"{"5": {"class": "G2Error", "severity": 3}}"#).unwrap();
        assert_eq!(table.emittable().count(), 1);
    }

    #[test]
    fn test_malformed_json() {
        let result = parse_table("{\"1\": {\"class\": ");
        assert_matches!(result, Err(TableError::MalformedJson { line: 1, .. }));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert_matches!(
            parse_table("[1, 2, 3]"),
            Err(TableError::NotAnObject { found: "an array" })
        );
    }

    #[test]
    fn test_non_integer_key() {
        assert_matches!(
            parse_table(r#"{"abc": {"class": "G2Error"}}"#),
            Err(TableError::InvalidCode { key }) if key == "abc"
        );
    }

    #[test]
    fn test_duplicate_codes_after_normalisation() {
        assert_matches!(
            parse_table(r#"{"12": {"class": "G2Error"}, "012": {"class": "G2Error"}}"#),
            Err(TableError::InvalidEntry { code: 12, .. })
        );
    }

    #[test]
    fn test_entry_must_be_object_with_string_fields() {
        assert_matches!(
            parse_table(r#"{"12": "G2Error"}"#),
            Err(TableError::InvalidEntry { code: 12, .. })
        );
        assert_matches!(
            parse_table(r#"{"13": {"class": 42}}"#),
            Err(TableError::InvalidEntry { code: 13, .. })
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g2errors.json");
        fs::write(&path, r#"{"1": {"class": "G2Error"}}"#).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_matches!(load_table(&path), Err(TableError::NotFound { .. }));
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempdir().unwrap();
        assert_matches!(load_table(dir.path()), Err(TableError::NotAFile { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "").unwrap();
        assert_matches!(load_table(&path), Err(TableError::Empty { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        fs::write(&path, [b'{', 0xff, 0xfe, b'}']).unwrap();
        assert_matches!(load_table(&path), Err(TableError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_error_codes_map_to_registry() {
        let error = TableError::InvalidCode {
            key: "x".to_string(),
        };
        assert_eq!(error.error_code(), codes::table::INVALID_ERROR_CODE);
    }
}
