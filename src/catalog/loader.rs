//! Catalog parsing for the tool finder.
//!
//! Accepts either a bare JSON array of tool records or an object with a
//! `tools` array. Individual malformed records are logged and skipped so a
//! single bad entry in the site configuration does not take search down.

use crate::catalog::types::ToolRecord;
use crate::error::AppError;
use serde_json::Value;
use std::collections::HashSet;

/// Result type for loader operations
pub type LoaderResult<T> = std::result::Result<T, AppError>;

/// Valid difficulty ratings
const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Parse a catalog document into validated tool records.
///
/// # Errors
/// Returns `AppError::CatalogError` if the document is not JSON, has no tool
/// array, or every record in a non-empty array is malformed.
/// Individual malformed or duplicate records are skipped (partial success model).
pub fn parse_catalog(json: &str) -> LoaderResult<Vec<ToolRecord>> {
    let document: Value = serde_json::from_str(json)?;
    let entries = extract_tool_array(&document)?;

    let mut records = Vec::with_capacity(entries.len());
    let mut seen_ids: HashSet<String> = HashSet::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let record = match normalize_record(entry) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index = idx, error = %e, "Skipping malformed tool record");
                continue;
            }
        };

        if !seen_ids.insert(record.id.clone()) {
            tracing::warn!(index = idx, id = %record.id, "Skipping duplicate tool id");
            continue;
        }

        records.push(record);
    }

    if records.is_empty() && !entries.is_empty() {
        return Err(AppError::CatalogError(
            "All tool records failed to parse".into(),
        ));
    }

    tracing::debug!(
        total = entries.len(),
        parsed = records.len(),
        "Catalog parsing complete"
    );

    Ok(records)
}

/// Locate the tool array: either the document itself or its `tools` field.
fn extract_tool_array(document: &Value) -> LoaderResult<&Vec<Value>> {
    document
        .as_array()
        .or_else(|| document.get("tools").and_then(|t| t.as_array()))
        .ok_or_else(|| {
            AppError::CatalogError("Expected a tool array or a 'tools' array field".into())
        })
}

/// Deserialize and validate a single record.
fn normalize_record(entry: &Value) -> LoaderResult<ToolRecord> {
    let mut record: ToolRecord = serde_json::from_value(entry.clone())
        .map_err(|e| AppError::CatalogError(format!("Invalid tool record: {}", e)))?;

    record.id = record.id.trim().to_string();
    if record.id.is_empty() {
        return Err(AppError::CatalogError("Tool id cannot be empty".into()));
    }
    if record.name.trim().is_empty() {
        return Err(AppError::CatalogError(format!(
            "Tool '{}' has an empty name",
            record.id
        )));
    }
    if let Some(difficulty) = record.difficulty {
        if !DIFFICULTY_RANGE.contains(&difficulty) {
            return Err(AppError::CatalogError(format!(
                "Tool '{}' has difficulty {} outside 1-5",
                record.id, difficulty
            )));
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let doc = json!([
            {
                "id": "bmi",
                "name": "BMI Calculator",
                "description": "Body mass index",
                "keywords": ["health", "weight"],
                "category": "health",
                "searchVolume": 50000,
                "difficulty": 1,
                "isActive": true
            }
        ]);

        let records = parse_catalog(&doc.to_string()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "bmi");
        assert_eq!(records[0].keywords, vec!["health", "weight"]);
        assert_eq!(records[0].search_volume, Some(50000));
        assert_eq!(records[0].difficulty, Some(1));
    }

    #[test]
    fn test_parse_tools_field() {
        let doc = json!({ "tools": [{ "id": "a", "name": "A", "category": "misc" }] });
        let records = parse_catalog(&doc.to_string()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_optional_fields_default() {
        let doc = json!([{ "id": "a", "name": "A", "category": "misc" }]);
        let records = parse_catalog(&doc.to_string()).unwrap();

        assert_eq!(records[0].description, "");
        assert!(records[0].keywords.is_empty());
        assert!(records[0].is_active);
        assert_eq!(records[0].search_volume, None);
        assert_eq!(records[0].difficulty, None);
    }

    #[test]
    fn test_missing_tool_array_returns_error() {
        let result = parse_catalog(r#"{ "version": 2 }"#);
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }

    #[test]
    fn test_invalid_json_returns_error() {
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn test_malformed_record_skipped() {
        let doc = json!([
            { "name": "No id here", "category": "misc" },
            { "id": "ok", "name": "Valid", "category": "misc" }
        ]);

        let records = parse_catalog(&doc.to_string()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok");
    }

    #[test]
    fn test_difficulty_out_of_range_skipped() {
        let doc = json!([
            { "id": "hard", "name": "Hard", "category": "misc", "difficulty": 9 },
            { "id": "easy", "name": "Easy", "category": "misc", "difficulty": 2 }
        ]);

        let records = parse_catalog(&doc.to_string()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "easy");
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let doc = json!([
            { "id": "dup", "name": "First", "category": "misc" },
            { "id": "dup", "name": "Second", "category": "misc" }
        ]);

        let records = parse_catalog(&doc.to_string()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "First");
    }

    #[test]
    fn test_all_malformed_returns_error() {
        let doc = json!([{ "name": "x" }, { "id": "" , "name": "y", "category": "z" }]);
        assert!(parse_catalog(&doc.to_string()).is_err());
    }

    #[test]
    fn test_empty_array_returns_empty_vec() {
        let records = parse_catalog("[]").unwrap();
        assert!(records.is_empty());
    }
}
