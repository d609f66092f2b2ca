//! Schema Registry Tests
//!
//! Runtime schemas drive the same decoder as built-in records:
//! - Schemas load from a directory of JSON files
//! - Lookup keys, constraints and kinds come from the file
//! - Registered versions are immutable

use std::fs;

use chrono::NaiveDate;
use parkdata::schema::{FieldErrorKind, FieldValue, SchemaLoader};
use parkdata::{parse_with_schema, ParseError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const GARDEN_SCHEMA: &str = r#"{
    "schema_id": "garden",
    "schema_version": "v1",
    "description": "Botanical garden registry entry",
    "fields": [
        { "name": "title", "key": "gardenName", "max_length": 12, "not_blank": true },
        { "name": "opened", "kind": "date", "not_blank": true },
        { "name": "curator" }
    ]
}"#;

fn setup() -> (TempDir, SchemaLoader) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("schema_garden_v1.json"), GARDEN_SCHEMA).unwrap();

    let mut loader = SchemaLoader::with_builtins(temp_dir.path()).unwrap();
    loader.load_all().unwrap();
    (temp_dir, loader)
}

// =============================================================================
// Runtime Decoding
// =============================================================================

/// Descriptor keys from the file are used for lookup.
#[test]
fn test_decode_with_loaded_schema() {
    let (temp_dir, loader) = setup();
    let schema = loader.get("garden", "v1").unwrap();

    let path = temp_dir.path().join("garden.txt");
    fs::write(
        &path,
        "***\ngardenName: \"Aptekarsky\"\nopened: \"1706-02-01\"\ncurator: \"\"\n***\n",
    )
    .unwrap();

    let fields = parse_with_schema(&path, schema).unwrap();
    assert_eq!(fields.get("title"), Some(&FieldValue::Text("Aptekarsky".into())));
    assert_eq!(
        fields.get("opened"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(1706, 2, 1).unwrap()))
    );
    assert_eq!(fields.get("curator"), Some(&FieldValue::Text(String::new())));
}

/// Reading by field name when a key is declared is a missing field.
#[test]
fn test_declared_key_replaces_field_name() {
    let (temp_dir, loader) = setup();
    let schema = loader.get("garden", "v1").unwrap();

    let path = temp_dir.path().join("garden.txt");
    fs::write(
        &path,
        "***\ntitle: \"Aptekarsky\"\nopened: \"1706-02-01\"\ncurator: \"x\"\n***\n",
    )
    .unwrap();

    match parse_with_schema(&path, schema).unwrap_err() {
        ParseError::Validation(report) => {
            assert_eq!(report.len(), 1);
            assert!(report.has("title", FieldErrorKind::MissingField));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

/// Constraints from the file are enforced.
#[test]
fn test_loaded_constraints_enforced() {
    let (temp_dir, loader) = setup();
    let schema = loader.get("garden", "v1").unwrap();

    let path = temp_dir.path().join("garden.txt");
    fs::write(
        &path,
        "***\ngardenName: \"BotanicalGardenOfMoscow\"\nopened: \"\"\ncurator: \"x\"\n***\n",
    )
    .unwrap();

    let err = parse_with_schema(&path, schema).unwrap_err();
    let report = err.report().unwrap();
    assert!(report.has("title", FieldErrorKind::MaxLengthExceeded));
    assert!(report.has("opened", FieldErrorKind::BlankValue));
    assert!(report.has("opened", FieldErrorKind::ConversionFailed));
}

// =============================================================================
// Registry Rules
// =============================================================================

/// A file cannot redefine a built-in schema version.
#[test]
fn test_builtin_park_is_immutable() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("schema_park_v1.json"),
        r#"{"schema_id": "park", "schema_version": "v1", "fields": [{"name": "legalName"}]}"#,
    )
    .unwrap();

    let mut loader = SchemaLoader::with_builtins(temp_dir.path()).unwrap();
    let err = loader.load_all().unwrap_err();
    assert_eq!(err.code(), "PARK_SCHEMA_IMMUTABLE");
}

/// Unknown field kinds are rejected when loading.
#[test]
fn test_unknown_kind_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("schema_x_v1.json"),
        r#"{"schema_id": "x", "schema_version": "v1", "fields": [{"name": "n", "kind": "money"}]}"#,
    )
    .unwrap();

    let mut loader = SchemaLoader::new(temp_dir.path());
    assert_eq!(loader.load_all().unwrap_err().code(), "PARK_MALFORMED_SCHEMA");
}

/// Saved schemas reload identically.
#[test]
fn test_save_reload_round_trip() {
    let (_temp_dir, loader) = setup();
    let garden = loader.get("garden", "v1").unwrap().clone();

    let other_dir = TempDir::new().unwrap();
    let other = SchemaLoader::new(other_dir.path());
    other.save_schema(&garden).unwrap();

    let mut reloaded = SchemaLoader::new(other_dir.path());
    reloaded.load_all().unwrap();
    assert_eq!(reloaded.get("garden", "v1"), Some(&garden));
    assert_eq!(garden.description.as_deref(), Some("Botanical garden registry entry"));
}
