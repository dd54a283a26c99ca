//! Deriving from schema tables on disk.

use std::fs;
use std::path::Path;

use ludeme::{Grammar, Schema, SchemaError};

use crate::helpers::grammar_assertions::derive_fixture;
use crate::helpers::schema_fixtures::{game_classes, metadata_classes};

fn write_json(path: &Path, schema: &Schema) {
    fs::write(path, serde_json::to_string_pretty(schema).unwrap()).unwrap();
}

fn split_schema_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("metadata")).unwrap();
    write_json(&dir.path().join("game.json"), &Schema::new(game_classes()));
    write_json(
        &dir.path().join("metadata").join("metadata.json"),
        &Schema::new(metadata_classes()),
    );
    fs::write(dir.path().join("README.md"), "not a schema").unwrap();
    dir
}

#[test]
fn test_split_directory_derives_same_grammar() {
    let dir = split_schema_dir();
    let schema = Schema::from_dir(dir.path()).unwrap();
    let from_disk = Grammar::derive_default(&schema).unwrap();
    assert_eq!(from_disk.to_text(), derive_fixture().to_text());
}

#[test]
fn test_single_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    let mut classes = game_classes();
    classes.extend(metadata_classes());
    let schema = Schema::new(classes);
    write_json(&path, &schema);
    assert_eq!(Schema::from_path(&path).unwrap(), schema);
}

#[test]
fn test_stale_file_in_directory_rejected() {
    let dir = split_schema_dir();
    fs::write(
        dir.path().join("old.json"),
        r#"{ "version": 0, "classes": [] }"#,
    )
    .unwrap();
    assert!(matches!(
        Schema::from_dir(dir.path()),
        Err(SchemaError::UnsupportedVersion { found: 0, .. })
    ));
}

#[test]
fn test_malformed_file_reports_json_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ \"classes\": [").unwrap();
    assert!(matches!(Schema::from_dir(dir.path()), Err(SchemaError::Json(_))));
}
