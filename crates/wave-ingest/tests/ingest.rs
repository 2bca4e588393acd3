//! Tests for reading a directory of waves end to end.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wave_ingest::{
    IngestError, JsonMetadataExtractor, discover_waves, extract_all, load_annotations,
    select_waves,
};
use wave_model::FileId;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
}

fn id(value: &str) -> FileId {
    FileId::new(value).expect("valid id")
}

#[test]
fn extracts_waves_in_reference_first_order() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "a_wave.json",
        r#"{"column_names": ["id", "region"], "column_names_to_labels": {"id": "ID", "region": "Region"}}"#,
    );
    write(
        dir.path(),
        "parent.json",
        r#"{"column_names": ["id", "age"], "column_names_to_labels": {"id": "ID", "age": "Age"}}"#,
    );
    write(dir.path(), "readme.md", "not a wave");

    let waves = discover_waves(dir.path()).expect("discover");
    let waves = select_waves(waves, &id("parent"), &[]).expect("select");
    let files = extract_all(&JsonMetadataExtractor, &waves).expect("extract");

    let order: Vec<&str> = files.iter().map(|file| file.file.as_str()).collect();
    assert_eq!(order, vec!["parent", "a_wave"]);
    assert_eq!(files[0].column_names, vec!["id", "age"]);
    assert_eq!(files[1].label("region"), Some("Region"));
}

#[test]
fn unreadable_document_names_the_file() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "parent.json", "[1, 2, 3]");
    let waves = discover_waves(dir.path()).expect("discover");
    let err = extract_all(&JsonMetadataExtractor, &waves).unwrap_err();
    assert!(matches!(err, IngestError::MetadataParse { .. }));
    assert!(err.to_string().contains("parent.json"));
}

#[test]
fn missing_reference_stops_before_extraction() {
    let dir = TempDir::new().expect("temp dir");
    // Invalid on purpose: selection must fail before this document is read.
    write(dir.path(), "wave2.json", "{broken");
    let waves = discover_waves(dir.path()).expect("discover");
    let err = select_waves(waves, &id("parent"), &[]).unwrap_err();
    assert!(matches!(err, IngestError::Configuration(_)));
}

#[test]
fn loads_annotation_sheet_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "team_comments.csv",
        "Variable,Team Comments\nage,Top-coded at 90\n",
    );
    let annotations = load_annotations(&dir.path().join("team_comments.csv")).expect("load");
    assert_eq!(
        annotations.get("age").map(String::as_str),
        Some("Top-coded at 90")
    );
    assert!(matches!(
        load_annotations(&dir.path().join("absent.csv")),
        Err(IngestError::FileRead { .. })
    ));
}
