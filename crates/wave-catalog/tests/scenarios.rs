//! End-to-end reconciliation scenarios.

use std::collections::BTreeMap;

use wave_catalog::{CatalogError, reconcile_files};
use wave_model::{
    Catalog, FileId, FileMetadata, MeasureLevel, MetadataKind, MissingRange, ModelError,
    ValueLabels,
};

fn id(value: &str) -> FileId {
    FileId::new(value).expect("valid file id")
}

fn run(files: Vec<FileMetadata>) -> Catalog {
    reconcile_files(&id("F1"), files, &BTreeMap::new()).expect("reconcile")
}

#[test]
fn same_label_in_both_files_is_consistent() {
    let catalog = run(vec![
        FileMetadata::new(id("F1")).with_labeled_column("age", "Age in years"),
        FileMetadata::new(id("F2")).with_labeled_column("age", "Age in years"),
    ]);
    let row = catalog.row("age").expect("age row");
    assert_eq!(row.labels, vec!["Age in years"]);
    assert_eq!(row.flag(MetadataKind::Label), Some(false));
    assert_eq!(row.flag_text(MetadataKind::Label), "");
}

#[test]
fn differing_labels_are_flagged_and_both_kept() {
    let catalog = run(vec![
        FileMetadata::new(id("F1")).with_labeled_column("income", "Household income"),
        FileMetadata::new(id("F2")).with_labeled_column("income", "Annual income"),
    ]);
    let row = catalog.row("income").expect("income row");
    assert_eq!(row.labels, vec!["Household income", "Annual income"]);
    assert_eq!(row.flag(MetadataKind::Label), Some(true));
    assert_eq!(row.flag_text(MetadataKind::Label), "Inconsistent column labels");
    assert_eq!(catalog.inconsistent_count(MetadataKind::Label), 1);
}

#[test]
fn variable_only_in_second_file_still_appears() {
    let catalog = run(vec![
        FileMetadata::new(id("F1")).with_column("id"),
        FileMetadata::new(id("F2"))
            .with_column("id")
            .with_labeled_column("region", "Region of residence")
            .with_measure("region", MeasureLevel::Nominal)
            .with_display_width("region", 12),
    ]);
    let row = catalog.row("region").expect("region row");
    assert_eq!(row.appearance_count, 1);
    assert_eq!(row.appearances, vec![id("F2")]);
    assert_eq!(row.labels, vec!["Region of residence"]);
    assert_eq!(row.measure, Some(MeasureLevel::Nominal));
    assert_eq!(row.display_width, Some(12));
    let names: Vec<&str> = catalog
        .rows
        .iter()
        .map(|row| row.variable_name.as_str())
        .collect();
    assert_eq!(names, vec!["id", "region"]);
}

#[test]
fn reordered_value_labels_are_consistent() {
    let f1_labels: ValueLabels = [(1_i64, "M"), (2_i64, "F")].into_iter().collect();
    let f2_labels: ValueLabels = [(2_i64, "F"), (1_i64, "M")].into_iter().collect();
    let catalog = run(vec![
        FileMetadata::new(id("F1"))
            .with_column("gender")
            .with_value_labels("gender", f1_labels),
        FileMetadata::new(id("F2"))
            .with_column("gender")
            .with_value_labels("gender", f2_labels),
    ]);
    let row = catalog.row("gender").expect("gender row");
    assert_eq!(row.flag(MetadataKind::ValueLabels), Some(false));
    assert_eq!(row.value_labels.len(), 1);
    assert_eq!(row.value_labels[0].canonical(), r#"{"1":"M","2":"F"}"#);
}

#[test]
fn changed_value_labels_are_flagged() {
    let f1_labels: ValueLabels = [(1_i64, "M"), (2_i64, "F")].into_iter().collect();
    let f2_labels: ValueLabels = [(1_i64, "Male"), (2_i64, "Female")].into_iter().collect();
    let catalog = run(vec![
        FileMetadata::new(id("F1"))
            .with_column("gender")
            .with_value_labels("gender", f1_labels),
        FileMetadata::new(id("F2"))
            .with_column("gender")
            .with_value_labels("gender", f2_labels),
    ]);
    let row = catalog.row("gender").expect("gender row");
    assert_eq!(row.flag(MetadataKind::ValueLabels), Some(true));
    assert_eq!(
        row.flag_text(MetadataKind::ValueLabels),
        "Inconsistent variable value labels"
    );
    assert_eq!(row.value_labels.len(), 2);
}

#[test]
fn missing_reference_file_aborts() {
    let files = vec![
        FileMetadata::new(id("F2")).with_column("age"),
        FileMetadata::new(id("F3")).with_column("age"),
    ];
    let err = reconcile_files(&id("F1"), files, &BTreeMap::new()).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Configuration(ModelError::MissingReferenceFile { .. })
    ));
}

#[test]
fn reference_file_takes_precedence_for_scalars() {
    // F1 is listed last but is the reference, so its width is shown.
    let catalog = run(vec![
        FileMetadata::new(id("F2"))
            .with_column("score")
            .with_display_width("score", 10)
            .with_measure("score", MeasureLevel::Ordinal),
        FileMetadata::new(id("F1"))
            .with_column("score")
            .with_display_width("score", 8)
            .with_measure("score", MeasureLevel::Scale),
    ]);
    assert_eq!(catalog.files, vec![id("F1"), id("F2")]);
    let row = catalog.row("score").expect("score row");
    assert_eq!(row.display_width, Some(8));
    assert_eq!(row.measure, Some(MeasureLevel::Scale));
    assert_eq!(row.flag(MetadataKind::DisplayWidth), Some(true));
    assert_eq!(row.flag(MetadataKind::MeasurementLevel), Some(true));
    assert_eq!(row.appearances, vec![id("F1"), id("F2")]);
}

#[test]
fn bare_variable_has_no_flags() {
    let catalog = run(vec![
        FileMetadata::new(id("F1")).with_column("bare"),
        FileMetadata::new(id("F2")).with_column("bare"),
    ]);
    let row = catalog.row("bare").expect("bare row");
    assert!(row.labels.is_empty());
    assert!(row.value_labels.is_empty());
    assert_eq!(row.measure, None);
    assert_eq!(row.display_width, None);
    assert!(row.flags.is_empty());
    for kind in MetadataKind::ALL {
        assert_eq!(row.flag(kind), None);
        assert_eq!(row.flag_text(kind), "");
    }
    assert_eq!(row.appearance_count, 2);
}

#[test]
fn label_in_one_file_only_is_consistent() {
    let catalog = run(vec![
        FileMetadata::new(id("F1")).with_column("q1"),
        FileMetadata::new(id("F2")).with_labeled_column("q1", "Question 1"),
    ]);
    let row = catalog.row("q1").expect("q1 row");
    assert_eq!(row.labels, vec!["Question 1"]);
    assert_eq!(row.flag(MetadataKind::Label), Some(false));
}

#[test]
fn extended_kinds_are_reconciled() {
    let catalog = run(vec![
        FileMetadata::new(id("F1"))
            .with_column("income")
            .with_variable_type("income", "F8.2")
            .with_missing_ranges("income", vec![MissingRange::new(98_i64, 99_i64)]),
        FileMetadata::new(id("F2"))
            .with_column("income")
            .with_variable_type("income", "F10.2")
            .with_missing_ranges("income", vec![MissingRange::new("98.0", "99")]),
    ]);
    let row = catalog.row("income").expect("income row");
    assert_eq!(row.variable_types, vec!["F8.2", "F10.2"]);
    assert_eq!(row.flag(MetadataKind::VariableType), Some(true));
    assert_eq!(row.missing_ranges.len(), 1);
    assert_eq!(row.flag(MetadataKind::MissingRanges), Some(false));
}

#[test]
fn annotations_attach_by_exact_name() {
    let mut annotations = BTreeMap::new();
    annotations.insert("age".to_string(), "Top-coded at 90".to_string());
    annotations.insert("AGE".to_string(), "wrong case".to_string());
    annotations.insert("retired".to_string(), "dropped after wave 2".to_string());
    let catalog = reconcile_files(
        &id("F1"),
        vec![FileMetadata::new(id("F1")).with_column("age").with_column("id")],
        &annotations,
    )
    .expect("reconcile");
    assert_eq!(
        catalog.row("age").and_then(|row| row.annotation.as_deref()),
        Some("Top-coded at 90")
    );
    assert_eq!(catalog.row("id").and_then(|row| row.annotation.clone()), None);
    assert!(catalog.row("retired").is_none());
    assert_eq!(catalog.annotated_count(), 1);
}
