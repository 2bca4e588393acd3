use wave_model::{
    FileId, FileMetadata, MeasureLevel, MetadataKind, ModelError, WaveSet, reference_first,
};

fn id(value: &str) -> FileId {
    FileId::new(value).expect("valid file id")
}

fn wave(name: &str) -> FileMetadata {
    FileMetadata::new(id(name)).with_column("id")
}

#[test]
fn wave_set_moves_reference_first() {
    let files = vec![wave("w1"), wave("w2"), wave("parent"), wave("w3")];
    let set = WaveSet::new(&id("parent"), files).expect("reference present");
    let order: Vec<String> = set.file_ids().iter().map(ToString::to_string).collect();
    assert_eq!(order, vec!["parent", "w1", "w2", "w3"]);
    assert_eq!(set.reference().as_str(), "parent");
    assert_eq!(set.len(), 4);
}

#[test]
fn wave_set_of_reference_alone_has_one_file() {
    let set = WaveSet::new(&id("parent"), vec![wave("parent")]).expect("reference present");
    assert_eq!(set.len(), 1);
    assert_eq!(set.file_ids(), vec![id("parent")]);
}

#[test]
fn wave_set_without_reference_is_configuration_error() {
    let files = vec![wave("w1"), wave("w2")];
    let err = WaveSet::new(&id("parent"), files).unwrap_err();
    assert!(matches!(
        err,
        ModelError::MissingReferenceFile { ref reference, available: 2 } if reference == "parent"
    ));
    assert_eq!(
        err.to_string(),
        "reference file 'parent' not found among 2 supplied file(s)"
    );
}

#[test]
fn wave_set_rejects_duplicate_ids() {
    let files = vec![wave("w1"), wave("w1")];
    let err = WaveSet::new(&id("w1"), files).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateFile(ref name) if name == "w1"));
}

#[test]
fn reference_first_keeps_listing_order_of_the_rest() {
    let ids = vec![id("c"), id("a"), id("ref"), id("b")];
    let ordered = reference_first(ids, &id("ref"), |item| item).unwrap();
    let names: Vec<&str> = ordered.iter().map(FileId::as_str).collect();
    assert_eq!(names, vec!["ref", "c", "a", "b"]);
}

#[test]
fn measure_level_parses_tokens() {
    assert_eq!("Nominal".parse::<MeasureLevel>().unwrap(), MeasureLevel::Nominal);
    assert_eq!(" scale ".parse::<MeasureLevel>().unwrap(), MeasureLevel::Scale);
    assert_eq!("continuous".parse::<MeasureLevel>().unwrap(), MeasureLevel::Scale);
    assert_eq!("unknown".parse::<MeasureLevel>().unwrap(), MeasureLevel::Unknown);
    assert!("weird".parse::<MeasureLevel>().is_err());

    let parsed: MeasureLevel = serde_json::from_str("\"ordinal\"").unwrap();
    assert_eq!(parsed, MeasureLevel::Ordinal);
    assert_eq!(serde_json::to_string(&MeasureLevel::Scale).unwrap(), "\"scale\"");
}

#[test]
fn metadata_kind_messages() {
    assert_eq!(
        MetadataKind::Label.inconsistency_message(),
        "Inconsistent column labels"
    );
    assert_eq!(
        MetadataKind::ValueLabels.inconsistency_message(),
        "Inconsistent variable value labels"
    );
    assert_eq!(MetadataKind::ALL.len(), 6);
}

#[test]
fn file_metadata_builders_keep_columns_aligned() {
    let file = FileMetadata::new(id("w1"))
        .with_labeled_column("age", "Age in years")
        .with_column("id")
        .with_display_width("age", 8);
    assert_eq!(file.column_names, vec!["age", "id"]);
    assert_eq!(
        file.column_labels,
        vec![Some("Age in years".to_string()), None]
    );
    assert_eq!(file.label("age"), Some("Age in years"));
    assert_eq!(file.label("id"), None);
    assert!(file.has_column("id"));
    assert_eq!(file.display_widths.get("age"), Some(&8));
}
