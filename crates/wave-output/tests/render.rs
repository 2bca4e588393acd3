//! Rendering and publishing of reconciled catalogs.

use std::collections::BTreeMap;

use serde_json::Value;
use tempfile::TempDir;
use wave_catalog::reconcile_files;
use wave_model::{Catalog, FileId, FileMetadata, MeasureLevel, MissingRange, ValueLabels};
use wave_output::{
    FileSink, OutputFormat, PublishOutcome, RenderOptions, publish_catalog, render_csv,
    render_json,
};

fn id(value: &str) -> FileId {
    FileId::new(value).expect("valid id")
}

fn test_catalog() -> Catalog {
    let w1_codes: ValueLabels = [(1_i64, "M"), (2_i64, "F")].into_iter().collect();
    let w2_codes: ValueLabels = [(2_i64, "F"), (1_i64, "M")].into_iter().collect();
    let files = vec![
        FileMetadata::new(id("w1"))
            .with_labeled_column("age", "Age in years")
            .with_measure("age", MeasureLevel::Scale)
            .with_display_width("age", 3)
            .with_variable_type("age", "F3.0")
            .with_missing_ranges("age", vec![MissingRange::new(98_i64, 99_i64)])
            .with_labeled_column("gender", "Sex")
            .with_value_labels("gender", w1_codes),
        FileMetadata::new(id("w2"))
            .with_labeled_column("age", "Age in years")
            .with_display_width("age", 4)
            .with_variable_type("age", "F3.0")
            .with_labeled_column("gender", "Gender")
            .with_value_labels("gender", w2_codes)
            .with_column("region"),
    ];
    let mut annotations = BTreeMap::new();
    annotations.insert("age".to_string(), "Top-coded at 90".to_string());
    reconcile_files(&id("w1"), files, &annotations).expect("reconcile")
}

#[test]
fn csv_rendering_snapshot() {
    let rendered = render_csv(&test_catalog(), false).expect("render");
    insta::assert_snapshot!(rendered, @r#"
    variable_name,variable_labels,variable_value_labels,variable_measures,variable_widths,inconsistent_column_labels,inconsistent_variable_value_labels,team_comments,number_of_appearances,list_of_appearances
    age,"[""Age in years""]",,scale,3,,,Top-coded at 90,2,"[""w1"",""w2""]"
    gender,"[""Sex"",""Gender""]","[{""1"":""M"",""2"":""F""}]",,,Inconsistent column labels,,,2,"[""w1"",""w2""]"
    region,,,,,,,,1,"[""w2""]"
    "#);
}

#[test]
fn extended_csv_appends_columns() {
    let rendered = render_csv(&test_catalog(), true).expect("render");
    let mut reader = csv::Reader::from_reader(rendered.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.len(), 16);
    let age = reader
        .records()
        .next()
        .expect("first row")
        .expect("valid row");
    assert_eq!(&age[0], "age");
    assert_eq!(&age[10], r#"["F3.0"]"#);
    assert_eq!(&age[11], r#"[[{"lo":"98","hi":"99"}]]"#);
    assert_eq!(&age[12], "");
    assert_eq!(&age[13], "Inconsistent variable widths");
    assert_eq!(&age[14], "");
    assert_eq!(&age[15], "");
}

#[test]
fn json_rendering_keeps_absent_flags_null() {
    let rendered = render_json(&test_catalog(), false).expect("render");
    let rows: Value = serde_json::from_str(&rendered).expect("valid json");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["variable_name"], "age");
    assert_eq!(rows[0]["inconsistent_column_labels"], Value::Bool(false));
    assert_eq!(rows[0]["inconsistent_variable_value_labels"], Value::Null);
    assert_eq!(rows[0]["variable_measures"], "scale");
    assert_eq!(rows[0]["team_comments"], "Top-coded at 90");
    assert!(rows[0].get("variable_types").is_none());

    assert_eq!(rows[1]["inconsistent_column_labels"], Value::Bool(true));
    assert_eq!(rows[1]["variable_value_labels"][0]["1"], "M");

    assert_eq!(rows[2]["inconsistent_column_labels"], Value::Null);
    assert_eq!(rows[2]["team_comments"], Value::Null);
    assert_eq!(rows[2]["list_of_appearances"][0], "w2");
}

#[test]
fn extended_json_includes_all_kinds() {
    let rendered = render_json(&test_catalog(), true).expect("render");
    let rows: Value = serde_json::from_str(&rendered).expect("valid json");
    assert_eq!(rows[0]["inconsistent_variable_widths"], Value::Bool(true));
    assert_eq!(rows[0]["inconsistent_variable_types"], Value::Bool(false));
    assert_eq!(rows[2]["inconsistent_missing_ranges"], Value::Null);
}

#[test]
fn publish_writes_through_file_sink() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("generated").join("variable_catalog.json");
    let sink = FileSink::new(&path);
    let options = RenderOptions::new(OutputFormat::Json, false);
    let catalog = test_catalog();

    let first = publish_catalog(&catalog, options, &sink).expect("publish");
    let second = publish_catalog(&catalog, options, &sink).expect("publish");
    assert_eq!(first, PublishOutcome::Created);
    assert_eq!(second, PublishOutcome::Replaced);

    let written = std::fs::read_to_string(&path).expect("read catalog");
    assert_eq!(written, render_json(&catalog, false).expect("render"));
}

#[test]
fn renderings_agree_on_value_label_order() {
    let codes: ValueLabels = [(10_i64, "Ten or more"), (2_i64, "Two")].into_iter().collect();
    let files = vec![
        FileMetadata::new(id("w1"))
            .with_column("rooms")
            .with_value_labels("rooms", codes),
    ];
    let catalog = reconcile_files(&id("w1"), files, &BTreeMap::new()).expect("reconcile");

    let csv = render_csv(&catalog, false).expect("render csv");
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let row = reader.records().next().expect("row").expect("valid row");
    assert_eq!(&row[2], r#"[{"2":"Two","10":"Ten or more"}]"#);

    let json = render_json(&catalog, false).expect("render json");
    let two = json.find(r#""2": "Two""#).expect("code 2");
    let ten = json.find(r#""10": "Ten or more""#).expect("code 10");
    assert!(two < ten);
}
