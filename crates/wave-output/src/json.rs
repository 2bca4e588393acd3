//! JSON rendering of the catalog.

use anyhow::{Context, Result};
use serde::Serialize;
use wave_model::{Catalog, CatalogRow, FileId, MeasureLevel, MetadataKind, MissingRange, ValueLabels};

#[derive(Serialize)]
struct JsonRow<'a> {
    variable_name: &'a str,
    variable_labels: &'a [String],
    variable_value_labels: &'a [ValueLabels],
    variable_measures: Option<MeasureLevel>,
    variable_widths: Option<u32>,
    inconsistent_column_labels: Option<bool>,
    inconsistent_variable_value_labels: Option<bool>,
    team_comments: Option<&'a str>,
    number_of_appearances: usize,
    list_of_appearances: &'a [FileId],
    #[serde(flatten)]
    extended: Option<ExtendedFields<'a>>,
}

#[derive(Serialize)]
struct ExtendedFields<'a> {
    variable_types: &'a [String],
    missing_ranges: &'a [Vec<MissingRange>],
    inconsistent_variable_measures: Option<bool>,
    inconsistent_variable_widths: Option<bool>,
    inconsistent_variable_types: Option<bool>,
    inconsistent_missing_ranges: Option<bool>,
}

impl<'a> JsonRow<'a> {
    fn new(row: &'a CatalogRow, extended: bool) -> Self {
        Self {
            variable_name: &row.variable_name,
            variable_labels: &row.labels,
            variable_value_labels: &row.value_labels,
            variable_measures: row.measure,
            variable_widths: row.display_width,
            inconsistent_column_labels: row.flag(MetadataKind::Label),
            inconsistent_variable_value_labels: row.flag(MetadataKind::ValueLabels),
            team_comments: row.annotation.as_deref(),
            number_of_appearances: row.appearance_count,
            list_of_appearances: &row.appearances,
            extended: extended.then(|| ExtendedFields {
                variable_types: &row.variable_types,
                missing_ranges: &row.missing_ranges,
                inconsistent_variable_measures: row.flag(MetadataKind::MeasurementLevel),
                inconsistent_variable_widths: row.flag(MetadataKind::DisplayWidth),
                inconsistent_variable_types: row.flag(MetadataKind::VariableType),
                inconsistent_missing_ranges: row.flag(MetadataKind::MissingRanges),
            }),
        }
    }
}

/// Renders the catalog as a pretty-printed JSON array of row objects.
///
/// Flags are `null` when no file recorded a value of that kind.
pub fn render_json(catalog: &Catalog, extended: bool) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = catalog
        .rows
        .iter()
        .map(|row| JsonRow::new(row, extended))
        .collect();
    let mut text = serde_json::to_string_pretty(&rows).context("serialize catalog")?;
    text.push('\n');
    Ok(text)
}
