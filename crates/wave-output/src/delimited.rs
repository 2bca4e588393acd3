//! CSV rendering of the catalog.
//!
//! Set and list cells hold JSON arrays so the cell text stays parseable.
//! Empty sets, absent scalars and consistent flags render as blank cells.

use std::io::Write;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use wave_model::{Catalog, CatalogRow, FileId, MetadataKind};

/// Catalog columns, in output order.
pub const STANDARD_COLUMNS: [&str; 10] = [
    "variable_name",
    "variable_labels",
    "variable_value_labels",
    "variable_measures",
    "variable_widths",
    "inconsistent_column_labels",
    "inconsistent_variable_value_labels",
    "team_comments",
    "number_of_appearances",
    "list_of_appearances",
];

/// Columns appended in extended mode.
pub const EXTENDED_COLUMNS: [&str; 6] = [
    "variable_types",
    "missing_ranges",
    "inconsistent_variable_measures",
    "inconsistent_variable_widths",
    "inconsistent_variable_types",
    "inconsistent_missing_ranges",
];

/// Header row for the requested mode.
pub fn csv_header(extended: bool) -> Vec<&'static str> {
    let mut header = STANDARD_COLUMNS.to_vec();
    if extended {
        header.extend(EXTENDED_COLUMNS);
    }
    header
}

/// Writes the catalog as CSV with one header row.
pub fn write_csv<W: Write>(catalog: &Catalog, extended: bool, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer
        .write_record(csv_header(extended))
        .context("write catalog header")?;
    for row in &catalog.rows {
        let record = row_record(row, extended)
            .with_context(|| format!("render row {}", row.variable_name))?;
        writer
            .write_record(&record)
            .with_context(|| format!("write row {}", row.variable_name))?;
    }
    writer.flush().context("flush catalog")?;
    Ok(())
}

/// Renders the catalog as a CSV string.
pub fn render_csv(catalog: &Catalog, extended: bool) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(catalog, extended, &mut buffer)?;
    String::from_utf8(buffer).context("catalog is not valid UTF-8")
}

fn row_record(row: &CatalogRow, extended: bool) -> Result<Vec<String>> {
    let appearances: Vec<&str> = row.appearances.iter().map(FileId::as_str).collect();
    let mut record = vec![
        row.variable_name.clone(),
        array_cell(&row.labels)?,
        array_cell(&row.value_labels)?,
        row.measure
            .map(|measure| measure.as_str().to_string())
            .unwrap_or_default(),
        row.display_width
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        row.flag_text(MetadataKind::Label).to_string(),
        row.flag_text(MetadataKind::ValueLabels).to_string(),
        row.annotation.clone().unwrap_or_default(),
        row.appearance_count.to_string(),
        array_cell(&appearances)?,
    ];
    if extended {
        record.push(array_cell(&row.variable_types)?);
        record.push(array_cell(&row.missing_ranges)?);
        for kind in [
            MetadataKind::MeasurementLevel,
            MetadataKind::DisplayWidth,
            MetadataKind::VariableType,
            MetadataKind::MissingRanges,
        ] {
            record.push(row.flag_text(kind).to_string());
        }
    }
    Ok(record)
}

fn array_cell<T: Serialize>(values: &[T]) -> Result<String> {
    if values.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(values).context("serialize cell")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_model::ValueLabels;

    #[test]
    fn extended_header_appends_columns() {
        assert_eq!(csv_header(false).len(), 10);
        let header = csv_header(true);
        assert_eq!(header.len(), 16);
        assert_eq!(header[10], "variable_types");
        assert_eq!(header[15], "inconsistent_missing_ranges");
    }

    #[test]
    fn empty_sets_are_blank() {
        let empty: [String; 0] = [];
        assert_eq!(array_cell(&empty).unwrap(), "");
        let no_labels: [ValueLabels; 0] = [];
        assert_eq!(array_cell(&no_labels).unwrap(), "");
        assert_eq!(array_cell(&["a", "b"]).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn value_label_codes_keep_numeric_order() {
        let labels: ValueLabels = [(10_i64, "Ten"), (2_i64, "Two")].into_iter().collect();
        assert_eq!(array_cell(&[labels]).unwrap(), r#"[{"2":"Two","10":"Ten"}]"#);
    }
}
