use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wave_model::{FileId, MetadataKind};

use crate::types::{BuildResult, WaveSummary};

pub fn print_summary(result: &BuildResult) {
    let catalog = &result.catalog;
    println!("Input: {}", result.input_dir.display());
    println!("Reference: {}", catalog.reference);
    let waves: Vec<&str> = catalog.files.iter().map(FileId::as_str).collect();
    println!("Waves: {} ({})", catalog.files.len(), waves.join(", "));
    println!(
        "Variables: {} ({} in every wave, {} annotated of {} annotation(s))",
        catalog.variable_count(),
        catalog.shared_count(),
        catalog.annotated_count(),
        result.annotation_count
    );
    match &result.publication {
        Some(publication) => println!(
            "Output: {} ({}, {})",
            publication.location,
            result.render.format.extension(),
            publication.outcome
        ),
        None => println!("Output: dry run, catalog not written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metadata"),
        header_cell("Recorded"),
        header_cell("Inconsistent"),
        header_cell("Catalog column"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total_inconsistent = 0usize;
    for kind in MetadataKind::ALL {
        let recorded = catalog
            .rows
            .iter()
            .filter(|row| row.flag(kind).is_some())
            .count();
        let inconsistent = catalog.inconsistent_count(kind);
        total_inconsistent += inconsistent;
        table.add_row(vec![
            Cell::new(kind.as_str()),
            Cell::new(recorded),
            count_cell(inconsistent, Color::Yellow),
            column_cell(kind, result.render.extended),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total_inconsistent, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_waves(waves: &[WaveSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Wave"),
        header_cell("Columns"),
        header_cell("Labeled"),
        header_cell("Document"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (position, wave) in waves.iter().enumerate() {
        let wave_cell = if wave.is_reference {
            Cell::new(format!("{} (reference)", wave.id))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(wave.id.as_str())
        };
        table.add_row(vec![
            Cell::new(position + 1),
            wave_cell,
            Cell::new(wave.column_count),
            Cell::new(wave.labeled_count),
            dim_cell(wave.path.display()),
        ]);
    }
    println!("{table}");
}

fn column_cell(kind: MetadataKind, extended: bool) -> Cell {
    let column = match kind {
        MetadataKind::Label => "inconsistent_column_labels",
        MetadataKind::ValueLabels => "inconsistent_variable_value_labels",
        MetadataKind::MeasurementLevel => "inconsistent_variable_measures",
        MetadataKind::DisplayWidth => "inconsistent_variable_widths",
        MetadataKind::VariableType => "inconsistent_variable_types",
        MetadataKind::MissingRanges => "inconsistent_missing_ranges",
    };
    let standard = matches!(kind, MetadataKind::Label | MetadataKind::ValueLabels);
    if standard || extended {
        Cell::new(column)
    } else {
        dim_cell("(extended only)")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
