//! Free-form annotation sheet loading.
//!
//! The sheet is a CSV export with one row per variable and a comment column.
//! Header names are matched case-insensitively against a few common
//! spellings.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const VARIABLE_COLUMN: &[&str] = &["Variable", "Variable Name", "Variable_Name", "Name"];
const COMMENT_COLUMN: &[&str] = &[
    "Team Comments",
    "Team_Comments",
    "Comments",
    "Comment",
    "Notes",
];

/// Loads a variable to comment mapping from a CSV annotation sheet.
pub fn load_annotations(path: &Path) -> Result<BTreeMap<String, String>> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_annotations(file, path)
}

/// Reads annotations from any CSV source; `path` is used for error reporting.
///
/// Variable cells are kept verbatim, since dataset variables are matched by
/// exact name; only comments are trimmed. Rows with a blank variable or
/// comment are skipped. When a variable appears more than once, the first
/// comment is kept.
pub fn read_annotations<R: Read>(reader: R, path: &Path) -> Result<BTreeMap<String, String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let header_map = build_header_map(&headers);
    let variable_idx =
        find_column_index(&header_map, VARIABLE_COLUMN).ok_or_else(|| IngestError::MissingColumn {
            column: VARIABLE_COLUMN[0].to_string(),
            path: path.to_path_buf(),
        })?;
    let comment_idx =
        find_column_index(&header_map, COMMENT_COLUMN).ok_or_else(|| IngestError::MissingColumn {
            column: COMMENT_COLUMN[0].to_string(),
            path: path.to_path_buf(),
        })?;

    let mut annotations = BTreeMap::new();
    let mut duplicates = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let variable = record.get(variable_idx).unwrap_or("").to_string();
        let comment = normalize_cell(record.get(comment_idx).unwrap_or(""));
        if variable.trim().is_empty() || comment.is_empty() {
            continue;
        }
        if annotations.contains_key(&variable) {
            duplicates += 1;
            continue;
        }
        annotations.insert(variable, comment);
    }
    if duplicates > 0 {
        warn!(path = %path.display(), duplicates, "duplicate annotation rows ignored");
    }
    debug!(path = %path.display(), annotation_count = annotations.len(), "annotations loaded");
    Ok(annotations)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn build_header_map(headers: &csv::StringRecord) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        map.entry(normalize_cell(header).to_uppercase())
            .or_insert(idx);
    }
    map
}

fn find_column_index(map: &BTreeMap<String, usize>, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| map.get(&candidate.trim().to_uppercase()).copied())
}
