//! Cross-file variable index: union, frequency, and membership.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use wave_model::{FileId, FileMetadata};

/// Every variable seen across the processed files.
///
/// `variables` is ordered by first appearance (files in processing order,
/// then columns in file order). For each variable, `counts` holds the number
/// of files whose column list contains it and `appearances` lists those files
/// in processing order, so `appearances[v].len() == counts[v]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableIndex {
    variables: Vec<String>,
    counts: BTreeMap<String, usize>,
    appearances: BTreeMap<String, Vec<FileId>>,
}

impl VariableIndex {
    /// Builds the index from the reference-first list of per-file records.
    pub fn from_files(files: &[FileMetadata]) -> Self {
        build_index(
            files
                .iter()
                .map(|file| (&file.file, file.column_names.as_slice())),
        )
    }

    /// Unique variable names in first-appearance order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn appearances(&self) -> &BTreeMap<String, Vec<FileId>> {
        &self.appearances
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.counts.contains_key(variable)
    }

    pub fn count(&self, variable: &str) -> Option<usize> {
        self.counts.get(variable).copied()
    }

    pub fn appearances_of(&self, variable: &str) -> Option<&[FileId]> {
        self.appearances.get(variable).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Builds the variable index from `(file, columns)` pairs in processing order.
///
/// Counts start at 1 on first sighting. A name repeated inside one file is
/// counted once for that file.
pub fn build_index<'a, I>(files: I) -> VariableIndex
where
    I: IntoIterator<Item = (&'a FileId, &'a [String])>,
{
    let mut index = VariableIndex::default();
    let mut file_count = 0usize;
    for (file, columns) in files {
        file_count += 1;
        for column in columns {
            match index.appearances.get_mut(column) {
                None => {
                    index.variables.push(column.clone());
                    index.counts.insert(column.clone(), 1);
                    index.appearances.insert(column.clone(), vec![file.clone()]);
                }
                Some(seen_in) if seen_in.last() == Some(file) => {
                    warn!(file = %file, variable = %column, "duplicate column ignored");
                }
                Some(seen_in) => {
                    seen_in.push(file.clone());
                    *index.counts.entry(column.clone()).or_insert(0) += 1;
                }
            }
        }
    }
    debug!(
        file_count,
        variable_count = index.variables.len(),
        "variable index built"
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> FileId {
        FileId::new(value).unwrap()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let index = build_index(std::iter::empty());
        assert!(index.is_empty());
        assert!(index.counts().is_empty());
        assert!(index.appearances().is_empty());
    }

    #[test]
    fn first_appearance_order_and_counts() {
        let f1 = id("F1");
        let f2 = id("F2");
        let c1 = columns(&["id", "age", "sex"]);
        let c2 = columns(&["region", "id", "age"]);
        let index = build_index([(&f1, c1.as_slice()), (&f2, c2.as_slice())]);

        assert_eq!(index.variables(), &["id", "age", "sex", "region"]);
        assert_eq!(index.count("id"), Some(2));
        assert_eq!(index.count("sex"), Some(1));
        assert_eq!(index.count("region"), Some(1));
        assert_eq!(index.count("missing"), None);
        assert_eq!(index.appearances_of("id"), Some(&[f1.clone(), f2.clone()][..]));
        assert_eq!(index.appearances_of("region"), Some(&[f2][..]));
    }

    #[test]
    fn duplicate_column_in_one_file_counts_once() {
        let f1 = id("F1");
        let c1 = columns(&["id", "id"]);
        let index = build_index([(&f1, c1.as_slice())]);
        assert_eq!(index.variables(), &["id"]);
        assert_eq!(index.count("id"), Some(1));
        assert_eq!(index.appearances_of("id").map(<[FileId]>::len), Some(1));
    }

    #[test]
    fn names_are_case_and_whitespace_sensitive() {
        let f1 = id("F1");
        let c1 = columns(&["Age", "age", "age "]);
        let index = build_index([(&f1, c1.as_slice())]);
        assert_eq!(index.len(), 3);
    }
}
