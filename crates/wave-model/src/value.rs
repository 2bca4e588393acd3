//! Coded values, value-label mappings, and missing-value ranges.
//!
//! Raw codes arrive from different files with different spellings (`1`,
//! `1.0`, `"1"`). [`ValueCode`] normalises numeric spellings to one textual
//! form so that mappings extracted from different waves compare equal when
//! they carry the same content.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A raw coded value as it appears in a value-label mapping or missing range.
///
/// Numeric codes are normalised (`"1.0"` and `1` become `1`); anything that
/// does not parse as a finite number is kept verbatim.
#[derive(Debug, Clone)]
pub struct ValueCode {
    text: String,
    numeric: Option<f64>,
}

impl ValueCode {
    pub fn new(raw: &str) -> Self {
        match normalize_numeric_key(raw) {
            Some((text, value)) => Self {
                text,
                numeric: Some(value),
            },
            None => Self {
                text: raw.to_string(),
                numeric: None,
            },
        }
    }

    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self {
                text: format!("{value}"),
                numeric: None,
            };
        }
        let value = if value == 0.0 { 0.0 } else { value };
        Self {
            text: format!("{value}"),
            numeric: Some(value),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.numeric
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }
}

impl PartialEq for ValueCode {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ValueCode {}

impl Ord for ValueCode {
    /// Numeric codes sort by value and before textual codes.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric, other.numeric) {
            (Some(left), Some(right)) => left.total_cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.text.cmp(&other.text),
        }
    }
}

impl PartialOrd for ValueCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ValueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ValueCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<f64> for ValueCode {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<i64> for ValueCode {
    fn from(value: i64) -> Self {
        Self::from_f64(value as f64)
    }
}

impl Serialize for ValueCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

struct ValueCodeVisitor;

impl Visitor<'_> for ValueCodeVisitor {
    type Value = ValueCode;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a numeric or string code")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ValueCode, E> {
        Ok(ValueCode::new(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ValueCode, E> {
        Ok(ValueCode::from_f64(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ValueCode, E> {
        Ok(ValueCode::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ValueCode, E> {
        Ok(ValueCode::from_f64(value as f64))
    }
}

impl<'de> Deserialize<'de> for ValueCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueCodeVisitor)
    }
}

/// Mapping from raw coded value to display label for one variable in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueLabels(BTreeMap<ValueCode, String>);

impl ValueLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<ValueCode>, label: impl Into<String>) {
        self.0.insert(code.into(), label.into());
    }

    pub fn get(&self, code: &ValueCode) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ValueCode, &str)> {
        self.0.iter().map(|(code, label)| (code, label.as_str()))
    }

    /// JSON object view with keys in sorted order.
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .0
            .iter()
            .map(|(code, label)| (code.as_str().to_string(), Value::String(label.clone())))
            .collect();
        Value::Object(object)
    }

    /// Canonical serialization: a JSON object with sorted keys.
    ///
    /// Two mappings are the same value-label set iff their canonical forms
    /// are identical, regardless of the order the codes were declared in.
    pub fn canonical(&self) -> String {
        self.to_json().to_string()
    }
}

impl<C: Into<ValueCode>, L: Into<String>> FromIterator<(C, L)> for ValueLabels {
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, label)| (code.into(), label.into()))
                .collect(),
        )
    }
}

/// A user-defined missing-value range (`lo == hi` for a discrete missing value).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissingRange {
    pub lo: ValueCode,
    pub hi: ValueCode,
}

impl MissingRange {
    pub fn new(lo: impl Into<ValueCode>, hi: impl Into<ValueCode>) -> Self {
        Self {
            lo: lo.into(),
            hi: hi.into(),
        }
    }

    pub fn discrete(value: impl Into<ValueCode>) -> Self {
        let value = value.into();
        Self {
            lo: value.clone(),
            hi: value,
        }
    }
}

impl fmt::Display for MissingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{}", self.lo)
        } else {
            write!(f, "{}..{}", self.lo, self.hi)
        }
    }
}

fn normalize_numeric_key(value: &str) -> Option<(String, f64)> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())?;
    let parsed = if parsed == 0.0 { 0.0 } else { parsed };
    let mut text = format!("{parsed}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text.is_empty() {
        None
    } else {
        Some((text, parsed))
    }
}
