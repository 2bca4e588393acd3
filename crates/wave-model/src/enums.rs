//! Type-safe enumerations for variable metadata.
//!
//! Statistical files carry these concepts as loose tokens; parsing them once
//! at the boundary keeps the reconciliation code free of string matching.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Statistical scale of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeasureLevel {
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
    /// Interval or ratio data.
    Scale,
    /// The file does not declare a level.
    Unknown,
}

impl MeasureLevel {
    /// Returns the token as written by statistical packages.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureLevel::Nominal => "nominal",
            MeasureLevel::Ordinal => "ordinal",
            MeasureLevel::Scale => "scale",
            MeasureLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MeasureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasureLevel {
    type Err = ModelError;

    /// Case-insensitive; accepts the common synonyms used by exporters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "nominal" => Ok(MeasureLevel::Nominal),
            "ordinal" => Ok(MeasureLevel::Ordinal),
            "scale" | "continuous" | "interval" | "ratio" => Ok(MeasureLevel::Scale),
            "unknown" | "" => Ok(MeasureLevel::Unknown),
            _ => Err(ModelError::UnknownMeasureLevel(s.to_string())),
        }
    }
}

impl Serialize for MeasureLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MeasureLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The metadata kinds that are grouped and compared across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Label,
    ValueLabels,
    MeasurementLevel,
    DisplayWidth,
    VariableType,
    MissingRanges,
}

impl MetadataKind {
    pub const ALL: [MetadataKind; 6] = [
        MetadataKind::Label,
        MetadataKind::ValueLabels,
        MetadataKind::MeasurementLevel,
        MetadataKind::DisplayWidth,
        MetadataKind::VariableType,
        MetadataKind::MissingRanges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::Label => "label",
            MetadataKind::ValueLabels => "value labels",
            MetadataKind::MeasurementLevel => "measurement level",
            MetadataKind::DisplayWidth => "display width",
            MetadataKind::VariableType => "variable type",
            MetadataKind::MissingRanges => "missing ranges",
        }
    }

    /// Fixed message written into the catalog when the kind is inconsistent.
    pub fn inconsistency_message(&self) -> &'static str {
        match self {
            MetadataKind::Label => "Inconsistent column labels",
            MetadataKind::ValueLabels => "Inconsistent variable value labels",
            MetadataKind::MeasurementLevel => "Inconsistent variable measures",
            MetadataKind::DisplayWidth => "Inconsistent variable widths",
            MetadataKind::VariableType => "Inconsistent variable types",
            MetadataKind::MissingRanges => "Inconsistent missing ranges",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
