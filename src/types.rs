//! Shared types passed between stages.
//!
//! Row sources produce [`Record`]s, the generate stage turns them into
//! [`GeneratedFile`]s, and the driver writes those files to disk.

use serde::Serialize;
use std::collections::BTreeMap;

/// One row of input data: field name → string value.
///
/// Empty cells are stored as `""` when the record is loaded, so lookups never
/// have to distinguish "empty" from "missing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or `""` when the record doesn't supply it.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Where a generated file came from, for reporting and duplicate warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileOrigin {
    /// Sheet row number (header is row 1), or the 1-based iteration number.
    Row { category: String, row: usize },
    /// A hand-written file copied verbatim from the category directory.
    Static { category: String, file: String },
}

impl FileOrigin {
    pub fn category(&self) -> &str {
        match self {
            FileOrigin::Row { category, .. } | FileOrigin::Static { category, .. } => category,
        }
    }
}

impl std::fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOrigin::Row { category, row } => write!(f, "{category} row {row}"),
            FileOrigin::Static { category, file } => write!(f, "{category}/{file}"),
        }
    }
}

/// An output file held in memory until the driver writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Full file name including extension, e.g. `conditionDiabetes_e10.groovy`.
    pub name: String,
    pub content: String,
    pub origin: FileOrigin,
}

impl GeneratedFile {
    /// File name without its extension, as referenced by `transformByTemplate`.
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) if dot > 0 => &self.name[..dot],
            _ => &self.name,
        }
    }
}
