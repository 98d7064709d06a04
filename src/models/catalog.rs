//! Catalog record model representing one tour row of the catalog sheet.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single cell of a catalog row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell (prices, durations)
    Number(f64),

    /// Boolean cell (checkbox columns)
    Bool(bool),

    /// Free text cell
    Text(String),

    /// Empty cell
    Blank,
}

impl CellValue {
    /// Whether the cell carries no value.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Blank => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Convert text that is a plain integer or decimal into a number.
    ///
    /// Grouped values like "35.000.000 đ" stay text.
    pub fn numericise(self) -> Self {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                let numeric = !trimmed.is_empty()
                    && trimmed.chars().any(|c| c.is_ascii_digit())
                    && trimmed
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));

                match trimmed.parse::<f64>() {
                    Ok(n) if numeric && n.is_finite() => Self::Number(n),
                    _ => Self::Text(text),
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers render without a trailing ".0" so "35000000" stays searchable
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(text) => f.write_str(text),
            Self::Blank => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Blank => serializer.serialize_none(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Blank
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One sellable tour: an ordered mapping of column name to cell value.
///
/// Records are read-only snapshots owned by the catalog source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogRecord {
    fields: Vec<(String, CellValue)>,
}

impl CatalogRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, keeping column order.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field. A repeated column name replaces the earlier value in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field by exact column name.
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All non-blank values, lowercased and joined by a single space.
    pub fn flattened_text(&self) -> String {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .map(|(_, value)| value.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render as a single `column: value | column: value` line for prompts.
    pub fn to_line(&self) -> String {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Build records from a header row and data rows, like a sheet's `get_all_records`.
    ///
    /// Columns with a blank header are dropped, short rows are padded with blanks
    /// and rows with no values at all are skipped.
    pub fn from_rows(headers: &[CellValue], rows: Vec<Vec<CellValue>>) -> Vec<CatalogRecord> {
        let columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_blank())
            .map(|(i, header)| (i, header.to_string().trim().to_string()))
            .collect();

        rows.into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_blank()))
            .map(|row| {
                let mut record = CatalogRecord::new();
                for (index, name) in &columns {
                    let value = row.get(*index).cloned().unwrap_or(CellValue::Blank);
                    record.push(name.clone(), value);
                }
                record
            })
            .collect()
    }
}

impl Serialize for CatalogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
