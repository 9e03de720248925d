//! Query result rows.
//!
//! A query returns a [`RowSet`] with the fixed columns `(_id, type, name)`.
//! Rows are produced fresh on every call; an `_id` means nothing outside the
//! result set it came from.

use serde::{Deserialize, Serialize};

/// Column names of every query result, in order.
pub const COLUMNS: [&str; 3] = ["_id", "type", "name"];

/// One row of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualRow {
    /// Position of the row within its result set.
    #[serde(rename = "_id")]
    pub id: i64,
    /// Config type token.
    #[serde(rename = "type")]
    pub config_type: String,
    /// File name within the type's directory.
    pub name: String,
}

impl VirtualRow {
    /// Create a row.
    pub fn new(id: i64, config_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            config_type: config_type.into(),
            name: name.into(),
        }
    }
}

/// An ordered set of query result rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    rows: Vec<VirtualRow>,
}

impl RowSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row with the next id in sequence and return that id.
    pub fn push(&mut self, config_type: impl Into<String>, name: impl Into<String>) -> i64 {
        let id = self.rows.len() as i64;
        self.rows.push(VirtualRow::new(id, config_type, name));
        id
    }

    /// Column names.
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows.
    pub fn rows(&self) -> &[VirtualRow] {
        &self.rows
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, VirtualRow> {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = VirtualRow;
    type IntoIter = std::vec::IntoIter<VirtualRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a VirtualRow;
    type IntoIter = std::slice::Iter<'a, VirtualRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
