//! Column selection.
//!
//! Columns are renderer-opaque names. An empty set means "select all".

use serde::{Deserialize, Serialize};

/// An ordered set of selected column names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    /// Create an empty set, meaning "select all".
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// True if no explicit columns are selected.
    pub fn is_select_all(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the set holds no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The selected names, in selection order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the selected names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Check whether a column is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }
}

impl From<Vec<String>> for ColumnSet {
    fn from(columns: Vec<String>) -> Self {
        Self(columns)
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for ColumnSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_means_select_all() {
        let columns = ColumnSet::new();
        assert!(columns.is_select_all());
        assert_eq!(columns.len(), 0);
    }

    #[test]
    fn test_order_preserved() {
        let columns: ColumnSet = ["id", "name", "created_at"].into_iter().collect();
        assert!(!columns.is_select_all());
        assert_eq!(columns.names(), ["id", "name", "created_at"]);
        assert!(columns.contains("name"));
        assert!(!columns.contains("email"));
    }
}
