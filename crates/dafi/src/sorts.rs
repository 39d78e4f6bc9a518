//! Sort instructions.
//!
//! Sorts are an ordered list of (field, direction) pairs; sequence order is
//! tie-break precedence, first entry highest.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order
    #[serde(rename = "DESC")]
    Desc,
    /// No direction given; the renderer applies its own default.
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl SortDirection {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            "" => Some(Self::Unspecified),
            _ => None,
        }
    }

    /// The stable token string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Unspecified => "",
        }
    }

    /// Get the opposite direction. `Unspecified` stays as it is.
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
            Self::Unspecified => Self::Unspecified,
        }
    }
}

/// A single sort instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// The attribute to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Create a new sort instruction.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Reverse the sort direction.
    pub fn reversed(mut self) -> Self {
        self.direction = self.direction.reverse();
        self
    }
}

/// An ordered collection of sort instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sorts(Vec<Sort>);

impl Sorts {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create with a single instruction.
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self(vec![Sort::new(field, direction)])
    }

    /// Create with an ascending sort on a single field.
    pub fn by_asc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Asc)
    }

    /// Create with a descending sort on a single field.
    pub fn by_desc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Desc)
    }

    /// Append a sort instruction.
    pub fn then(mut self, sort: Sort) -> Self {
        self.0.push(sort);
        self
    }

    /// Append an ascending sort.
    pub fn then_asc(self, field: impl Into<String>) -> Self {
        self.then(Sort::asc(field))
    }

    /// Append a descending sort.
    pub fn then_desc(self, field: impl Into<String>) -> Self {
        self.then(Sort::desc(field))
    }

    /// True if no sort is defined.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// True if no sort is defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of sort instructions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The instructions as a slice, highest precedence first.
    pub fn as_slice(&self) -> &[Sort] {
        &self.0
    }

    /// Iterate in precedence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sort> {
        self.0.iter()
    }

    /// The primary (highest precedence) sort instruction.
    pub fn primary(&self) -> Option<&Sort> {
        self.0.first()
    }

    /// Check if sorting by a specific field.
    pub fn sorts_by(&self, field: &str) -> bool {
        self.0.iter().any(|s| s.field == field)
    }
}

impl From<Vec<Sort>> for Sorts {
    fn from(sorts: Vec<Sort>) -> Self {
        Self(sorts)
    }
}

impl FromIterator<Sort> for Sorts {
    fn from_iter<I: IntoIterator<Item = Sort>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Sorts {
    type Item = Sort;
    type IntoIter = std::vec::IntoIter<Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sorts {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::from_str("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_str("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_str(""), Some(SortDirection::Unspecified));
        assert_eq!(SortDirection::Asc.reverse(), SortDirection::Desc);
        assert_eq!(SortDirection::Unspecified.reverse(), SortDirection::Unspecified);
        assert_eq!(SortDirection::default(), SortDirection::Unspecified);
    }

    #[test]
    fn test_sort_creation() {
        let sort = Sort::asc("created_at");
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(sort.reversed().direction, SortDirection::Desc);
    }

    #[test]
    fn test_sorts_precedence_order() {
        let sorts = Sorts::by_desc("updated_at").then_asc("id");

        assert_eq!(sorts.len(), 2);
        assert!(sorts.sorts_by("updated_at"));
        assert!(sorts.sorts_by("id"));
        assert!(!sorts.sorts_by("subject"));

        let primary = sorts.primary().unwrap();
        assert_eq!(primary.field, "updated_at");
        assert_eq!(primary.direction, SortDirection::Desc);
    }

    #[test]
    fn test_empty_sorts() {
        let sorts = Sorts::new();
        assert!(sorts.is_zero());
        assert_eq!(sorts.len(), 0);
        assert!(sorts.primary().is_none());
    }

    #[test]
    fn test_direction_serde_tokens() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"ASC\"");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"DESC\"");
        assert_eq!(serde_json::to_string(&SortDirection::Unspecified).unwrap(), "\"\"");
    }
}
