//! Pagination parameters.
//!
//! Zero is the "unset" value for both fields. A renderer must never read a
//! zero page number as "page 0" or a zero page size as "0 rows"; it checks
//! [`Pagination::has_page_number`] / [`Pagination::has_page_size`] and
//! supplies its own defaults for the unset sides.

use serde::{Deserialize, Serialize};

/// Page number and page size for a query, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, 1-indexed; 0 means unset.
    #[serde(default)]
    pub page_number: u64,
    /// Rows per page; 0 means unset.
    #[serde(default)]
    pub page_size: u64,
}

impl Pagination {
    /// Create pagination with both fields set.
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// True if neither field is set.
    pub fn is_zero(&self) -> bool {
        self.page_number == 0 && self.page_size == 0
    }

    /// True if the page number is set.
    pub fn has_page_number(&self) -> bool {
        self.page_number > 0
    }

    /// True if the page size is set.
    pub fn has_page_size(&self) -> bool {
        self.page_size > 0
    }

    /// Row offset implied by the pagination, when both fields are set.
    pub fn offset(&self) -> Option<u64> {
        if self.has_page_number() && self.has_page_size() {
            Some((self.page_number - 1) * self.page_size)
        } else {
            None
        }
    }

    /// Row limit implied by the pagination, when the page size is set.
    pub fn limit(&self) -> Option<u64> {
        if self.has_page_size() {
            Some(self.page_size)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_value_means_unset() {
        let pagination = Pagination::default();
        assert!(pagination.is_zero());
        assert!(!pagination.has_page_number());
        assert!(!pagination.has_page_size());
        assert_eq!(pagination.offset(), None);
        assert_eq!(pagination.limit(), None);
    }

    #[test]
    fn test_set_pagination() {
        let pagination = Pagination::new(3, 25);
        assert!(!pagination.is_zero());
        assert!(pagination.has_page_number());
        assert!(pagination.has_page_size());
        assert_eq!(pagination.offset(), Some(50));
        assert_eq!(pagination.limit(), Some(25));
    }

    #[test]
    fn test_partially_set_pagination() {
        let size_only = Pagination::new(0, 25);
        assert!(!size_only.is_zero());
        assert!(!size_only.has_page_number());
        assert!(size_only.has_page_size());
        assert_eq!(size_only.offset(), None);
        assert_eq!(size_only.limit(), Some(25));

        let page_only = Pagination::new(2, 0);
        assert!(page_only.has_page_number());
        assert_eq!(page_only.offset(), None);
        assert_eq!(page_only.limit(), None);
    }

    #[test]
    fn test_first_page_offset() {
        assert_eq!(Pagination::new(1, 20).offset(), Some(0));
    }
}
