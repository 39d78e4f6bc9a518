//! # dafi
//!
//! Storage-agnostic query criteria: describe *what subset of data to
//! retrieve* — filter predicates, sort order, pagination, column selection —
//! as a plain in-memory value, independent of any storage engine or query
//! language. A downstream renderer (a SQL builder, say) consumes the
//! finished [`Criteria`] read-only; translation into an actual query is out
//! of scope here.
//!
//! Nested AND/OR filter expressions are encoded as a flat, order-preserving
//! sequence of tokens with group-boundary markers and depth counters, so a
//! renderer reconstructs parenthesization in a single left-to-right pass.
//! See the [`filters`] module.
//!
//! ## Structure
//!
//! - `filters` - Filter operators, predicates, and the flat filter sequence
//! - `sorts` - Sort instructions and directions
//! - `columns` - Column selection
//! - `pagination` - Page number/size with unset semantics
//! - `criteria` - The aggregate value and its fluent API
//! - `error` - Well-formedness inspection errors
//!
//! ## Example
//!
//! ```
//! use dafi::{ChainingKey, Criteria, Filter, FilterOperator, SortDirection};
//!
//! let criteria = Criteria::where_by("status", FilterOperator::Equal, "open")
//!     .and_group(vec![
//!         Filter::equals("priority", 1).chained(ChainingKey::Or),
//!         Filter::equals("escalated", true),
//!     ])
//!     .sort_by("updated_at", SortDirection::Desc)
//!     .page(1)
//!     .limit(25);
//!
//! // status = open AND (priority = 1 OR escalated = true)
//! assert_eq!(criteria.filters.len(), 3);
//! assert!(criteria.filters.is_valid());
//! assert!(criteria.is_paginated());
//! ```

pub mod columns;
pub mod criteria;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod sorts;

// Re-exports for convenience
pub use columns::ColumnSet;
pub use criteria::Criteria;
pub use error::FilterError;
pub use filters::{ChainingKey, Filter, FilterOperator, FilterValue, Filters};
pub use pagination::Pagination;
pub use sorts::{Sort, SortDirection, Sorts};
