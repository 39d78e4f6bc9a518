//! Error types for criteria inspection.
//!
//! Construction of criteria never fails; these errors are only produced by
//! the explicit well-formedness checks such as [`crate::Filters::validate`].

use thiserror::Error;

/// Ways a filter sequence can be malformed from a renderer's point of view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A group boolean flag disagrees with its depth counter.
    #[error("group marker disagrees with its counter at position {position}")]
    GroupMarkerMismatch { position: usize },

    /// A group was closed before any matching open.
    #[error("group closed at position {position} without a matching open")]
    UnexpectedGroupClose { position: usize },

    /// A filter that is not the last in sequence carries no usable connective.
    #[error("filter at position {position} has no chaining key joining it to the next filter")]
    MissingChainingKey { position: usize },

    /// Open and close counters do not balance over the whole sequence.
    #[error("unbalanced groups: {opened} opened, {closed} closed")]
    UnbalancedGroups { opened: u64, closed: u64 },
}
