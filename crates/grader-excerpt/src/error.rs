//! Error types for index-set operations and excerpt extraction.

use thiserror::Error;

/// Precondition violations raised by the index-set engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexSetError {
    /// An input index set was not sorted ascending.
    #[error("index set `{argument}` is not sorted: element {position} ({value}) is smaller than its predecessor")]
    Unsorted {
        /// Name of the offending argument.
        argument: &'static str,
        /// Position of the first element that breaks the ordering.
        position: usize,
        /// Value found at that position.
        value: usize,
    },
}

/// Errors from excerpt extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The transcript had no lines at all, so there is no headline.
    #[error("transcript is empty")]
    EmptyTranscript,

    /// A structured failure summary without the two separator lines around its body.
    #[error("malformed failure transcript: expected at least 2 separator lines, found {found}")]
    MissingSeparators { found: usize },

    #[error(transparent)]
    IndexSet(#[from] IndexSetError),
}

/// Result type for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;
