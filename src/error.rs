//! Error types for wordset.
//!
//! Every core set operation is total; errors only arise when turning text
//! back into a set. The error type uses the `thiserror` crate.

use std::collections::TryReserveError;
use std::num::ParseIntError;
use thiserror::Error;

/// The main error type for wordset operations.
#[derive(Error, Debug)]
pub enum WordSetError {
    /// Rendering is not wrapped in `{` and `}`
    #[error("Word set rendering must be wrapped in braces: {input:?}")]
    MissingBraces {
        /// The rejected input
        input: String,
    },

    /// An element is not a non-negative decimal integer
    #[error("Invalid element {token:?}: {source}")]
    InvalidElement {
        /// The token that failed to parse
        token: String,
        /// Underlying integer parse failure
        source: ParseIntError,
    },

    /// An element written with a leading `+`
    #[error("Element {token:?} must not carry a sign")]
    SignedElement {
        /// The rejected token
        token: String,
    },

    /// An element above the parse limit
    #[error("Element {token} exceeds the parse limit of {max}")]
    ElementTooLarge {
        /// The rejected token
        token: String,
        /// Largest accepted element
        max: usize,
    },

    /// Storage for an element could not be allocated
    #[error("Cannot allocate storage for element {token}: {source}")]
    OutOfMemory {
        /// The element being added
        token: String,
        /// Underlying reservation failure
        source: TryReserveError,
    },

    /// Two separators with nothing between them
    #[error("Empty element at position {position}")]
    EmptyElement {
        /// Zero-based position of the empty element
        position: usize,
    },
}

/// A specialized `Result` type for wordset operations.
pub type Result<T> = std::result::Result<T, WordSetError>;
