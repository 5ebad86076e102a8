//! Wordset - Word-Packed Integer Sets
//!
//! Wordset stores sets of non-negative integers as a growable bit-vector of
//! 64-bit words and runs set algebra directly on the packed words. Element
//! lists are only built when asked for.
//!
//! # Key Characteristics
//!
//! - Membership, insertion and removal in O(1)
//! - Union, intersection, difference and symmetric difference in O(words)
//! - Storage grows on demand and is never shrunk behind the caller's back
//! - Hardware popcount for `len()`
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use wordset::WordSet;
//!
//! let mut a = WordSet::new();
//! a.add_all([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
//!
//! let mut b = WordSet::new();
//! b.add_all([3, 4, 5]);
//!
//! a.difference_with(&b);
//! assert_eq!(a.len(), 7);
//! assert_eq!(a.to_string(), "{1, 2, 6, 7, 8, 9, 10}");
//! ```
//!
//! ## Structural vs. Set Equality
//!
//! ```
//! use wordset::WordSet;
//!
//! let a = WordSet::from_words(vec![0b1]);
//! let b = WordSet::from_words(vec![0b1, 0]);
//!
//! assert!(!a.structurally_equal(&b)); // word counts differ
//! assert_eq!(a, b); // same integers
//! ```
//!
//! # Bounds Policy
//!
//! No operation indexes past its storage:
//!
//! - `has` beyond the allocated words returns `false`
//! - `remove` beyond the allocated words is a no-op returning `false`
//! - `difference_with` only visits the words both operands share
//!
//! # Concurrency
//!
//! `WordSet` carries no internal synchronization. Mutation needs `&mut`,
//! and the second operand of every binary operation is borrowed immutably,
//! so callers sharing a set across threads wrap it in their own lock.

// Module declarations
pub mod error;
pub mod word_set;

#[cfg(feature = "wasm")]
pub mod wasm_interface;

// Re-exports for convenient access
pub use error::{Result, WordSetError};
pub use word_set::{Elems, Word, WordSet, MAX_PARSED_ELEMENT, WORD_BITS};

#[cfg(feature = "wasm")]
pub use wasm_interface::WasmWordSet;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Wordset";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
