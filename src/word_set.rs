//! WordSet - A growable set of non-negative integers packed into 64-bit words.
//!
//! Element `x` lives in bit `x % 64` of word `x / 64`. Words past the end of
//! storage are implicitly zero, so membership queries never need to grow the
//! set and binary operations only touch the words both operands share.
//!
//! # Design
//!
//! - Uses `Vec<u64>` for storage (64-bit words on every platform)
//! - Bit indexing: word_idx = x / 64, bit_offset = x % 64
//! - Storage grows on demand and never shrinks on its own
//! - Set algebra works word-by-word on the packed representation
//!
//! # Examples
//!
//! ```
//! use wordset::WordSet;
//!
//! let mut set = WordSet::new();
//! set.add_all([6, 2, 7]);
//! assert!(set.has(6));
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.elems(), vec![2, 6, 7]);
//! assert_eq!(set.to_string(), "{2, 6, 7}");
//! ```

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use std::fmt;
use std::iter::{Enumerate, FusedIterator};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};
use std::slice;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::{Result, WordSetError};

/// Word type for bit storage (64-bit unsigned integer)
pub type Word = u64;

/// Number of bits per word
pub const WORD_BITS: usize = 64;

/// Largest element `FromStr` accepts (storage for it is 512 MiB)
pub const MAX_PARSED_ELEMENT: usize = u32::MAX as usize;

/// Get word index from element value
#[inline(always)]
const fn get_word_idx(x: usize) -> usize {
    x >> 6 // x / 64
}

/// Get bit index within word from element value
#[inline(always)]
const fn get_bit_idx(x: usize) -> usize {
    x & 63 // x % 64
}

/// Set of non-negative integers stored as a packed, growable bit-vector.
///
/// Two notions of equality exist:
///
/// - [`WordSet::structurally_equal`] compares the word sequences exactly,
///   length included. A set holding trailing zero words is *not*
///   structurally equal to the same elements stored without them.
/// - `==` ([`WordSet::set_equals`]) compares the sets as sets of integers.
///
/// ```
/// use wordset::WordSet;
///
/// let mut a = WordSet::new();
/// a.add_all([1, 200]);
/// a.remove(200);
///
/// let b: WordSet = [1].into_iter().collect();
/// assert_eq!(a, b);
/// assert!(!a.structurally_equal(&b));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordSet {
    /// Storage words; bit b of words[w] holds element w * 64 + b
    words: Vec<Word>,
}

impl WordSet {
    /// Create an empty set with no allocated words.
    #[inline]
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Create a set directly from its word representation.
    ///
    /// Trailing zero words are kept as given.
    ///
    /// ```
    /// use wordset::WordSet;
    ///
    /// let set = WordSet::from_words(vec![0b1010, 0, 1]);
    /// assert_eq!(set.elems(), vec![1, 3, 128]);
    /// assert_eq!(set.num_words(), 3);
    /// ```
    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    // =========================================================================
    // Counting
    // =========================================================================

    /// Number of elements in the set (population count over all words).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set holds no elements, regardless of how many words are allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Add `x` to the set, appending zero words until its word index fits.
    #[inline]
    pub fn add(&mut self, x: usize) {
        let word = get_word_idx(x);
        if word >= self.words.len() {
            self.grow_to(word + 1);
        }
        self.words[word] |= 1 << get_bit_idx(x);
    }

    /// Add every element of `xs`, in order.
    pub fn add_all<I>(&mut self, xs: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for x in xs {
            self.add(x);
        }
    }

    /// Report whether `x` is in the set.
    ///
    /// Elements past the allocated words are simply absent; storage is untouched.
    #[inline]
    pub fn has(&self, x: usize) -> bool {
        self.words
            .get(get_word_idx(x))
            .map_or(false, |w| (w >> get_bit_idx(x)) & 1 == 1)
    }

    /// Remove `x` from the set, returning whether it was present.
    ///
    /// Removing an element whose word was never allocated is a no-op: the
    /// element cannot be present, and storage does not grow.
    #[inline]
    pub fn remove(&mut self, x: usize) -> bool {
        let word = get_word_idx(x);
        match self.words.get_mut(word) {
            Some(w) => {
                let mask: Word = 1 << get_bit_idx(x);
                let present = *w & mask != 0;
                *w &= !mask;
                present
            }
            None => {
                debug!(
                    element = x,
                    word,
                    num_words = self.words.len(),
                    "remove past allocated words ignored"
                );
                false
            }
        }
    }

    /// Remove every element and release all words.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Return an independent copy with identical words.
    pub fn copy(&self) -> WordSet {
        self.clone()
    }

    // =========================================================================
    // Set Algebra (in place)
    // =========================================================================

    /// Set `self` to the union of `self` and `other`.
    ///
    /// Words `other` holds beyond `self`'s length are copied onto the end.
    pub fn union_with(&mut self, other: &WordSet) {
        let len = self.words.len();
        for (word, &o) in self.words.iter_mut().zip(&other.words) {
            *word |= o;
        }
        if other.words.len() > len {
            self.append_words(&other.words[len..]);
        }
    }

    /// Set `self` to the intersection of `self` and `other`.
    ///
    /// The word count of `self` never changes; words with no counterpart in
    /// `other` are zeroed rather than dropped.
    pub fn intersect_with(&mut self, other: &WordSet) {
        for (i, word) in self.words.iter_mut().enumerate() {
            *word &= other.words.get(i).copied().unwrap_or(0);
        }
    }

    /// Set `self` to `self` minus `other`.
    ///
    /// Only the words both sets share are visited; the rest of `other` cannot
    /// remove anything from `self`.
    pub fn difference_with(&mut self, other: &WordSet) {
        for (word, &o) in self.words.iter_mut().zip(&other.words) {
            *word &= !o;
        }
    }

    /// Set `self` to the symmetric difference of `self` and `other`.
    ///
    /// Shared words are XORed first; then any words `other` holds beyond
    /// `self`'s length are copied onto the end. Extra words of `self` are
    /// already correct against an implicit zero and stay as they are.
    pub fn symmetric_difference_with(&mut self, other: &WordSet) {
        let len = self.words.len();
        for (word, &o) in self.words.iter_mut().zip(&other.words) {
            *word ^= o;
        }
        if other.words.len() > len {
            self.append_words(&other.words[len..]);
        }
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Exact word-level equality: same word count and identical words.
    ///
    /// Sets holding the same integers but a different number of trailing
    /// zero words are reported as different. Use [`WordSet::set_equals`] (or
    /// `==`) to compare contents, or [`WordSet::trim`] both sides first.
    #[inline]
    pub fn structurally_equal(&self, other: &WordSet) -> bool {
        self.words == other.words
    }

    /// Equality as sets of integers, ignoring trailing zero words.
    pub fn set_equals(&self, other: &WordSet) -> bool {
        self.significant_words() == other.significant_words()
    }

    /// Drop trailing all-zero words.
    ///
    /// ```
    /// use wordset::WordSet;
    ///
    /// let mut set = WordSet::from_words(vec![1, 0, 0]);
    /// set.trim();
    /// assert_eq!(set.num_words(), 1);
    /// ```
    pub fn trim(&mut self) {
        let end = self.significant_words().len();
        self.words.truncate(end);
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Iterate over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> Elems<'_> {
        Elems {
            words: self.words.iter().enumerate(),
            base: 0,
            current: 0,
        }
    }

    /// Collect the elements in ascending order.
    pub fn elems(&self) -> Vec<usize> {
        let mut elems = Vec::with_capacity(self.len());
        elems.extend(self.iter());
        elems
    }

    // =========================================================================
    // Information and Access
    // =========================================================================

    /// Get number of words in storage, trailing zero words included.
    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Get direct read-only access to word storage.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.words.capacity() * std::mem::size_of::<Word>()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn grow_to(&mut self, num_words: usize) {
        trace!(
            from_words = self.words.len(),
            to_words = num_words,
            "growing word storage"
        );
        self.words.resize(num_words, 0);
    }

    /// Reserve the words needed to hold `x` without aborting on failure.
    fn try_reserve_for(&mut self, x: usize) -> std::result::Result<(), TryReserveError> {
        let needed = get_word_idx(x) + 1;
        if needed > self.words.len() {
            self.words.try_reserve(needed - self.words.len())?;
        }
        Ok(())
    }

    fn append_words(&mut self, tail: &[Word]) {
        trace!(
            from_words = self.words.len(),
            to_words = self.words.len() + tail.len(),
            "appending operand words"
        );
        self.words.extend_from_slice(tail);
    }

    /// Words up to and including the last non-zero one.
    fn significant_words(&self) -> &[Word] {
        let end = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |i| i + 1);
        &self.words[..end]
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// Ascending iterator over the elements of a [`WordSet`].
///
/// Created by [`WordSet::iter`]. All-zero words are skipped without
/// scanning their bits.
#[derive(Clone, Debug)]
pub struct Elems<'a> {
    words: Enumerate<slice::Iter<'a, Word>>,
    /// Element value of bit 0 in `current`
    base: usize,
    /// Bits of the current word not yet yielded
    current: Word,
}

impl Iterator for Elems<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            let (word_idx, &word) = self.words.next()?;
            self.base = word_idx * WORD_BITS;
            self.current = word;
        }
        let bit_idx = self.current.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.current &= self.current - 1;
        Some(self.base + bit_idx)
    }
}

impl FusedIterator for Elems<'_> {}

impl<'a> IntoIterator for &'a WordSet {
    type Item = usize;
    type IntoIter = Elems<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<usize> for WordSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = WordSet::new();
        set.add_all(iter);
        set
    }
}

impl Extend<usize> for WordSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

// =============================================================================
// Rendering and Parsing
// =============================================================================

impl fmt::Display for WordSet {
    /// Render as `{e1, e2, ..., en}` in ascending order; `{}` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().format(", "))
    }
}

impl FromStr for WordSet {
    type Err = WordSetError;

    /// Parse the rendering produced by `Display`.
    ///
    /// Elements may appear in any order and may repeat. Whitespace around
    /// elements and braces is ignored. Elements are plain decimal digits (no
    /// sign) no larger than [`MAX_PARSED_ELEMENT`]; storage is reserved
    /// fallibly, so an allocation failure comes back as an error.
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| {
                debug!(input = s, "word set rendering missing braces");
                WordSetError::MissingBraces {
                    input: s.to_string(),
                }
            })?;

        let mut set = WordSet::new();
        if inner.trim().is_empty() {
            return Ok(set);
        }

        for (position, token) in inner.split(',').enumerate() {
            let token = token.trim();
            if token.is_empty() {
                debug!(input = s, position, "empty element in word set rendering");
                return Err(WordSetError::EmptyElement { position });
            }
            if token.starts_with('+') {
                debug!(input = s, token, "signed element in word set rendering");
                return Err(WordSetError::SignedElement {
                    token: token.to_string(),
                });
            }
            let x = token.parse::<usize>().map_err(|source| {
                debug!(input = s, token, "invalid element in word set rendering");
                WordSetError::InvalidElement {
                    token: token.to_string(),
                    source,
                }
            })?;
            if x > MAX_PARSED_ELEMENT {
                debug!(input = s, token, "element above parse limit");
                return Err(WordSetError::ElementTooLarge {
                    token: token.to_string(),
                    max: MAX_PARSED_ELEMENT,
                });
            }
            set.try_reserve_for(x).map_err(|source| {
                debug!(input = s, token, "cannot allocate words for element");
                WordSetError::OutOfMemory {
                    token: token.to_string(),
                    source,
                }
            })?;
            set.add(x);
        }
        Ok(set)
    }
}

// =============================================================================
// Set Operators
// =============================================================================

impl BitOr for &WordSet {
    type Output = WordSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.union_with(rhs);
        out
    }
}

impl BitAnd for &WordSet {
    type Output = WordSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.intersect_with(rhs);
        out
    }
}

impl Sub for &WordSet {
    type Output = WordSet;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.difference_with(rhs);
        out
    }
}

impl BitXor for &WordSet {
    type Output = WordSet;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.symmetric_difference_with(rhs);
        out
    }
}

impl BitOrAssign<&WordSet> for WordSet {
    fn bitor_assign(&mut self, rhs: &WordSet) {
        self.union_with(rhs);
    }
}

impl BitAndAssign<&WordSet> for WordSet {
    fn bitand_assign(&mut self, rhs: &WordSet) {
        self.intersect_with(rhs);
    }
}

impl SubAssign<&WordSet> for WordSet {
    fn sub_assign(&mut self, rhs: &WordSet) {
        self.difference_with(rhs);
    }
}

impl BitXorAssign<&WordSet> for WordSet {
    fn bitxor_assign(&mut self, rhs: &WordSet) {
        self.symmetric_difference_with(rhs);
    }
}

// =============================================================================
// Comparison Operators
// =============================================================================

impl PartialEq for WordSet {
    /// Compare as sets of integers; see [`WordSet::structurally_equal`] for
    /// the exact word-level comparison.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.set_equals(other)
    }
}

impl Eq for WordSet {}
