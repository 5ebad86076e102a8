//! Tests for in-place set algebra on WordSet.
//!
//! Operand pairs deliberately differ in word count in both directions,
//! since growth and truncation rules differ per operation.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use wordset::WordSet;

fn set_of(xs: &[usize]) -> WordSet {
    let mut set = WordSet::new();
    set.add_all(xs.iter().copied());
    set
}

fn assert_has_all(set: &WordSet, xs: &[usize]) {
    for &x in xs {
        assert!(set.has(x), "{} should have {}", set, x);
    }
}

// =============================================================================
// Union
// =============================================================================

#[test]
fn test_union_combines_sets() {
    let mut a = set_of(&[1, 2, 3, 567, 987, 1023]);
    let b = set_of(&[4, 5, 6, 678, 889, 1101]);
    a.union_with(&b);

    assert_eq!(
        a.elems(),
        vec![1, 2, 3, 4, 5, 6, 567, 678, 889, 987, 1023, 1101]
    );
}

#[test]
fn test_union_leaves_argument() {
    let mut a = set_of(&[1, 2, 3, 567, 987, 1023]);
    let b = set_of(&[4, 5, 6, 678, 889, 1101]);
    let before = b.copy();
    a.union_with(&b);

    assert!(b.structurally_equal(&before));
    for x in [1, 2, 3, 567, 987, 1023] {
        assert!(!b.has(x), "{} should not have {}", b, x);
    }
}

#[test]
fn test_union_copies_longer_tail() {
    let mut a = set_of(&[1]);
    let mut b = set_of(&[2, 640]);
    a.union_with(&b);
    assert_eq!(a.num_words(), 11);

    // Appended words are copies, not shared with the operand
    b.remove(640);
    assert!(a.has(640));
}

#[test]
fn test_union_with_empty() {
    let mut a = set_of(&[1, 100]);
    a.union_with(&WordSet::new());
    assert_eq!(a.elems(), vec![1, 100]);

    let mut empty = WordSet::new();
    empty.union_with(&a);
    assert!(empty.structurally_equal(&a));
}

// =============================================================================
// Intersection
// =============================================================================

#[test]
fn test_intersect_disjoint() {
    let mut b = set_of(&[1, 2, 3, 4, 5]);
    let c = set_of(&[6, 7, 8, 9, 10]);
    b.intersect_with(&c);
    assert_eq!(b.len(), 0);
}

#[test]
fn test_intersect_keeps_shared() {
    let mut a = set_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let b = set_of(&[1, 2, 3, 4, 5]);
    a.intersect_with(&b);
    assert!(a.structurally_equal(&b));

    let mut a = set_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let c = set_of(&[6, 7, 8, 9, 10]);
    a.intersect_with(&c);
    assert!(a.structurally_equal(&c));
}

#[test]
fn test_intersect_shorter_operand_zeroes_tail() {
    let mut a = set_of(&[3, 200, 900]);
    let b = set_of(&[3, 4]);
    a.intersect_with(&b);

    assert_eq!(a.elems(), vec![3]);
    assert_eq!(a.num_words(), 15);
    assert!(a.words()[1..].iter().all(|&w| w == 0));
}

#[test]
fn test_intersect_longer_operand_keeps_word_count() {
    let mut a = set_of(&[3]);
    let b = set_of(&[3, 900]);
    a.intersect_with(&b);

    assert_eq!(a.elems(), vec![3]);
    assert_eq!(a.num_words(), 1);
}

// =============================================================================
// Difference
// =============================================================================

#[test]
fn test_difference_receiver_longer() {
    let mut a = set_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let b = set_of(&[3, 4, 5]);
    a.difference_with(&b);

    assert_eq!(a.len(), 7);
    assert_has_all(&a, &[1, 2, 6, 7, 8, 9, 10]);
}

#[test]
fn test_difference_operand_longer() {
    let mut a = set_of(&[1, 2, 3, 4]);
    let b = set_of(&[3, 4, 5, 6, 7, 8, 9, 4000]);
    let before = b.copy();
    a.difference_with(&b);

    assert_eq!(a.len(), 2);
    assert_has_all(&a, &[1, 2]);
    assert_eq!(a.num_words(), 1);
    assert!(b.structurally_equal(&before));
}

#[test]
fn test_difference_from_empty() {
    let mut a = WordSet::new();
    a.difference_with(&set_of(&[1, 2, 3000]));
    assert_eq!(a.num_words(), 0);
    assert!(a.is_empty());
}

// =============================================================================
// Symmetric Difference
// =============================================================================

#[test]
fn test_symmetric_difference() {
    let mut a = set_of(&[4, 5, 6, 7, 8, 9, 10]);
    let b = set_of(&[1, 2, 3, 4, 5, 6]);
    a.symmetric_difference_with(&b);

    assert_eq!(a.len(), 7);
    assert_has_all(&a, &[1, 2, 3, 7, 8, 9, 10]);
}

#[test]
fn test_symmetric_difference_reversed() {
    let a = set_of(&[4, 5, 6, 7, 8, 9, 10, 11, 12]);
    let mut b = set_of(&[1, 2, 3, 4, 5, 6]);
    b.symmetric_difference_with(&a);

    assert_eq!(b.len(), 9);
    assert_has_all(&b, &[1, 2, 3, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn test_symmetric_difference_identical() {
    let a = set_of(&[4, 5, 6]);
    let mut b = set_of(&[4, 5, 6]);
    b.symmetric_difference_with(&a);
    assert_eq!(b.len(), 0);
}

#[test]
fn test_symmetric_difference_single_leftover() {
    let cases: [(&[usize], &[usize], usize); 4] = [
        (&[1, 4, 5, 6], &[4, 5, 6], 1),
        (&[4, 5, 6, 7], &[4, 5, 6], 7),
        (&[4, 5, 6], &[1, 4, 5, 6], 1),
        (&[4, 5, 6], &[4, 5, 6, 7], 7),
    ];

    for (a, b, leftover) in cases {
        let a = set_of(a);
        let mut b = set_of(b);
        b.symmetric_difference_with(&a);
        assert_eq!(b.elems(), vec![leftover], "{} should contain only {}", b, leftover);
    }
}

#[test]
fn test_symmetric_difference_across_word_lengths() {
    // Operand longer: overlap XORed, tail appended
    let mut short = set_of(&[1, 64]);
    let long = set_of(&[64, 65, 1000]);
    short.symmetric_difference_with(&long);
    assert_eq!(short.elems(), vec![1, 65, 1000]);
    assert_eq!(short.num_words(), long.num_words());

    // Receiver longer: tail untouched
    let mut long = set_of(&[64, 65, 1000]);
    let short = set_of(&[1, 64]);
    long.symmetric_difference_with(&short);
    assert_eq!(long.elems(), vec![1, 65, 1000]);
    assert_eq!(long.num_words(), 16);
}

#[test]
fn test_symmetric_difference_with_self_copy() {
    let mut a = set_of(&[0, 63, 64, 4095]);
    let same = a.copy();
    a.symmetric_difference_with(&same);
    assert_eq!(a.len(), 0);
    assert!(a.is_empty());
}

// =============================================================================
// Randomized Workloads
// =============================================================================

#[test]
fn test_random_workload_matches_oracle() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut set = WordSet::new();
    let mut oracle = BTreeSet::new();

    for _ in 0..5000 {
        let x = rng.gen_range(0..3000usize);
        match rng.gen_range(0..3) {
            0 | 1 => {
                set.add(x);
                oracle.insert(x);
            }
            _ => {
                assert_eq!(set.remove(x), oracle.remove(&x));
            }
        }
    }

    assert_eq!(set.len(), oracle.len());
    assert_eq!(set.elems(), oracle.into_iter().collect::<Vec<_>>());
}

// =============================================================================
// Property-Based Tests
// =============================================================================

fn elements() -> impl Strategy<Value = Vec<usize>> {
    prop_oneof![
        prop::collection::vec(0..64usize, 0..40),
        prop::collection::vec(0..1000usize, 0..80),
        prop::collection::vec(0..6000usize, 0..150),
    ]
}

fn oracle(xs: &[usize]) -> BTreeSet<usize> {
    xs.iter().copied().collect()
}

fn sorted(set: BTreeSet<usize>) -> Vec<usize> {
    set.into_iter().collect()
}

proptest! {
    #[test]
    fn prop_union_matches_oracle(xs in elements(), ys in elements()) {
        let mut a = set_of(&xs);
        let b = set_of(&ys);
        let b_before = b.copy();
        a.union_with(&b);

        let expected = sorted(oracle(&xs).union(&oracle(&ys)).copied().collect());
        prop_assert_eq!(a.elems(), expected);
        prop_assert!(b.structurally_equal(&b_before));
    }

    #[test]
    fn prop_union_commutative_in_content(xs in elements(), ys in elements()) {
        let mut ab = set_of(&xs);
        ab.union_with(&set_of(&ys));
        let mut ba = set_of(&ys);
        ba.union_with(&set_of(&xs));

        prop_assert_eq!(ab.elems(), ba.elems());
    }

    #[test]
    fn prop_intersect_matches_oracle(xs in elements(), ys in elements()) {
        let mut a = set_of(&xs);
        let words_before = a.num_words();
        let b = set_of(&ys);
        a.intersect_with(&b);

        let expected = sorted(oracle(&xs).intersection(&oracle(&ys)).copied().collect());
        prop_assert_eq!(a.elems(), expected);
        prop_assert_eq!(a.num_words(), words_before);
    }

    #[test]
    fn prop_difference_matches_oracle(xs in elements(), ys in elements()) {
        let mut a = set_of(&xs);
        let words_before = a.num_words();
        let b = set_of(&ys);
        a.difference_with(&b);

        let expected = sorted(oracle(&xs).difference(&oracle(&ys)).copied().collect());
        prop_assert_eq!(a.elems(), expected);
        prop_assert_eq!(a.num_words(), words_before);
    }

    #[test]
    fn prop_symmetric_difference_matches_oracle(xs in elements(), ys in elements()) {
        let mut a = set_of(&xs);
        let b = set_of(&ys);
        a.symmetric_difference_with(&b);

        let expected = sorted(oracle(&xs).symmetric_difference(&oracle(&ys)).copied().collect());
        prop_assert_eq!(a.elems(), expected);
        prop_assert_eq!(a.num_words(), set_of(&xs).num_words().max(b.num_words()));
    }

    #[test]
    fn prop_symmetric_difference_self_empty(xs in elements()) {
        let mut a = set_of(&xs);
        let same = a.copy();
        a.symmetric_difference_with(&same);
        prop_assert_eq!(a.len(), 0);
    }

    #[test]
    fn prop_operators_match_in_place(xs in elements(), ys in elements()) {
        let a = set_of(&xs);
        let b = set_of(&ys);

        let mut union = a.copy();
        union.union_with(&b);
        prop_assert!((&a | &b).structurally_equal(&union));

        let mut diff = a.copy();
        diff.difference_with(&b);
        prop_assert!((&a - &b).structurally_equal(&diff));

        let mut sym = a.copy();
        sym ^= &b;
        prop_assert!((&a ^ &b).structurally_equal(&sym));

        let mut inter = a.copy();
        inter &= &b;
        prop_assert!((&a & &b).structurally_equal(&inter));
    }
}
