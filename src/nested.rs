//! Canonical ordering for multisets-of-multisets.
//!
//! The outer multiset BST (`msbst::Tree`) needs a total order on its
//! element type. When elements are themselves multisets (e.g. a JSON map
//! modeled as a multiset of `(key, value)` pairs, nested inside an outer
//! multiset of JSON maps), there's no natural order on `Tree<T>` — the same
//! multiset can be built by many different insertion orders, producing
//! structurally different trees that must still compare equal.
//!
//! `Canonical<T>` fixes this by comparing multisets via their flattened,
//! sorted sequence (`to_sequence`), exactly as
//! `original_source/experiments/jsonmaps.py` does by rebuilding
//! `build_multiset(sorted(to_sequence(...)))` on both the encode and decode
//! path before handing an inner multiset to the outer one.

use crate::msbst::Tree;
use std::cmp::Ordering;

#[derive(Clone, Debug)]
pub struct Canonical<T: Ord + Clone>(Tree<T>);

impl<T: Ord + Clone> Canonical<T> {
    pub fn new(inner: Tree<T>) -> Self {
        Canonical(inner)
    }

    pub fn into_inner(self) -> Tree<T> {
        self.0
    }

    pub fn inner(&self) -> &Tree<T> {
        &self.0
    }

    fn sorted_sequence(&self) -> Vec<T> {
        self.0.to_sequence()
    }
}

impl<T: Ord + Clone> PartialEq for Canonical<T> {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_sequence() == other.sorted_sequence()
    }
}
impl<T: Ord + Clone> Eq for Canonical<T> {}

impl<T: Ord + Clone> PartialOrd for Canonical<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord + Clone> Ord for Canonical<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted_sequence().cmp(&other.sorted_sequence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ignores_build_order() {
        let a = Canonical::new(Tree::build_multiset([3, 1, 2, 1]));
        let b = Canonical::new(Tree::build_multiset([1, 1, 2, 3]));
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_orders_lexicographically_on_sorted_items() {
        let small = Canonical::new(Tree::build_multiset([1, 2]));
        let big = Canonical::new(Tree::build_multiset([1, 3]));
        assert!(small < big);
    }
}
