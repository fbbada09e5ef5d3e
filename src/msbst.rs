//! Count-augmented binary search tree: the "multiset BST".
//!
//! A multiset over `T: Ord` represented as a BST where each node additionally
//! tracks `size`, the total multiplicity of its subtree. The multiplicity of
//! the pivot symbol at a given node is never stored directly — it's always
//! `size - left.size - right.size` — which is what lets `insert` and
//! `remove` touch only the nodes on the search path, in `O(depth)`.
//!
//! Trees here are not self-balancing; an adversarial insertion order (e.g.
//! already-sorted input) produces a degenerate, linked-list-shaped tree and
//! `O(depth)` collapses to `O(U)`. Shuffling input before `build_multiset`
//! is a cheap mitigation available to callers; the crate itself does not do
//! it, since `to_sequence`/`check_multiset_equality` are order-insensitive
//! and a caller who cares about balance controls its own insertion order.

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree<T> {
    Empty,
    Node {
        size: u64,
        pivot: T,
        left: Box<Tree<T>>,
        right: Box<Tree<T>>,
    },
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::Empty
    }
}

impl<T: Ord> Tree<T> {
    /// Total multiplicity of this (sub)tree.
    pub fn size(&self) -> u64 {
        match self {
            Tree::Empty => 0,
            Tree::Node { size, .. } => *size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn leaf(x: T) -> Self {
        Tree::Node {
            size: 1,
            pivot: x,
            left: Box::new(Tree::Empty),
            right: Box::new(Tree::Empty),
        }
    }

    /// Inserts `x`, incrementing its multiplicity if already present.
    pub fn insert(self, x: T) -> Self {
        match self {
            Tree::Empty => Tree::leaf(x),
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                let (left, right) = if x < pivot {
                    (Box::new(left.insert(x)), right)
                } else if x > pivot {
                    (left, Box::new(right.insert(x)))
                } else {
                    (left, right)
                };
                Tree::Node {
                    size: size + 1,
                    pivot,
                    left,
                    right,
                }
            }
        }
    }

    /// Removes one occurrence of `x`. Mirrors `insert` structurally: the
    /// only combinators in this crate that actually call `remove` are
    /// tests exercising it directly; `SamplingWithoutReplacement` always
    /// uses the fused [`Tree::reverse_lookup_then_remove`] instead.
    pub fn remove(self, x: &T) -> Self {
        match self {
            Tree::Empty => Tree::Empty,
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                if size == 1 {
                    return Tree::Empty;
                }
                let (left, right) = if x < &pivot {
                    (Box::new(left.remove(x)), right)
                } else if x > &pivot {
                    (left, Box::new(right.remove(x)))
                } else {
                    (left, right)
                };
                Tree::Node {
                    size: size - 1,
                    pivot,
                    left,
                    right,
                }
            }
        }
    }

    /// Looks up the `(start, freq)` CDF slice of `x`.
    pub fn forward_lookup(&self, x: &T) -> Result<(u64, u64)> {
        match self {
            Tree::Empty => Err(Error::SymbolNotFound),
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                if x > pivot {
                    let (start_right, freq) = right.forward_lookup(x)?;
                    Ok((size - right.size() + start_right, freq))
                } else if x < pivot {
                    left.forward_lookup(x)
                } else {
                    let start = left.size();
                    let freq = size - left.size() - right.size();
                    Ok((start, freq))
                }
            }
        }
    }

    /// Looks up the `(start, freq)` slice and symbol at cumulative index
    /// `idx`. `idx` must be in `[0, size())`.
    pub fn reverse_lookup(&self, idx: u64) -> Result<((u64, u64), &T)> {
        match self {
            Tree::Empty => Err(Error::IndexOutOfRange { index: idx, size: 0 }),
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                if idx >= *size {
                    return Err(Error::IndexOutOfRange { index: idx, size: *size });
                }
                let y_start = left.size();
                let y_freq = size - y_start - right.size();
                if idx < y_start {
                    left.reverse_lookup(idx)
                } else if idx >= y_start + y_freq {
                    let size_not_right = size - right.size();
                    let ((start, freq), x) = right.reverse_lookup(idx - size_not_right)?;
                    Ok(((start + size_not_right, freq), x))
                } else {
                    Ok(((y_start, y_freq), pivot))
                }
            }
        }
    }

    /// `insert` and `forward_lookup` fused into a single descent. The
    /// returned `(start, freq)` reflects the multiset *after* insertion.
    pub fn insert_then_forward_lookup(self, x: T) -> (Self, (u64, u64)) {
        match self {
            Tree::Empty => (Tree::leaf(x), (0, 1)),
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                let size = size + 1;
                if x > pivot {
                    let (right, (start_right, freq)) = right.insert_then_forward_lookup(x);
                    let start = size - right.size() + start_right;
                    (
                        Tree::Node {
                            size,
                            pivot,
                            left,
                            right: Box::new(right),
                        },
                        (start, freq),
                    )
                } else if x < pivot {
                    let (left, slice) = left.insert_then_forward_lookup(x);
                    (
                        Tree::Node {
                            size,
                            pivot,
                            left: Box::new(left),
                            right,
                        },
                        slice,
                    )
                } else {
                    let start = left.size();
                    let freq = size - start - right.size();
                    (
                        Tree::Node {
                            size,
                            pivot,
                            left,
                            right,
                        },
                        (start, freq),
                    )
                }
            }
        }
    }

}

impl<T: Ord + Clone> Tree<T> {
    /// `reverse_lookup` and `remove` fused into a single descent. The
    /// returned `(start, freq)` reflects the multiset *before* removal.
    /// Requires `Clone` because the equal-to-pivot branch both returns the
    /// symbol and, when its multiplicity survives the removal, keeps a
    /// copy of it in the rebuilt node.
    pub fn reverse_lookup_then_remove(self, idx: u64) -> Result<(Self, (u64, u64), T)> {
        match self {
            Tree::Empty => Err(Error::IndexOutOfRange { index: idx, size: 0 }),
            Tree::Node {
                size,
                pivot,
                left,
                right,
            } => {
                if idx >= size {
                    return Err(Error::IndexOutOfRange { index: idx, size });
                }
                let y_start = left.size();
                let y_freq = size - y_start - right.size();
                if idx < y_start {
                    let (left, slice, x) = left.reverse_lookup_then_remove(idx)?;
                    let tree = Tree::Node {
                        size: size - 1,
                        pivot,
                        left: Box::new(left),
                        right,
                    };
                    Ok((tree, slice, x))
                } else if idx >= y_start + y_freq {
                    let size_not_right = size - right.size();
                    let (right, (start, freq), x) =
                        right.reverse_lookup_then_remove(idx - size_not_right)?;
                    let tree = Tree::Node {
                        size: size - 1,
                        pivot,
                        left,
                        right: Box::new(right),
                    };
                    Ok((tree, (start + size_not_right, freq), x))
                } else {
                    let remaining = size - 1;
                    let tree = if remaining == 0 {
                        Tree::Empty
                    } else {
                        Tree::Node {
                            size: remaining,
                            pivot: pivot.clone(),
                            left,
                            right,
                        }
                    };
                    Ok((tree, (y_start, y_freq), pivot))
                }
            }
        }
    }

    /// Builds a multiset from a sequence by folding `insert`.
    pub fn build_multiset<I: IntoIterator<Item = T>>(items: I) -> Self {
        items.into_iter().fold(Tree::Empty, Tree::insert)
    }

    /// Flattens the BST to a sorted sequence, each symbol repeated by its
    /// multiplicity.
    pub fn to_sequence(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.size() as usize);
        self.traverse(&mut out);
        out
    }

    fn traverse(&self, out: &mut Vec<T>) {
        if let Tree::Node {
            size,
            pivot,
            left,
            right,
        } = self
        {
            left.traverse(out);
            let freq = size - left.size() - right.size();
            out.extend(std::iter::repeat(pivot.clone()).take(freq as usize));
            right.traverse(out);
        }
    }

    /// Order-insensitive equality: two multisets are equal iff their
    /// flattened, sorted sequences are equal.
    pub fn check_multiset_equality(&self, other: &Self) -> bool {
        let mut a = self.to_sequence();
        let mut b = other.to_sequence();
        a.sort();
        b.sort();
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(c: char) -> Tree<char> {
        Tree::leaf(c)
    }

    #[test]
    fn insert_then_forward_lookup_matches_reference_trace() {
        let mut multiset = Tree::Empty;

        let (m, slice) = multiset.insert_then_forward_lookup('c');
        multiset = m;
        assert_eq!(multiset, leaf('c'));
        assert_eq!(slice, (0, 1));

        let (m, slice) = multiset.insert_then_forward_lookup('a');
        multiset = m;
        assert_eq!(slice, (0, 1));

        let (m, slice) = multiset.insert_then_forward_lookup('a');
        multiset = m;
        assert_eq!(slice, (0, 2));

        let (m, slice) = multiset.insert_then_forward_lookup('b');
        multiset = m;
        assert_eq!(slice, (2, 1));

        let (m, slice) = multiset.insert_then_forward_lookup('c');
        multiset = m;
        assert_eq!(slice, (3, 2));

        let (m, slice) = multiset.insert_then_forward_lookup('e');
        multiset = m;
        assert_eq!(slice, (5, 1));

        let (m, slice) = multiset.insert_then_forward_lookup('d');
        multiset = m;
        assert_eq!(slice, (5, 1));

        let (m, slice) = multiset.insert_then_forward_lookup('f');
        multiset = m;
        assert_eq!(slice, (7, 1));
        assert_eq!(multiset.size(), 8);

        assert_eq!(multiset.forward_lookup(&'c').unwrap(), (3, 2));
        assert_eq!(multiset.forward_lookup(&'a').unwrap(), (0, 2));
    }

    #[test]
    fn reverse_lookup_then_remove_drains_to_empty() {
        let xs = "caabcedf".chars();
        let multiset = Tree::build_multiset(xs);
        assert_eq!(multiset.size(), 8);

        let mut m = multiset;
        let expect = [
            (3u64, ('c', 3, 2)),
            (1, ('a', 0, 2)),
            (3, ('d', 3, 1)),
            (0, ('a', 0, 1)),
            (2, ('e', 2, 1)),
            (1, ('c', 1, 1)),
            (0, ('b', 0, 1)),
            (0, ('f', 0, 1)),
        ];
        for (idx, (x, start, freq)) in expect {
            let (next, (s, f), sym) = m.reverse_lookup_then_remove(idx).unwrap();
            assert_eq!((sym, s, f), (x, start, freq));
            m = next;
        }
        assert_eq!(m, Tree::Empty);
    }

    #[test]
    fn to_sequence_of_build_multiset_is_sort() {
        let xs = vec!['d', 'b', 'b', 'a', 'a', 'a', 'a', 'b'];
        let mut sorted = xs.clone();
        sorted.sort();
        let multiset = Tree::build_multiset(xs);
        assert_eq!(multiset.to_sequence(), sorted);
    }

    #[test]
    fn forward_and_reverse_lookup_are_consistent() {
        let xs = std::iter::repeat('a')
            .take(4)
            .chain(std::iter::repeat('b').take(3))
            .chain(std::iter::once('d'));
        let multiset = Tree::build_multiset(xs);
        assert_eq!(multiset.forward_lookup(&'a').unwrap(), (0, 4));
        assert_eq!(multiset.forward_lookup(&'b').unwrap(), (4, 3));
        assert_eq!(multiset.forward_lookup(&'d').unwrap(), (7, 1));

        for idx in 0..4 {
            assert_eq!(*multiset.reverse_lookup(idx).unwrap().1, 'a');
        }
        for idx in 4..7 {
            assert_eq!(*multiset.reverse_lookup(idx).unwrap().1, 'b');
        }
        assert_eq!(*multiset.reverse_lookup(7).unwrap().1, 'd');
    }

    #[test]
    fn forward_lookup_missing_symbol_errors() {
        let multiset = Tree::build_multiset(['a', 'b']);
        assert_eq!(
            multiset.forward_lookup(&'z').unwrap_err(),
            Error::SymbolNotFound
        );
    }

    #[test]
    fn remove_collapses_single_element_tree() {
        let multiset = Tree::build_multiset(['a']);
        assert_eq!(multiset.remove(&'a'), Tree::Empty);
    }

    #[test]
    fn check_multiset_equality_ignores_order() {
        let a = Tree::build_multiset(['a', 'b', 'b', 'c']);
        let b = Tree::build_multiset(['c', 'b', 'a', 'b']);
        assert!(a.check_multiset_equality(&b));
    }
}
