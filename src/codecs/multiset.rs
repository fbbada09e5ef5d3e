use super::Codec;
use crate::error::{Error, Result};
use crate::msbst::Tree;
use crate::nested::Canonical;
use crate::rans::AnsState;

/// Pulls one element out of `multiset` via bits-back sampling without
/// replacement: an index is read off the rANS state as if it were a
/// uniform draw over `multiset`, the matching element is removed, and the
/// bits that encoded "where in the multiset" are consumed in the process.
///
/// This is the decode half of the swor pair — it shrinks `multiset` and
/// shrinks the rANS state.
pub fn swor_decode<T: Ord + Clone>(state: &mut AnsState, multiset: &mut Tree<T>) -> Result<T> {
    let total = multiset.size();
    if total == 0 {
        return Err(Error::IndexOutOfRange { index: 0, size: 0 });
    }
    let idx = state.decode_cf(0..1, total)?[0];
    let current = std::mem::take(multiset);
    let (rest, (start, freq), symbol) = current.reverse_lookup_then_remove(idx)?;
    state.decode_pop(0..1, &[start], &[freq], total)?;
    *multiset = rest;
    Ok(symbol)
}

/// Inverse of [`swor_decode`]: inserts `symbol` back into `multiset` and
/// pushes onto the rANS state the bits that sampling it out would have
/// consumed. Grows both `multiset` and the rANS state.
pub fn swor_encode<T: Ord + Clone>(
    state: &mut AnsState,
    multiset: &mut Tree<T>,
    symbol: T,
) -> Result<()> {
    let current = std::mem::take(multiset);
    let total = current.size() + 1;
    let (tree, (start, freq)) = current.insert_then_forward_lookup(symbol);
    state.encode(0..1, &[start], &[freq], total)?;
    *multiset = tree;
    Ok(())
}

/// Bits-back codec for an entire multiset of exactly `size` elements under
/// a fixed per-element model `C`.
///
/// `encode` drains the multiset one element at a time with [`swor_decode`]
/// (spending the "which element" bits) and immediately re-spends those
/// freed bits coding the element under `C` — the classic bits-back swap.
/// `decode` runs the same two operations in the mirrored order, rebuilding
/// the multiset from nothing.
#[derive(Clone, Debug)]
pub struct Multiset<C> {
    codec: C,
    size: usize,
}

impl<C> Multiset<C> {
    pub fn new(codec: C, size: usize) -> Self {
        Multiset { codec, size }
    }
}

impl<C: Codec> Codec for Multiset<C>
where
    C::Symbol: Ord + Clone,
{
    type Symbol = Tree<C::Symbol>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        let mut remaining = symbol.clone();
        for _ in 0..self.size {
            let item = swor_decode(state, &mut remaining)?;
            self.codec.encode(state, &item)?;
        }
        Ok(())
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let mut tree = Tree::Empty;
        for _ in 0..self.size {
            let item = self.codec.decode(state)?;
            swor_encode(state, &mut tree, item)?;
        }
        Ok(tree)
    }
}

/// Like [`Multiset`], but the element count is itself coded (as a uniform
/// draw on `[0, max_size]`) rather than fixed at construction — needed when
/// an outer multiset's elements are inner multisets of varying size, e.g.
/// the records of a JSON-object-style corpus.
///
/// The size is coded last, landing on top of the stack, so `decode` reads
/// it first and then knows how many bits-back rounds to run — the same
/// shape as [`super::sequence::VariableLengthSequence`].
#[derive(Clone, Debug)]
pub struct VariableSizeMultiset<C> {
    codec: C,
    max_size: usize,
}

impl<C> VariableSizeMultiset<C> {
    pub fn new(codec: C, max_size: usize) -> Self {
        VariableSizeMultiset { codec, max_size }
    }
}

impl<C: Codec + Clone> Codec for VariableSizeMultiset<C>
where
    C::Symbol: Ord + Clone,
{
    type Symbol = Tree<C::Symbol>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        let n = symbol.size();
        Multiset::new(self.codec.clone(), n as usize).encode(state, symbol)?;
        state.encode(0..1, &[n], &[1], self.max_size as u64 + 1)
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let cf = state.decode_cf(0..1, self.max_size as u64 + 1)?[0];
        state.decode_pop(0..1, &[cf], &[1], self.max_size as u64 + 1)?;
        Multiset::new(self.codec.clone(), cf as usize).decode(state)
    }
}

/// A symbol codec over *inner* multisets, for building an outer
/// [`Multiset`]/[`VariableSizeMultiset`] whose elements are themselves
/// multisets (e.g. an outer multiset of JSON-object-style records, each a
/// multiset of `(field, value)` pairs). `Tree<T>` has no natural `Ord`, so
/// elements are wrapped in [`Canonical`], which does (see `nested`).
///
/// This is the two-level bits-back composition named in §4.G/§8: encoding
/// an outer multiset of `NestedMultiset`-coded records runs `swor_decode`
/// on the outer tree, then this codec's own inner bits-back round, for
/// every record.
#[derive(Clone, Debug)]
pub struct NestedMultiset<C> {
    inner: VariableSizeMultiset<C>,
}

impl<C> NestedMultiset<C> {
    pub fn new(codec: C, max_size: usize) -> Self {
        NestedMultiset {
            inner: VariableSizeMultiset::new(codec, max_size),
        }
    }
}

impl<C: Codec + Clone> Codec for NestedMultiset<C>
where
    C::Symbol: Ord + Clone,
{
    type Symbol = Canonical<C::Symbol>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        self.inner.encode(state, symbol.inner())
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        Ok(Canonical::new(self.inner.decode(state)?))
    }
}
