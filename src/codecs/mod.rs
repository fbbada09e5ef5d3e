//! Codec combinators: the layer that composes elementary distributions with
//! the bits-back `Multiset` combinator.
//!
//! Every elementary and sequential codec here implements the [`Codec`]
//! trait, monomorphized over its element type rather than boxed behind a
//! trait object — matching the host crate's own style of generic,
//! statically-dispatched encode/decode functions (`t_ans::encode_symbol`,
//! `r_ans::compress_state`, …) and the design notes' explicit preference
//! for avoiding dynamic dispatch on the hot path.
//!
//! `SamplingWithoutReplacement` and `Multiset` don't fit the plain `Codec`
//! shape (decode needs the multiset or its size as extra context, per
//! §3.4's `*context` tuple), so they're exposed as their own small API in
//! [`multiset`] instead of forcing an awkward generalization of the trait.

mod byte_array;
mod categorical;
mod multiset;
mod sequence;
mod uniform;

pub use byte_array::ByteArray;
pub use categorical::Categorical;
pub use multiset::{swor_decode, swor_encode, Multiset, NestedMultiset, VariableSizeMultiset};
pub use sequence::{Sequence, VariableLengthSequence};
pub use uniform::Uniform;

use crate::error::Result;
use crate::rans::AnsState;

/// `encode: (state, &symbol) -> ()`, `decode: (state) -> symbol`, mutating
/// `state` in place. Context-free codecs only — see the module docs for
/// why `SamplingWithoutReplacement`/`Multiset` live outside this trait.
pub trait Codec {
    type Symbol;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()>;
    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol>;
}
