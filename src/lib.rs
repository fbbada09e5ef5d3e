//! Lossless multiset compression via bits-back coding over a range-ANS
//! engine.
//!
//! A multiset has no canonical order, so storing it as a sequence wastes
//! `log2(N! / prod(m_i!))` bits encoding an arbitrary arrangement the
//! consumer never needed. This crate avoids that waste: [`codecs::Multiset`]
//! treats a count-augmented BST ([`msbst::Tree`]) as the unit of exchange and
//! spends bits only on *which* elements occur and how many times, using the
//! bits-back trick to recycle the ordering entropy an ANS coder would
//! otherwise burn.
//!
//! The building blocks, from the bottom up:
//! - [`rans`] — the arbitrary-precision range-ANS engine itself.
//! - [`msbst`] — the multiset representation and its lookup operations.
//! - [`codecs`] — combinators (`Uniform`, `Categorical`, `ByteArray`,
//!   `Sequence`, `VariableLengthSequence`) plus the context-carrying
//!   `Multiset` combinator built from them.
//! - [`nested`] — canonical ordering for multisets whose elements are
//!   themselves multisets.
//! - [`utils`] — reporting helpers (the information-theoretic bound).

pub mod codecs;
pub mod error;
pub mod msbst;
pub mod nested;
pub mod rans;
pub mod utils;

pub use codecs::{
    swor_decode, swor_encode, ByteArray, Categorical, Codec, Multiset, NestedMultiset, Sequence,
    Uniform, VariableLengthSequence, VariableSizeMultiset,
};
pub use error::{Error, Result};
pub use msbst::Tree;
pub use nested::Canonical;
pub use rans::AnsState;
