//! The error taxonomy for this crate.
//!
//! Every variant here is a precondition violation — a caller passing a
//! symbol outside a codec's domain, a corrupted/truncated buffer, or an
//! index outside a multiset's size. None of them are recoverable by the
//! crate itself; they are surfaced immediately, mirroring the "no retry, no
//! partial failure" contract of the encode/decode operations.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `Categorical` probability table's frequencies did not sum to
    /// `expected = 2^prec` after quantization.
    InvalidProbability { sum: u64, expected: u64 },
    /// `forward_lookup` reached an empty subtree.
    SymbolNotFound,
    /// `reverse_lookup` was called with `index >= size`.
    IndexOutOfRange { index: u64, size: u64 },
    /// `rans::encode` was asked to place `[start, start+freq)` outside
    /// `[0, total)`.
    PrecisionOverflow { start: u64, freq: u64, total: u64 },
    /// A decode tried to renormalize from an empty tail.
    StateUnderflow,
    /// `unflatten` or a lane view was given a lane count inconsistent with
    /// the data it was handed.
    ShapeMismatch { expected: usize, actual: usize },
    /// `ByteArray` was asked to encode/decode a size at or beyond its
    /// configured maximum.
    InvalidByteArraySize { size: usize, max_size: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidProbability { sum, expected } => write!(
                f,
                "categorical frequencies sum to {sum}, expected {expected}"
            ),
            Error::SymbolNotFound => write!(f, "symbol not found in multiset"),
            Error::IndexOutOfRange { index, size } => {
                write!(f, "index {index} out of range for multiset of size {size}")
            }
            Error::PrecisionOverflow { start, freq, total } => write!(
                f,
                "interval [{start}, {start}+{freq}) exceeds total {total}"
            ),
            Error::StateUnderflow => {
                write!(f, "rANS tail exhausted during renormalization")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "expected {expected} lanes, got {actual}")
            }
            Error::InvalidByteArraySize { size, max_size } => write!(
                f,
                "byte array size {size} is not below the configured maximum {max_size}"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
