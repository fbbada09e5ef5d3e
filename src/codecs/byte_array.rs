use super::Codec;
use crate::error::{Error, Result};
use crate::rans::AnsState;

/// Encodes a byte string of length `n < max_size`.
///
/// The size is recorded with a uniform distribution on `[0, max_size)`; the
/// bytes themselves are coded in one batched rANS step across the first `n`
/// lanes of the head (`Uniform(256)` per lane), matching the "parallel
/// lanes" data flow of §4.A. The head must therefore have at least
/// `max_size` lanes.
#[derive(Clone, Copy, Debug)]
pub struct ByteArray {
    max_size: usize,
}

impl ByteArray {
    pub fn new(max_size: usize) -> Self {
        ByteArray { max_size }
    }
}

impl Codec for ByteArray {
    type Symbol = Vec<u8>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        let n = symbol.len();
        if n >= self.max_size {
            return Err(Error::InvalidByteArraySize {
                size: n,
                max_size: self.max_size,
            });
        }
        let starts: Vec<u64> = symbol.iter().map(|&b| b as u64).collect();
        let freqs = vec![1u64; n];
        state.encode(0..n, &starts, &freqs, 256)?;
        state.encode(0..1, &[n as u64], &[1], self.max_size as u64)
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let len_cf = state.decode_cf(0..1, self.max_size as u64)?[0];
        state.decode_pop(0..1, &[len_cf], &[1], self.max_size as u64)?;
        let n = len_cf as usize;
        if n >= self.max_size {
            return Err(Error::InvalidByteArraySize {
                size: n,
                max_size: self.max_size,
            });
        }
        let byte_cf = state.decode_cf(0..n, 256)?;
        state.decode_pop(0..n, &byte_cf, &vec![1u64; n], 256)?;
        Ok(byte_cf.into_iter().map(|v| v as u8).collect())
    }
}
