use super::Codec;
use crate::rans::AnsState;
use crate::error::Result;

/// A fixed-length run of `len` symbols coded with the same inner codec.
///
/// Items are pushed onto the rANS stack back-to-front during `encode`
/// (`items[len-1]` first, `items[0]` last) so that `decode`, which always
/// pops the most recently pushed value first, recovers them front-to-back
/// with no second reversal pass needed.
#[derive(Clone, Debug)]
pub struct Sequence<C> {
    codec: C,
    len: usize,
}

impl<C> Sequence<C> {
    pub fn new(codec: C, len: usize) -> Self {
        Sequence { codec, len }
    }
}

impl<C: Codec> Codec for Sequence<C> {
    type Symbol = Vec<C::Symbol>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        debug_assert_eq!(symbol.len(), self.len);
        for item in symbol.iter().rev() {
            self.codec.encode(state, item)?;
        }
        Ok(())
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let mut out = Vec::with_capacity(self.len);
        for _ in 0..self.len {
            out.push(self.codec.decode(state)?);
        }
        Ok(out)
    }
}

/// A run of at most `max_len` symbols, whose length is itself coded (as a
/// uniform draw on `[0, max_len]`) alongside the items.
///
/// The length is encoded *last*, landing on top of the stack, so it is the
/// first thing `decode` reads back; the items underneath it decode the same
/// way [`Sequence`] does.
#[derive(Clone, Debug)]
pub struct VariableLengthSequence<C> {
    codec: C,
    max_len: usize,
}

impl<C> VariableLengthSequence<C> {
    pub fn new(codec: C, max_len: usize) -> Self {
        VariableLengthSequence { codec, max_len }
    }
}

impl<C: Codec> Codec for VariableLengthSequence<C> {
    type Symbol = Vec<C::Symbol>;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        let n = symbol.len() as u64;
        for item in symbol.iter().rev() {
            self.codec.encode(state, item)?;
        }
        state.encode(0..1, &[n], &[1], self.max_len as u64 + 1)
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let cf = state.decode_cf(0..1, self.max_len as u64 + 1)?[0];
        state.decode_pop(0..1, &[cf], &[1], self.max_len as u64 + 1)?;
        let n = cf as usize;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.codec.decode(state)?);
        }
        Ok(out)
    }
}
