use super::Codec;
use crate::error::{Error, Result};
use crate::rans::AnsState;

/// Uniform distribution on `[0, total)`, coded onto the first lane of the
/// head.
#[derive(Clone, Copy, Debug)]
pub struct Uniform {
    total: u64,
}

impl Uniform {
    pub fn new(total: u64) -> Self {
        Uniform { total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Codec for Uniform {
    type Symbol = u64;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        if *symbol >= self.total {
            return Err(Error::PrecisionOverflow {
                start: *symbol,
                freq: 1,
                total: self.total,
            });
        }
        state.encode(0..1, &[*symbol], &[1], self.total)
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let cf = state.decode_cf(0..1, self.total)?[0];
        state.decode_pop(0..1, &[cf], &[1], self.total)?;
        Ok(cf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_single_symbol() {
        let codec = Uniform::new(256);
        let mut state = AnsState::base_message(1);
        codec.encode(&mut state, &200).unwrap();
        let decoded = codec.decode(&mut state).unwrap();
        assert_eq!(decoded, 200);
        assert_eq!(state, AnsState::base_message(1));
    }

    #[test]
    fn out_of_domain_symbol_is_rejected() {
        let codec = Uniform::new(256);
        let mut state = AnsState::base_message(1);
        assert_eq!(
            codec.encode(&mut state, &256).unwrap_err(),
            Error::PrecisionOverflow {
                start: 256,
                freq: 1,
                total: 256
            }
        );
    }
}
