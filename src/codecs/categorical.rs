use super::Codec;
use crate::error::{Error, Result};
use crate::rans::AnsState;

/// Fixed-precision categorical distribution: symbols are `0..probs.len()`,
/// quantized to integer frequencies that sum to exactly `2^prec`.
///
/// Quantization follows the same shape as the host crate's own
/// `normalization` module (scale into a fixed-point range, track the
/// residue left over from rounding, and dump that residue onto the
/// largest-probability entry) — here applied to a probability vector
/// instead of a raw integer histogram.
#[derive(Clone, Debug)]
pub struct Categorical {
    starts: Vec<u64>,
    freqs: Vec<u64>,
    total: u64,
}

impl Categorical {
    pub fn new(probs: &[f64], prec: u32) -> Result<Self> {
        let total = 1u64 << prec;
        let mut freqs = vec![0u64; probs.len()];
        let mut still_to_distribute = total as i64;
        let mut max_idx = 0usize;

        for (i, &p) in probs.iter().enumerate() {
            let f = (p * total as f64).round().max(0.0) as i64;
            freqs[i] = f as u64;
            still_to_distribute -= f;
            if freqs[i] > freqs[max_idx] {
                max_idx = i;
            }
        }

        if still_to_distribute != 0 {
            let adjusted = freqs[max_idx] as i64 + still_to_distribute;
            if adjusted <= 0 {
                let sum: u64 = freqs.iter().sum::<u64>().wrapping_add(still_to_distribute as u64);
                return Err(Error::InvalidProbability { sum, expected: total });
            }
            freqs[max_idx] = adjusted as u64;
        }

        let sum: u64 = freqs.iter().sum();
        if sum != total {
            return Err(Error::InvalidProbability { sum, expected: total });
        }

        let mut starts = Vec::with_capacity(freqs.len());
        let mut acc = 0u64;
        for &f in &freqs {
            starts.push(acc);
            acc += f;
        }

        Ok(Categorical { starts, freqs, total })
    }

    fn symbol_at_cf(&self, cf: u64) -> usize {
        self.starts.partition_point(|&s| s <= cf) - 1
    }
}

impl Codec for Categorical {
    type Symbol = usize;

    fn encode(&self, state: &mut AnsState, symbol: &Self::Symbol) -> Result<()> {
        let freq = *self.freqs.get(*symbol).ok_or(Error::SymbolNotFound)?;
        let start = self.starts[*symbol];
        state.encode(0..1, &[start], &[freq], self.total)
    }

    fn decode(&self, state: &mut AnsState) -> Result<Self::Symbol> {
        let cf = state.decode_cf(0..1, self.total)?[0];
        let symbol = self.symbol_at_cf(cf);
        let start = self.starts[symbol];
        let freq = self.freqs[symbol];
        state.decode_pop(0..1, &[start], &[freq], self.total)?;
        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantized_frequencies_sum_to_total() {
        let probs = [0.5, 0.25, 0.125, 0.125];
        let codec = Categorical::new(&probs, 8).unwrap();
        assert_eq!(codec.freqs.iter().sum::<u64>(), 1 << 8);
    }

    #[test]
    fn roundtrips_every_symbol() {
        let probs = [0.1, 0.6, 0.2, 0.1];
        let codec = Categorical::new(&probs, 12).unwrap();
        for symbol in 0..probs.len() {
            let mut state = AnsState::base_message(1);
            codec.encode(&mut state, &symbol).unwrap();
            assert_eq!(codec.decode(&mut state).unwrap(), symbol);
            assert_eq!(state, AnsState::base_message(1));
        }
    }

    #[test]
    fn unknown_symbol_index_errors() {
        let codec = Categorical::new(&[1.0], 4).unwrap();
        let mut state = AnsState::base_message(1);
        assert_eq!(
            codec.encode(&mut state, &5).unwrap_err(),
            Error::SymbolNotFound
        );
    }
}
