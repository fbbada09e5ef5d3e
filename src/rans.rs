//! Range asymmetric numeral system (rANS) engine.
//!
//! Implémentation de multiset-ans-rs, tenter de porter le moteur rANS à
//! précision variable de facebookresearch/multiset-compression en Rust.
//!
//! The state is a fixed-size vector of 64-bit lane values (the "head")
//! plus a LIFO stack of 32-bit words (the "tail"). Each lane obeys
//! `RANS_L <= head[i]` at rest between top-level operations; encoding may
//! transiently push low bits of a lane onto the tail, decoding may pull
//! them back.
//!
//! Unlike a textbook fixed-precision rANS coder, `total` (called
//! `precision` in the source material) here is the literal CDF range, not
//! an exponent: `encode`/`decode` work for any `total >= 1`, not only
//! powers of two. This is what lets `SamplingWithoutReplacement` pass a
//! raw multiset size as the coding precision.

use crate::error::{Error, Result};

/// Radix of the tail stack: each renormalization step moves exactly this
/// many bits between a lane and the tail.
pub const RANS_BASE: u64 = 1 << 32;
/// Lower bound every lane must satisfy at rest.
pub const RANS_L: u64 = 1 << 32;
/// Upper bound a lane may reach right before renormalizing, at
/// `total == RANS_BASE`: `RANS_L * RANS_BASE == 2^64`, which doesn't fit a
/// `u64`, hence `u128`.
const RANS_H: u128 = (RANS_L as u128) * (RANS_BASE as u128);

/// Pure, single-lane renormalize-and-place step: given a lane's current
/// value, returns the words it pushes onto the tail (low word first popped,
/// i.e. in push order) and its resulting head value. Does not touch shared
/// state, which is what lets [`compute_lane_outcomes`] run these across
/// lanes in parallel.
///
/// The renormalization threshold is `freq * RANS_H / total` (computed in
/// `u128` since `RANS_H` overflows `u64`), not `total * freq` — the two only
/// coincide when `total == RANS_BASE`. For every smaller `total` (every real
/// call site here: `Uniform(256)`, `Categorical` at `2^prec`,
/// `SamplingWithoutReplacement` at the multiset size), `total * freq` lets
/// the post-encode head fall below `RANS_L`, desynchronizing decode's
/// renormalization. This is the teacher's `r_ans.rs` renorm condition
/// `state >= fs << d` with `d = 32 - table_log` (i.e. `freq * bL / M`),
/// generalized from a power-of-two `M` to an arbitrary one.
fn encode_lane(h: u64, start: u64, freq: u64, total: u64) -> Result<(Vec<u32>, u64)> {
    if start + freq > total {
        return Err(Error::PrecisionOverflow { start, freq, total });
    }
    let max_h = (freq as u128 * RANS_H) / total as u128;
    let max_h = u64::try_from(max_h).unwrap_or(u64::MAX);
    let mut words = Vec::new();
    let mut h = h;
    while h >= max_h {
        words.push((h & 0xFFFF_FFFF) as u32);
        h >>= 32;
    }
    h = (h / freq) * total + (h % freq) + start;
    Ok((words, h))
}

/// Computes [`encode_lane`] for every lane in `lanes`, sequentially without
/// the `rayon` feature and via `rayon::prelude::par_iter` with it. The
/// caller is responsible for applying the results to the shared tail in
/// order — this function never mutates anything.
fn compute_lane_outcomes(
    head: &[u64],
    lanes: &[usize],
    starts: &[u64],
    freqs: &[u64],
    total: u64,
) -> Result<Vec<(Vec<u32>, u64)>> {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        lanes
            .par_iter()
            .enumerate()
            .map(|(offset, &lane)| encode_lane(head[lane], starts[offset], freqs[offset], total))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        lanes
            .iter()
            .enumerate()
            .map(|(offset, &lane)| encode_lane(head[lane], starts[offset], freqs[offset], total))
            .collect()
    }
}

/// Compound rANS state: a fixed-width vector of lane values and a
/// variable-length stack of 32-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnsState {
    head: Vec<u64>,
    tail: Vec<u32>,
}

impl AnsState {
    /// Number of independent lanes in the head.
    pub fn lanes(&self) -> usize {
        self.head.len()
    }

    /// Builds a message with every lane initialized to exactly `RANS_L`.
    pub fn base_message(lanes: usize) -> Self {
        AnsState {
            head: vec![RANS_L; lanes],
            tail: Vec::new(),
        }
    }

    /// Like [`Self::base_message`], but fills the low 32 bits of every
    /// lane with random noise, decorrelating the serialized tail between
    /// lanes. Only the `randomize=true` initialization path is seeded;
    /// everything downstream is deterministic given this call's output.
    pub fn base_message_with_rng<R: rand::RngCore>(lanes: usize, rng: &mut R) -> Self {
        let head = (0..lanes)
            .map(|_| RANS_L | (rng.next_u32() as u64))
            .collect();
        AnsState {
            head,
            tail: Vec::new(),
        }
    }

    /// Concatenates the tail stack followed by each lane split into two
    /// 32-bit words (high word first).
    pub fn flatten(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.tail.len() + 2 * self.head.len());
        out.extend_from_slice(&self.tail);
        for &h in &self.head {
            out.push((h >> 32) as u32);
            out.push((h & 0xFFFF_FFFF) as u32);
        }
        out
    }

    /// Inverse of [`Self::flatten`]: reconstructs a state with `lanes`
    /// lanes from a flat word array.
    pub fn unflatten(words: &[u32], lanes: usize) -> Result<Self> {
        let head_words = 2 * lanes;
        if words.len() < head_words {
            return Err(Error::ShapeMismatch {
                expected: head_words,
                actual: words.len(),
            });
        }
        let tail_len = words.len() - head_words;
        let tail = words[..tail_len].to_vec();
        let mut head = Vec::with_capacity(lanes);
        for i in 0..lanes {
            let hi = words[tail_len + 2 * i] as u64;
            let lo = words[tail_len + 2 * i + 1] as u64;
            head.push((hi << 32) | lo);
        }
        Ok(AnsState { head, tail })
    }

    /// Number of bits needed to serialize this state to disk.
    pub fn calculate_state_bits(&self) -> u64 {
        32 * self.flatten().len() as u64
    }

    fn check_lanes(&self, range: std::ops::Range<usize>, len: usize) -> Result<()> {
        if range.end > self.head.len() || range.len() != len {
            return Err(Error::ShapeMismatch {
                expected: range.len(),
                actual: len,
            });
        }
        Ok(())
    }

    /// Encodes one symbol's `(start, freq)` slice onto every lane in
    /// `range`, each lane taking its own `starts[i]`/`freqs[i]` under the
    /// shared CDF `total`. Each lane's arithmetic (how many words it
    /// renormalizes out, and its resulting head value) depends only on that
    /// lane's own inputs, so with the `rayon` feature it runs data-parallel
    /// via [`compute_lane_outcomes`]; the results are always applied to the
    /// shared tail in ascending lane order afterwards, on a single thread,
    /// so multi-lane renormalizations still land deterministically (see
    /// [`Self::decode_pop`]).
    pub fn encode(
        &mut self,
        range: std::ops::Range<usize>,
        starts: &[u64],
        freqs: &[u64],
        total: u64,
    ) -> Result<()> {
        self.check_lanes(range.clone(), starts.len())?;
        self.check_lanes(range.clone(), freqs.len())?;
        let lanes: Vec<usize> = range.collect();
        let outcomes = compute_lane_outcomes(&self.head, &lanes, starts, freqs, total)?;
        for (offset, &lane) in lanes.iter().enumerate() {
            let (words, new_h) = &outcomes[offset];
            self.tail.extend_from_slice(words);
            self.head[lane] = *new_h;
        }
        Ok(())
    }

    /// Reads the per-lane CDF index `head[lane] % total` for every lane in
    /// `range`, without mutating any state. The caller resolves each `cf`
    /// to a `(start, freq, symbol)` triple (via a multiset lookup or a
    /// codec's inverse-CDF table) and completes the decode with
    /// [`Self::decode_pop`].
    pub fn decode_cf(&self, range: std::ops::Range<usize>, total: u64) -> Result<Vec<u64>> {
        if range.end > self.head.len() {
            return Err(Error::ShapeMismatch {
                expected: range.len(),
                actual: self.head.len(),
            });
        }
        Ok(range.map(|lane| self.head[lane] % total).collect())
    }

    /// Completes a decode for every lane in `range`, given the
    /// `(start, freq)` resolved from each lane's `cf`. Lanes are processed
    /// in descending order, exactly reversing the ascending order
    /// [`Self::encode`] used to fill the shared tail.
    pub fn decode_pop(
        &mut self,
        range: std::ops::Range<usize>,
        starts: &[u64],
        freqs: &[u64],
        total: u64,
    ) -> Result<()> {
        self.check_lanes(range.clone(), starts.len())?;
        self.check_lanes(range.clone(), freqs.len())?;
        let lanes: Vec<usize> = range.clone().collect();
        for (offset, &lane) in lanes.iter().enumerate().rev() {
            let start = starts[offset];
            let freq = freqs[offset];
            let h = self.head[lane];
            let cf = h % total;
            let mut h = freq
                .checked_mul(h / total)
                .and_then(|v| v.checked_add(cf))
                .and_then(|v| v.checked_sub(start))
                .ok_or(Error::PrecisionOverflow { start, freq, total })?;
            while h < RANS_L {
                let pulled = self.tail.pop().ok_or(Error::StateUnderflow)?;
                h = (h << 32) | pulled as u64;
            }
            self.head[lane] = h;
        }
        Ok(())
    }
}
