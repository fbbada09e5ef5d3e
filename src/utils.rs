//! Small numerical helpers used to report (not compute) compression bounds.
//!
//! Ported from `original_source/utils.py`, which leans on
//! `scipy.special.gammaln`. This crate carries no statistics dependency, so
//! `ln_gamma` below is a compact Lanczos approximation — accurate to
//! several significant digits, which is all `log2_multinomial_coeff` needs
//! for reporting/testing the information-theoretic bound of §8.

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function, for `x > 0`.
fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula: Gamma(x)Gamma(1-x) = pi / sin(pi x).
        (std::f64::consts::PI / (std::f64::consts::PI * x).sin()).ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut a = LANCZOS_COEFFICIENTS[0];
        let t = x + LANCZOS_G + 0.5;
        for (i, &c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
    }
}

/// `log2(N! / prod(fᵢ!))` for a slice of nonnegative multiplicities, i.e.
/// the number of bits wasted by an arbitrary ordering of a multiset with
/// these multiplicities.
pub fn log2_multinomial_coeff(freqs: &[u64]) -> f64 {
    let n: u64 = freqs.iter().sum();
    let numerator = ln_gamma(n as f64 + 1.0);
    let denominator: f64 = freqs.iter().map(|&f| ln_gamma(f as f64 + 1.0)).sum();
    (numerator - denominator) / std::f64::consts::LN_2
}
