//! Factorials and their logarithms. Exact values are tabulated up to 34!, the largest factorial
//! that fits in a `u128`; beyond that only the logarithm is available.

const MAX_FACTORIAL_ENTRIES: usize = 35;

const LN_2PI_HALF: f64 = 0.918_938_533_204_672_8;

const FACTORIALS: [u128; MAX_FACTORIAL_ENTRIES] = {
    let mut entries = [1u128; MAX_FACTORIAL_ENTRIES];
    let mut i = 2;
    while i < MAX_FACTORIAL_ENTRIES {
        entries[i] = i as u128 * entries[i - 1];
        i += 1;
    }
    entries
};

/// Exact `n!`.
///
/// # Panics
/// If `n!` overflows a `u128` (i.e., `n > 34`).
#[inline]
pub fn get(n: u64) -> u128 {
    assert!(n < MAX_FACTORIAL_ENTRIES as u64, "{n}! overflows");
    FACTORIALS[n as usize]
}

/// `ln(n!)` for any `n`. Tabulated values are used where available; otherwise the Stirling series
/// is evaluated, which is accurate to well below `f64` resolution for `n ≥ 35`.
#[inline]
pub fn ln_factorial(n: u64) -> f64 {
    if n < MAX_FACTORIAL_ENTRIES as u64 {
        (FACTORIALS[n as usize] as f64).ln()
    } else {
        let x = n as f64 + 1.0;
        let inv = 1.0 / x;
        let inv_sq = inv * inv;
        let series = inv
            * (1.0 / 12.0
                - inv_sq * (1.0 / 360.0 - inv_sq * (1.0 / 1260.0 - inv_sq / 1680.0)));
        (x - 0.5) * x.ln() - x + LN_2PI_HALF + series
    }
}
