//! The Poisson distribution: its mass function and an exact sampler.

use tinyrand::Rand;

use crate::factorial;

/// Means at or above this value are sampled by transformed rejection; below it, by inversion.
pub const REJECTION_THRESHOLD: f64 = 10.0;

/// Probability of exactly `k` events given a mean of `lambda`.
#[inline]
pub fn univariate(k: u64, lambda: f64) -> f64 {
    if k < 35 {
        lambda.powi(k as i32) * f64::exp(-lambda) / factorial::get(k) as f64
    } else {
        f64::exp(k as f64 * lambda.ln() - lambda - factorial::ln_factorial(k))
    }
}

/// Probability of at most `k` events given a mean of `lambda`.
pub fn cdf(k: u64, lambda: f64) -> f64 {
    let mut prob = f64::exp(-lambda);
    let mut cumulative = prob;
    for i in 1..=k {
        prob *= lambda / i as f64;
        cumulative += prob;
    }
    f64::min(cumulative, 1.0)
}

/// Draws Poisson-distributed counts for a fixed mean. Construction precomputes everything that
/// depends only on the mean, so a sampler should be reused across trials.
#[derive(Debug, Clone, PartialEq)]
pub enum Sampler {
    Inversion(Inversion),
    Rejection(Rejection),
}
impl Sampler {
    pub fn new(lambda: f64) -> Self {
        debug_assert!(lambda > 0.0 && lambda.is_finite(), "invalid mean {lambda}");
        if lambda < REJECTION_THRESHOLD {
            Self::Inversion(Inversion::new(lambda))
        } else {
            Self::Rejection(Rejection::new(lambda))
        }
    }

    #[inline]
    pub fn sample(&self, rand: &mut impl Rand) -> u64 {
        match self {
            Sampler::Inversion(inversion) => inversion.sample(rand),
            Sampler::Rejection(rejection) => rejection.sample(rand),
        }
    }
}

/// Sequential search over the upper tail. Walking the tail `P(X > k)` rather than the cumulative
/// mass keeps tiny means exact: `P(X > 0)` is taken from `expm1` and never rounds to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    lambda: f64,
    p_zero: f64,
    tail_zero: f64,
}
impl Inversion {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            p_zero: f64::exp(-lambda),
            tail_zero: -f64::exp_m1(-lambda),
        }
    }

    #[inline]
    pub fn sample(&self, rand: &mut impl Rand) -> u64 {
        // uniform on (0, 1]; the variate is the first k for which it exceeds P(X > k)
        let v = 1.0 - random_f64(rand);
        let (mut k, mut prob, mut tail) = (0, self.p_zero, self.tail_zero);
        while v <= tail {
            k += 1;
            prob *= self.lambda / k as f64;
            tail -= prob;
            if prob == 0.0 {
                break;
            }
        }
        k
    }
}

/// Hörmann's PTRS (transformed rejection with squeeze). Expected cost is bounded independently of
/// the mean. Variates beyond `u64::MAX` saturate.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    lambda: f64,
    ln_lambda: f64,
    a: f64,
    b: f64,
    ln_inv_alpha: f64,
    v_r: f64,
}
impl Rejection {
    pub fn new(lambda: f64) -> Self {
        let b = 0.931 + 2.53 * lambda.sqrt();
        let a = -0.059 + 0.02483 * b;
        let inv_alpha = 1.1239 + 1.1328 / (b - 3.4);
        let v_r = 0.9277 - 3.6224 / (b - 2.0);
        Self {
            lambda,
            ln_lambda: lambda.ln(),
            a,
            b,
            ln_inv_alpha: inv_alpha.ln(),
            v_r,
        }
    }

    #[inline]
    pub fn sample(&self, rand: &mut impl Rand) -> u64 {
        loop {
            let u = random_f64(rand) - 0.5;
            let v = random_f64(rand);
            let us = 0.5 - u.abs();
            let k = ((2.0 * self.a / us + self.b) * u + self.lambda + 0.43).floor();
            if us >= 0.07 && v <= self.v_r {
                return k as u64;
            }
            if k < 0.0 || (us < 0.013 && v > us) {
                continue;
            }
            let k = k as u64;
            let lhs = v.ln() + self.ln_inv_alpha - (self.a / (us * us) + self.b).ln();
            let rhs = -self.lambda + k as f64 * self.ln_lambda - factorial::ln_factorial(k);
            if lhs <= rhs {
                return k;
            }
        }
    }
}

/// Uniform on [0, 1), using the top 53 bits.
#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    (rand.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}
