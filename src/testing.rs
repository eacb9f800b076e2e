//! Testing helpers.

use crate::poisson;

/// Upper 1% critical values of the chi-square distribution, indexed by degrees of freedom.
pub const CHI_SQUARE_CRITICAL_01: [f64; 16] = [
    f64::NAN, 6.635, 9.210, 11.345, 13.277, 15.086, 16.812, 18.475, 20.090, 21.666, 23.209, 24.725,
    26.217, 27.688, 29.141, 30.578,
];

/// Pearson's goodness-of-fit statistic for a histogram of counts (indexed by the count value)
/// against Poisson(`lambda`), over `buckets` consecutive buckets giving `buckets - 1` degrees of
/// freedom. The first bucket holds every value up to and including `first`; the last holds
/// `first + buckets - 1` and everything above it.
pub fn poisson_chi_square(histogram: &[u64], lambda: f64, first: u64, buckets: usize) -> f64 {
    assert!(buckets >= 2, "at least two buckets are required");
    let trials = histogram.iter().sum::<u64>() as f64;
    let last = first + buckets as u64 - 1;

    let mut observed = vec![0u64; buckets];
    for (k, &count) in histogram.iter().enumerate() {
        let k = k as u64;
        let bucket = k.clamp(first, last) - first;
        observed[bucket as usize] += count;
    }

    let mut expected = vec![0.0; buckets];
    expected[0] = poisson::cdf(first, lambda);
    for k in first + 1..last {
        expected[(k - first) as usize] = poisson::univariate(k, lambda);
    }
    expected[buckets - 1] = 1.0 - poisson::cdf(last - 1, lambda);

    observed
        .iter()
        .zip(expected.iter())
        .map(|(&observed, &prob)| {
            let expected = prob * trials;
            assert!(expected >= 5.0, "bucket too sparse: expected count {expected}");
            (observed as f64 - expected).powi(2) / expected
        })
        .sum()
}

/// Grows `histogram` as needed and counts `value` in it.
pub fn record(histogram: &mut Vec<u64>, value: u64) {
    let index = value as usize;
    if index >= histogram.len() {
        histogram.resize(index + 1, 0);
    }
    histogram[index] += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bucket_includes_first() {
        // P(X <= 1) = 0.7358 and P(X >= 2) = 0.2642 for a mean of 1
        let histogram = [368, 368, 264];
        let chi_square = poisson_chi_square(&histogram, 1.0, 1, 2);
        assert!(chi_square < 1e-3, "{chi_square}");
    }

    #[test]
    fn record_grows_histogram() {
        let mut histogram = vec![];
        record(&mut histogram, 3);
        record(&mut histogram, 0);
        record(&mut histogram, 3);
        assert_eq!(vec![1, 0, 0, 2], histogram);
    }
}
