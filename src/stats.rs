//! Aggregates over score distributions.
//!
//! Sums go through the same pairwise reduction numpy applies to contiguous
//! float64 arrays, so printed means and deviations agree with the Python
//! tooling to the last digit.

const BLOCK_SIZE: usize = 128;

/// Pairwise sum in numpy's `add.reduce` order.
pub fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        let mut total = 0.0;
        for value in values {
            total += value;
        }
        return total;
    }

    if n <= BLOCK_SIZE {
        let mut lanes = [0.0f64; 8];
        lanes.copy_from_slice(&values[..8]);

        let unrolled = n - n % 8;
        for chunk in values[8..unrolled].chunks_exact(8) {
            for (lane, value) in lanes.iter_mut().zip(chunk) {
                *lane += value;
            }
        }

        let mut total = ((lanes[0] + lanes[1]) + (lanes[2] + lanes[3]))
            + ((lanes[4] + lanes[5]) + (lanes[6] + lanes[7]));
        for value in &values[unrolled..] {
            total += value;
        }
        return total;
    }

    let mut half = n / 2;
    half -= half % 8;
    pairwise_sum(&values[..half]) + pairwise_sum(&values[half..])
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(pairwise_sum(values) / values.len() as f64)
}

/// Population standard deviation (sum of squared deviations over N).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let center = mean(values)?;
    let squared: Vec<f64> = values
        .iter()
        .map(|value| {
            let deviation = value - center;
            deviation * deviation
        })
        .collect();

    Some((pairwise_sum(&squared) / values.len() as f64).sqrt())
}

/// Left-to-right mean, as a plain `sum(xs) / len(xs)` loop computes it.
/// Matches Python's builtin `sum` before 3.12, which added compensated
/// float summation.
pub fn sequential_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().sum();
    Some(total / values.len() as f64)
}
