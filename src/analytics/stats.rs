//! Small numeric helpers shared by the aggregation functions.
//!
//! Degenerate inputs are deliberately not special-cased: `percentile` of an
//! empty slice and `sample_std` of fewer than two values return NaN, matching
//! the behavior of the usual dataframe stacks.

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator). NaN for n < 2.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Percentile with linear interpolation between closest ranks.
/// `q` is in [0, 1]. NaN for empty input.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
