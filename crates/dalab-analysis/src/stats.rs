//! Shared statistical helpers: quantiles, percentages, frequency counts
//! and Pearson correlation.
use std::collections::HashMap;
use std::hash::Hash;

use ndarray::{Array1, ArrayView1, Axis};
use ndarray_stats::interpolate::Linear;
use ndarray_stats::QuantileExt;
use noisy_float::types::n64;
use statrs::statistics::Statistics;

use crate::error::{StatsError, StatsResult};

/// Estimate the `q`-th quantile of `values` with linear interpolation
/// between the two nearest ranks (NaN values are skipped).
///
/// # Arguments
///
/// * `values` - The sample.
/// * `q` - Quantile in `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> StatsResult<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::Quantile(format!("q must lie in [0, 1], got {}", q)));
    }
    if values.is_empty() {
        return Err(StatsError::Quantile("empty sample".to_string()));
    }
    let mut data = Array1::from(values.to_vec());
    let lane = data
        .quantile_axis_skipnan_mut(Axis(0), n64(q), &Linear)
        .map_err(|e| StatsError::Quantile(e.to_string()))?;
    Ok(lane.into_scalar())
}

/// Inclusive `[lower, upper]` bounds given by two quantiles of `values`.
pub fn quantile_bounds(values: &[f64], lower: f64, upper: f64) -> StatsResult<(f64, f64)> {
    Ok((quantile(values, lower)?, quantile(values, upper)?))
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, so `0.35` (stored as 0.34999...) becomes
/// `0.3`, and exact halves go to the even digit: `0.25` becomes `0.2`.
/// Scaling by a power of ten first would round both up.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}

/// Share of `flags` that are true, in percent. Empty input yields 0.
pub fn percentage<I>(flags: I) -> f64
where
    I: IntoIterator<Item = bool>,
{
    let (hits, total) = flags
        .into_iter()
        .fold((0usize, 0usize), |(hits, total), flag| (hits + flag as usize, total + 1));
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

/// Count occurrences of each distinct item.
///
/// Ordered by count (descending); ties keep the order in which the items
/// first appeared.
pub fn value_counts<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Pearson's r between two equally long samples.
///
/// The result is NaN when either sample has zero variance.
///
/// # Errors
///
/// [`StatsError::LengthMismatch`] when the samples differ in length.
pub fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> StatsResult<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let cov = Statistics::population_covariance(x.iter(), y.iter());
    let sx = Statistics::population_std_dev(x.iter());
    let sy = Statistics::population_std_dev(y.iter());
    if sx == 0.0 || sy == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(cov / (sx * sy))
}
