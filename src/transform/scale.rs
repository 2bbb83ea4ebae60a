//! Scaling and normalization transforms for series.
//!
//! Provides z-normalization (used by the shape centroid) and min-max
//! normalization of raw input columns.

use crate::core::SeriesMatrix;
use crate::utils::stats::mean_and_sample_std;

/// Z-normalize a series to zero mean and unit sample standard deviation.
///
/// x_scaled = (x - mean) / std, with `std` computed using `n - 1`.
///
/// Series that cannot be scaled (fewer than two values, zero or non-finite
/// spread) map to all zeros.
pub fn zscore(series: &[f64]) -> Vec<f64> {
    let (m, sd) = match mean_and_sample_std(series) {
        Some((m, sd)) if sd.is_finite() && sd > 0.0 => (m, sd),
        _ => return vec![0.0; series.len()],
    };

    series
        .iter()
        .map(|&x| {
            let z = (x - m) / sd;
            if z.is_finite() {
                z
            } else {
                0.0
            }
        })
        .collect()
}

/// Z-normalize each series independently.
pub fn zscore_rows(series: &[Vec<f64>]) -> Vec<Vec<f64>> {
    series.iter().map(|s| zscore(s)).collect()
}

/// Normalize data to [0, 1] range (min-max normalization).
///
/// x_scaled = (x - min) / (max - min)
///
/// A constant series maps to all zeros.
pub fn min_max_normalize(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= 1e-10 {
        return vec![0.0; series.len()];
    }

    series.iter().map(|&x| (x - min) / range).collect()
}

/// Min-max normalize every column of a matrix independently.
pub fn normalize_columns(data: &SeriesMatrix) -> SeriesMatrix {
    let columns: Vec<Vec<f64>> = data
        .columns()
        .iter()
        .map(|c| min_max_normalize(c))
        .collect();

    if columns.is_empty() {
        return SeriesMatrix::zeros(data.n_rows(), 0);
    }

    // Columns come from a valid matrix, so they share one length.
    SeriesMatrix::from_columns(&columns).unwrap_or_else(|_| data.clone())
}
