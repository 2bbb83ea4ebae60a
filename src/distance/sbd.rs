//! Shape-based distance (SBD) between time series.
//!
//! SBD is `1 - max_lag NCC(x, y)`: two series that match after some shift
//! have distance near 0, unrelated ones near 1 and anti-correlated ones
//! near 2. The best shift is also returned so callers can align `y` onto
//! `x` before averaging shapes.

use crate::core::SeriesMatrix;
use crate::error::{ClusterError, Result};
use crate::utils::stats::argmax;

use super::ncc::{SpectralCorrelator, Spectrum};

/// Shift a series by `shift` positions, filling vacated slots with zeros.
///
/// Positive shifts move values towards the end, negative towards the start.
/// Values pushed past either end are dropped; `|shift| >= len` gives all
/// zeros.
pub fn roll_zeropad(series: &[f64], shift: isize) -> Vec<f64> {
    let n = series.len();
    let magnitude = shift.unsigned_abs();

    if shift == 0 {
        return series.to_vec();
    }
    if magnitude >= n {
        return vec![0.0; n];
    }

    let mut out = vec![0.0; n];
    if shift > 0 {
        out[magnitude..].copy_from_slice(&series[..n - magnitude]);
    } else {
        out[..n - magnitude].copy_from_slice(&series[magnitude..]);
    }
    out
}

/// Turn a correlation vector into `(distance, shift)`.
///
/// The shift aligns `y` onto `x`; distance is clamped into `[0, 2]` so
/// rounding never produces a negative value.
fn distance_and_shift(ncc: &[f64], len: usize) -> (f64, isize) {
    let idx = argmax(ncc).unwrap_or(0);
    let best = ncc.get(idx).copied().unwrap_or(0.0);
    let dist = (1.0 - best).clamp(0.0, 2.0);
    (dist, idx as isize + 1 - len as isize)
}

/// Compute the shape-based distance between two series.
///
/// # Arguments
/// * `x` - Reference series
/// * `y` - Series to align onto `x` (same length as `x`)
///
/// # Returns
/// `(distance, y_aligned)` where distance is in `[0, 2]` and `y_aligned` is
/// `y` shifted (zero-filled) by the lag that maximizes the correlation.
///
/// # Example
/// ```
/// use shape_cluster::distance::shape_distance;
///
/// let (d, aligned) = shape_distance(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert!((d - 0.0438171125).abs() < 1e-9);
/// assert_eq!(aligned, vec![1.0, 2.0, 3.0]);
/// ```
pub fn shape_distance(x: &[f64], y: &[f64]) -> Result<(f64, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    let correlator = SpectralCorrelator::new(x.len())?;
    let reference = correlator.spectrum(x)?;
    align_to_spectrum(&correlator, &reference, y)
}

/// Shape-based distance and alignment of `y` against a prepared reference.
///
/// Same result as [`shape_distance`] with the reference series already
/// transformed, so one reference can be reused across many `y`.
pub fn align_to_spectrum(
    correlator: &SpectralCorrelator,
    reference: &Spectrum,
    y: &[f64],
) -> Result<(f64, Vec<f64>)> {
    let sy = correlator.spectrum(y)?;
    let ncc = correlator.correlate_spectra(reference, &sy);
    let (dist, shift) = distance_and_shift(&ncc, correlator.series_len());
    Ok((dist, roll_zeropad(y, shift)))
}

/// Shape-based distance between two prepared spectra.
///
/// Only the distance is returned; used where the aligned series is not
/// needed (assignment steps, distance matrices).
pub fn spectral_distance(correlator: &SpectralCorrelator, x: &Spectrum, y: &Spectrum) -> f64 {
    let ncc = correlator.correlate_spectra(x, y);
    distance_and_shift(&ncc, correlator.series_len()).0
}

/// Compute the pairwise SBD matrix for multiple series.
///
/// # Arguments
/// * `series` - Equal-length series
///
/// # Returns
/// Symmetric distance matrix with a zero diagonal.
pub fn sbd_pairwise<S: AsRef<[f64]>>(series: &[S]) -> Result<Vec<Vec<f64>>> {
    let n = series.len();
    let mut dist_matrix = vec![vec![0.0; n]; n];
    let Some(first) = series.first() else {
        return Ok(dist_matrix);
    };

    let correlator = SpectralCorrelator::new(first.as_ref().len())?;
    let spectra = series
        .iter()
        .map(|s| correlator.spectrum(s.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    for i in 0..n {
        for j in (i + 1)..n {
            let d = spectral_distance(&correlator, &spectra[i], &spectra[j]);
            dist_matrix[i][j] = d;
            dist_matrix[j][i] = d;
        }
    }

    Ok(dist_matrix)
}

/// Pairwise SBD matrix treating each column of `data` as a series.
pub fn sbd_column_matrix(data: &SeriesMatrix) -> Result<Vec<Vec<f64>>> {
    if data.n_cols() == 0 {
        return Ok(Vec::new());
    }
    sbd_pairwise(&data.columns())
}
