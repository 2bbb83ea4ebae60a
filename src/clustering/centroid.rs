//! Shape centroid extraction for k-Shape.
//!
//! The centroid of a cluster is the series that maximizes the summed squared
//! normalized correlation to the (aligned, z-normalized) members. That is
//! the dominant eigenvector of
//!
//! ```text
//! M = P · (Yᵀ Y) · P,    P = I - (1/L) · J
//! ```
//!
//! where `Y` stacks the z-normalized members as rows and `P` removes the
//! mean from every candidate shape.

use log::{trace, warn};
use nalgebra::{DMatrix, SymmetricEigen};

use crate::core::SeriesMatrix;
use crate::distance::{align_to_spectrum, SpectralCorrelator};
use crate::error::{ClusterError, Result};
use crate::transform::zscore;
use crate::utils::stats::euclidean_distance;

/// Eigenvalues at or below this are treated as a degenerate problem.
const MIN_EIGENVALUE: f64 = 1e-10;

/// Iteration cap handed to the symmetric eigen solver.
const MAX_EIGEN_ITER: usize = 10_000;

/// Compute a refined shape centroid for one cluster.
///
/// # Arguments
/// * `labels` - Current cluster id of every row of `data`
/// * `data` - Series as rows
/// * `cluster` - Cluster whose centroid is extracted
/// * `current` - The cluster's previous centroid (all zeros before the first
///   extraction, in which case members are used unaligned)
///
/// # Returns
/// A z-normalized centroid of length `data.n_cols()`, or all zeros when the
/// cluster has no members.
pub fn extract_shape(
    labels: &[usize],
    data: &SeriesMatrix,
    cluster: usize,
    current: &[f64],
) -> Result<Vec<f64>> {
    if data.n_cols() == 0 {
        return Ok(Vec::new());
    }
    let correlator = SpectralCorrelator::new(data.n_cols())?;
    extract_shape_with(&correlator, labels, data, cluster, current)
}

/// [`extract_shape`] with an already planned correlator.
pub(crate) fn extract_shape_with(
    correlator: &SpectralCorrelator,
    labels: &[usize],
    data: &SeriesMatrix,
    cluster: usize,
    current: &[f64],
) -> Result<Vec<f64>> {
    let len = data.n_cols();
    if labels.len() != data.n_rows() {
        return Err(ClusterError::DimensionMismatch {
            expected: data.n_rows(),
            got: labels.len(),
        });
    }
    if current.len() != len {
        return Err(ClusterError::DimensionMismatch {
            expected: len,
            got: current.len(),
        });
    }
    if len == 0 {
        return Ok(Vec::new());
    }

    let members = aligned_members(correlator, labels, data, cluster, current)?;
    if members.is_empty() {
        return Ok(vec![0.0; len]);
    }

    let m = centered_scatter(&members, len);
    if m.iter().any(|v| !v.is_finite()) {
        return Err(ClusterError::ComputationError(format!(
            "non-finite scatter matrix for cluster {}",
            cluster
        )));
    }

    let eigen = SymmetricEigen::try_new(m, f64::EPSILON, MAX_EIGEN_ITER).ok_or_else(|| {
        ClusterError::ComputationError(format!(
            "eigen decomposition did not converge for cluster {}",
            cluster
        ))
    })?;

    let best = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .fold(None, |acc: Option<(usize, f64)>, (i, &v)| match acc {
            Some((_, b)) if b >= v => acc,
            _ => Some((i, v)),
        });

    let (best_idx, best_val) = match best {
        Some((i, v)) if v.is_finite() && v > MIN_EIGENVALUE => (i, v),
        _ => {
            warn!(
                "cluster {}: degenerate shape matrix ({} members), using mean member",
                cluster,
                members.len()
            );
            return Ok(mean_member(&members, len));
        }
    };
    trace!("cluster {}: dominant eigenvalue {:.6}", cluster, best_val);

    let mut centroid: Vec<f64> = eigen.eigenvectors.column(best_idx).iter().copied().collect();

    // Eigenvectors carry no sign; keep the one closer to the first member.
    let first = &members[0];
    let negated: Vec<f64> = centroid.iter().map(|v| -v).collect();
    if euclidean_distance(first, &centroid) >= euclidean_distance(first, &negated) {
        centroid = negated;
    }

    Ok(zscore(&centroid))
}

/// Members of `cluster`, aligned to `current` unless it is all zeros.
fn aligned_members(
    correlator: &SpectralCorrelator,
    labels: &[usize],
    data: &SeriesMatrix,
    cluster: usize,
    current: &[f64],
) -> Result<Vec<Vec<f64>>> {
    let unaligned = current.iter().all(|&v| v == 0.0);
    let reference = if unaligned {
        None
    } else {
        Some(correlator.spectrum(current)?)
    };

    labels
        .iter()
        .enumerate()
        .filter(|(_, &l)| l == cluster)
        .map(|(i, _)| match &reference {
            None => Ok(data.row(i).to_vec()),
            Some(r) => align_to_spectrum(correlator, r, data.row(i)).map(|(_, a)| a),
        })
        .collect()
}

/// `P · YᵀY · P` for the z-normalized members.
fn centered_scatter(members: &[Vec<f64>], len: usize) -> DMatrix<f64> {
    let normalized: Vec<Vec<f64>> = members.iter().map(|m| zscore(m)).collect();
    let y = DMatrix::from_fn(normalized.len(), len, |r, c| normalized[r][c]);
    let s = y.transpose() * &y;

    let p = DMatrix::<f64>::identity(len, len)
        - DMatrix::<f64>::from_element(len, len, 1.0 / len as f64);

    &p * s * &p
}

/// Element-wise mean of the members.
fn mean_member(members: &[Vec<f64>], len: usize) -> Vec<f64> {
    let n = members.len() as f64;
    (0..len)
        .map(|i| members.iter().map(|m| m[i]).sum::<f64>() / n)
        .collect()
}
