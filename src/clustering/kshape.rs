//! k-Shape clustering for time series.
//!
//! Partitions series (rows of a [`SeriesMatrix`]) into `k` groups of similar
//! shape. Each round extracts a shape centroid per cluster and reassigns
//! every series to the centroid with the smallest shape-based distance,
//! until no assignment changes or the round cap is hit.

use log::{debug, trace};
use rand::prelude::*;
use rand::SeedableRng;

use super::centroid::extract_shape_with;
use crate::core::SeriesMatrix;
use crate::distance::{spectral_distance, SpectralCorrelator};
use crate::error::{ClusterError, Result};
use crate::utils::stats::argmin;

/// Default cap on refinement rounds.
pub const DEFAULT_MAX_ITER: usize = 100;

/// k-Shape configuration.
#[derive(Debug, Clone)]
pub struct KShapeConfig {
    /// Number of clusters
    pub k: usize,
    /// Maximum refinement rounds
    pub max_iter: usize,
    /// Random seed for the initial assignment
    pub seed: Option<u64>,
}

impl Default for KShapeConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }
}

impl KShapeConfig {
    /// Set number of clusters.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k.max(1);
        self
    }

    /// Set maximum refinement rounds.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One cluster: its shape centroid and the indices of its member series.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCluster {
    /// Z-normalized centroid (all zeros for a cluster that never had members)
    pub centroid: Vec<f64>,
    /// Row indices assigned to this cluster, ascending
    pub members: Vec<usize>,
}

/// k-Shape clustering result.
#[derive(Debug, Clone)]
pub struct KShapeResult {
    /// Cluster assignment for each series (0-indexed)
    pub labels: Vec<usize>,
    /// Cluster centroids, one per cluster
    pub centroids: Vec<Vec<f64>>,
    /// Sum of shape distances from each series to its centroid
    pub inertia: f64,
    /// Number of rounds performed
    pub n_iter: usize,
    /// Whether the assignment stopped changing before the round cap
    pub converged: bool,
}

impl KShapeResult {
    /// Get indices of series in a specific cluster.
    pub fn cluster_members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Get the size of each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let k = self.centroids.len();
        let mut sizes = vec![0; k];
        for &label in &self.labels {
            if label < k {
                sizes[label] += 1;
            }
        }
        sizes
    }

    /// Pair every centroid with its members, in cluster-index order.
    pub fn clusters(&self) -> Vec<ShapeCluster> {
        self.centroids
            .iter()
            .enumerate()
            .map(|(c, centroid)| ShapeCluster {
                centroid: centroid.clone(),
                members: self.cluster_members(c),
            })
            .collect()
    }
}

/// Perform k-Shape clustering on the rows of `data`.
///
/// The initial assignment is drawn from a [`StdRng`] seeded with
/// `config.seed`, or from entropy when no seed is set.
///
/// # Example
/// ```
/// use shape_cluster::clustering::{kshape, KShapeConfig};
/// use shape_cluster::core::SeriesMatrix;
///
/// let data = SeriesMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0, 1.0, 0.0, 0.0],
///     vec![0.0, 0.0, 1.0, 2.0, 1.0, 0.0],
///     vec![2.0, 1.0, 0.0, 1.0, 2.0, 2.0],
/// ])
/// .unwrap();
///
/// let result = kshape(&data, &KShapeConfig::default().k(2).seed(7)).unwrap();
/// assert_eq!(result.labels.len(), 3);
/// assert_eq!(result.centroids.len(), 2);
/// ```
pub fn kshape(data: &SeriesMatrix, config: &KShapeConfig) -> Result<KShapeResult> {
    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    kshape_with_rng(data, config.k, config.max_iter, &mut rng)
}

/// k-Shape with a caller-supplied random source for the initial assignment.
pub fn kshape_with_rng<R: Rng + ?Sized>(
    data: &SeriesMatrix,
    k: usize,
    max_iter: usize,
    rng: &mut R,
) -> Result<KShapeResult> {
    validate_k(k)?;
    let labels: Vec<usize> = (0..data.n_rows()).map(|_| rng.gen_range(0..k)).collect();
    refine(data, &labels, k, max_iter)
}

/// Partition the rows of `data` into `k` shape clusters.
///
/// Returns one [`ShapeCluster`] per cluster id in `0..k`; the member lists
/// cover every row exactly once. Different random sources may produce
/// different (or differently numbered) partitions.
pub fn partition<R: Rng + ?Sized>(
    data: &SeriesMatrix,
    k: usize,
    rng: &mut R,
) -> Result<Vec<ShapeCluster>> {
    Ok(kshape_with_rng(data, k, DEFAULT_MAX_ITER, rng)?.clusters())
}

/// Run k-Shape refinement starting from a given assignment.
///
/// # Arguments
/// * `data` - Series as rows
/// * `initial_labels` - Starting cluster id for every row, each `< k`
/// * `k` - Number of clusters
/// * `max_iter` - Round cap
pub fn refine(
    data: &SeriesMatrix,
    initial_labels: &[usize],
    k: usize,
    max_iter: usize,
) -> Result<KShapeResult> {
    validate_k(k)?;
    let (n, len) = data.shape();
    if initial_labels.len() != n {
        return Err(ClusterError::DimensionMismatch {
            expected: n,
            got: initial_labels.len(),
        });
    }
    if let Some(&bad) = initial_labels.iter().find(|&&l| l >= k) {
        return Err(ClusterError::IndexOutOfBounds { index: bad, size: k });
    }

    let mut labels = initial_labels.to_vec();
    let mut centroids = vec![vec![0.0; len]; k];

    if n == 0 {
        return Ok(KShapeResult {
            labels,
            centroids,
            inertia: 0.0,
            n_iter: 0,
            converged: true,
        });
    }

    let correlator = SpectralCorrelator::new(len)?;
    // Rows never change, so their spectra are computed once.
    let row_spectra = data
        .rows()
        .map(|row| correlator.spectrum(row))
        .collect::<Result<Vec<_>>>()?;

    let mut inertia = 0.0;
    let mut n_iter = 0;
    let mut converged = false;

    for round in 0..max_iter {
        n_iter = round + 1;

        // Centroid step
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            *centroid = extract_shape_with(&correlator, &labels, data, cluster, centroid)?;
        }
        let centroid_spectra = centroids
            .iter()
            .map(|c| correlator.spectrum(c))
            .collect::<Result<Vec<_>>>()?;

        // Assignment step
        let mut changed = 0;
        inertia = 0.0;
        for (label, spectrum) in labels.iter_mut().zip(row_spectra.iter()) {
            let distances: Vec<f64> = centroid_spectra
                .iter()
                .map(|c| spectral_distance(&correlator, spectrum, c))
                .collect();
            let nearest = argmin(&distances).unwrap_or(0);
            inertia += distances[nearest];
            if nearest != *label {
                *label = nearest;
                changed += 1;
            }
        }

        trace!("k-shape round {}: {} series reassigned", n_iter, changed);

        if changed == 0 {
            converged = true;
            break;
        }
    }

    if converged {
        debug!("k-shape converged after {} rounds (k = {})", n_iter, k);
    } else {
        debug!(
            "k-shape stopped at round cap {} without converging (k = {})",
            max_iter, k
        );
    }

    Ok(KShapeResult {
        labels,
        centroids,
        inertia,
        n_iter,
        converged,
    })
}

fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(ClusterError::InvalidParameter(
            "k must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// Four shifted sines followed by four shifted pulses, length 16.
    fn generate_shape_data() -> SeriesMatrix {
        let len = 16;
        let mut rows: Vec<Vec<f64>> = [0, 1, 2, 3]
            .iter()
            .map(|&s| {
                (0..len)
                    .map(|t| (2.0 * PI * (t + s) as f64 / len as f64).sin())
                    .collect()
            })
            .collect();
        for s in [2usize, 5, 8, 11] {
            rows.push(
                (0..len)
                    .map(|t| if (t + len - s) % len < 4 { 1.0 } else { 0.0 })
                    .collect(),
            );
        }
        SeriesMatrix::from_rows(&rows).unwrap()
    }

    fn assert_partition(result: &KShapeResult, n: usize) {
        let mut seen = vec![false; n];
        for c in 0..result.centroids.len() {
            for i in result.cluster_members(c) {
                assert!(!seen[i], "row {} assigned twice", i);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "some row unassigned");
    }

    // ==================== refine ====================

    #[test]
    fn refine_separates_sines_from_pulses() {
        let data = generate_shape_data();
        let result = refine(&data, &[0, 1, 0, 1, 0, 1, 0, 1], 2, DEFAULT_MAX_ITER).unwrap();

        assert!(result.converged);
        assert_eq!(result.labels[0], result.labels[1]);
        assert_eq!(result.labels[1], result.labels[2]);
        assert_eq!(result.labels[2], result.labels[3]);
        assert_eq!(result.labels[4], result.labels[5]);
        assert_eq!(result.labels[5], result.labels[6]);
        assert_eq!(result.labels[6], result.labels[7]);
        assert_ne!(result.labels[0], result.labels[4]);
    }

    #[test]
    fn refine_keeps_correct_assignment() {
        let data = generate_shape_data();
        let result = refine(&data, &[0, 0, 0, 0, 1, 1, 1, 1], 2, DEFAULT_MAX_ITER).unwrap();
        assert_eq!(result.labels, vec![0, 0, 0, 0, 1, 1, 1, 1]);
        assert!(result.converged);
        assert_eq!(result.cluster_sizes(), vec![4, 4]);
    }

    #[test]
    fn refine_single_cluster_converges_immediately() {
        let data = generate_shape_data();
        let result = refine(&data, &[0; 8], 1, DEFAULT_MAX_ITER).unwrap();
        assert_eq!(result.labels, vec![0; 8]);
        assert_eq!(result.n_iter, 1);
        assert!(result.converged);
        assert_eq!(result.centroids.len(), 1);
        assert_eq!(result.centroids[0].len(), 16);
    }

    #[test]
    fn refine_with_empty_cluster_keeps_zero_centroid() {
        let data = generate_shape_data();
        let result = refine(&data, &[0; 8], 3, DEFAULT_MAX_ITER).unwrap();
        assert_eq!(result.labels, vec![0; 8]);
        assert_eq!(result.centroids[1], vec![0.0; 16]);
        assert_eq!(result.centroids[2], vec![0.0; 16]);
        assert_eq!(result.cluster_sizes(), vec![8, 0, 0]);
    }

    #[test]
    fn refine_zero_rounds_returns_initial_labels() {
        let data = generate_shape_data();
        let init = [1, 0, 1, 0, 1, 0, 1, 0];
        let result = refine(&data, &init, 2, 0).unwrap();
        assert_eq!(result.labels, init.to_vec());
        assert_eq!(result.n_iter, 0);
        assert!(!result.converged);
    }

    #[test]
    fn refine_validates_labels() {
        let data = generate_shape_data();
        assert!(matches!(
            refine(&data, &[0, 1], 2, 10),
            Err(ClusterError::DimensionMismatch { expected: 8, got: 2 })
        ));
        assert!(matches!(
            refine(&data, &[0, 0, 0, 0, 0, 0, 0, 5], 2, 10),
            Err(ClusterError::IndexOutOfBounds { index: 5, size: 2 })
        ));
        assert!(matches!(
            refine(&data, &[0; 8], 0, 10),
            Err(ClusterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn refine_inertia_is_zero_for_identical_shapes() {
        let row = vec![-1.0, 1.0, 3.0, 1.0, -1.0, -3.0];
        let data = SeriesMatrix::from_rows(&[row.clone(), row.clone(), row]).unwrap();
        let result = refine(&data, &[0, 0, 0], 1, 10).unwrap();
        assert_relative_eq!(result.inertia, 0.0, epsilon = 1e-10);
    }

    // ==================== kshape / partition ====================

    #[test]
    fn kshape_covers_every_row() {
        let data = generate_shape_data();
        for seed in 0..5 {
            let config = KShapeConfig::default().k(3).seed(seed);
            let result = kshape(&data, &config).unwrap();
            assert_eq!(result.labels.len(), 8);
            assert_eq!(result.centroids.len(), 3);
            assert!(result.labels.iter().all(|&l| l < 3));
            assert!(result.n_iter <= DEFAULT_MAX_ITER);
            assert_partition(&result, 8);
        }
    }

    #[test]
    fn kshape_is_reproducible_with_seed() {
        let data = generate_shape_data();
        let config = KShapeConfig::default().k(2).seed(42);
        let a = kshape(&data, &config).unwrap();
        let b = kshape(&data, &config).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centroids, b.centroids);
    }

    #[test]
    fn partition_returns_k_clusters_in_order() {
        let data = generate_shape_data();
        let mut rng = StdRng::seed_from_u64(3);
        let clusters = partition(&data, 2, &mut rng).unwrap();

        assert_eq!(clusters.len(), 2);
        let mut all: Vec<usize> = clusters.iter().flat_map(|c| c.members.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..8).collect::<Vec<_>>());
        for c in &clusters {
            assert_eq!(c.centroid.len(), 16);
            assert!(c.members.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn partition_empty_matrix() {
        let data = SeriesMatrix::zeros(0, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let clusters = partition(&data, 3, &mut rng).unwrap();
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.members.is_empty()));
        assert!(clusters.iter().all(|c| c.centroid == vec![0.0; 5]));
    }

    #[test]
    fn partition_rejects_zero_k() {
        let data = generate_shape_data();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(partition(&data, 0, &mut rng).is_err());
    }

    // ==================== config builder ====================

    #[test]
    fn config_builder() {
        let config = KShapeConfig::default().k(5).max_iter(50).seed(123);

        assert_eq!(config.k, 5);
        assert_eq!(config.max_iter, 50);
        assert_eq!(config.seed, Some(123));
        assert_eq!(KShapeConfig::default().k(0).k, 1);
        assert_eq!(KShapeConfig::default().max_iter, 100);
    }

    // ==================== result helpers ====================

    #[test]
    fn clusters_pair_centroids_with_members() {
        let result = KShapeResult {
            labels: vec![1, 0, 1, 1],
            centroids: vec![vec![0.5; 3], vec![1.5; 3], vec![0.0; 3]],
            inertia: 0.0,
            n_iter: 1,
            converged: true,
        };
        let clusters = result.clusters();
        assert_eq!(clusters[0].members, vec![1]);
        assert_eq!(clusters[1].members, vec![0, 2, 3]);
        assert!(clusters[2].members.is_empty());
        assert_eq!(clusters[1].centroid, vec![1.5; 3]);
        assert_eq!(result.cluster_sizes(), vec![1, 3, 0]);
    }
}
