//! Flat clustering by cutting a merge tree at a distance threshold.
//!
//! A subtree whose merge distance is below the threshold collapses into a
//! single group. Any other internal node is split and its children are
//! classified on their own. Leaves are always singleton groups.

use crate::core::SeriesMatrix;
use crate::distance::sbd_column_matrix;
use crate::error::{ClusterError, Result};

use super::hierarchy::{build_tree, MergeTree};

/// Original series indices that share a flat cluster.
pub type LabelGroup = Vec<usize>;

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Cut `tree` into label groups.
///
/// The groups partition the tree's leaf labels. Order is left subtree first
/// at every split. A threshold at or below the smallest merge distance
/// yields singletons; one above the root distance yields a single group.
///
/// # Example
/// ```
/// use shape_cluster::clustering::{build_tree, classify};
///
/// let inf = f64::INFINITY;
/// let tree = build_tree(vec![
///     vec![inf, 0.05, 0.9],
///     vec![0.05, inf, 0.8],
///     vec![0.9, 0.8, inf],
/// ])
/// .unwrap();
///
/// assert_eq!(classify(&tree, 0.1), vec![vec![2], vec![1, 0]]);
/// assert_eq!(classify(&tree, 1.0), vec![vec![2, 1, 0]]);
/// ```
pub fn classify(tree: &MergeTree, threshold: f64) -> Vec<LabelGroup> {
    let mut groups = Vec::new();
    cut(tree, threshold, &mut groups);
    groups
}

fn cut(tree: &MergeTree, threshold: f64, groups: &mut Vec<LabelGroup>) {
    match tree {
        MergeTree::Leaf { label } => groups.push(vec![*label]),
        MergeTree::Internal { distance, .. } if *distance < threshold => {
            groups.push(tree.leaf_labels());
        }
        MergeTree::Internal { left, right, .. } => {
            cut(left, threshold, groups);
            cut(right, threshold, groups);
        }
    }
}

/// Group the columns of `data` by shape.
///
/// Each column is a series of length `data.n_rows()`. The pairwise shape
/// distances between columns feed [`build_tree`], and the tree is cut with
/// [`classify`].
///
/// # Errors
/// Returns `InvalidParameter` for a NaN threshold.
pub fn cluster(data: &SeriesMatrix, threshold: f64) -> Result<Vec<LabelGroup>> {
    if threshold.is_nan() {
        return Err(ClusterError::InvalidParameter(
            "threshold must not be NaN".to_string(),
        ));
    }
    if data.n_cols() == 0 {
        return Ok(Vec::new());
    }

    let distances = sbd_column_matrix(data)?;
    let tree = build_tree(distances)?;
    Ok(classify(&tree, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const INF: f64 = f64::INFINITY;

    fn literal_tree() -> MergeTree {
        build_tree(vec![
            vec![INF, 0.05, 0.9],
            vec![0.05, INF, 0.8],
            vec![0.9, 0.8, INF],
        ])
        .unwrap()
    }

    /// Sort members and groups so partitions compare as sets.
    fn canonical(mut groups: Vec<LabelGroup>) -> Vec<LabelGroup> {
        for g in groups.iter_mut() {
            g.sort_unstable();
        }
        groups.sort();
        groups
    }

    /// Columns: sine, sine shifted by 2, a two-step pulse, doubled sine.
    fn shape_columns() -> SeriesMatrix {
        let len = 12;
        let sine = |s: usize, a: f64| -> Vec<f64> {
            (0..len)
                .map(|t| a * (2.0 * PI * (t + s) as f64 / len as f64).sin())
                .collect()
        };
        let pulse: Vec<f64> = (0..len)
            .map(|t| if t == 3 || t == 4 { 1.0 } else { 0.0 })
            .collect();
        SeriesMatrix::from_columns(&[sine(0, 1.0), sine(2, 1.0), pulse, sine(0, 2.0)]).unwrap()
    }

    // ==================== classify ====================

    #[test]
    fn classify_literal_tree() {
        let tree = literal_tree();
        assert_eq!(classify(&tree, 0.1), vec![vec![2], vec![1, 0]]);
        assert_eq!(classify(&tree, 0.01), vec![vec![2], vec![1], vec![0]]);
        assert_eq!(classify(&tree, 1.0), vec![vec![2, 1, 0]]);
    }

    #[test]
    fn classify_comparison_is_strict() {
        let tree = literal_tree();
        assert_eq!(classify(&tree, 0.05), vec![vec![2], vec![1], vec![0]]);
        assert_eq!(classify(&tree, 0.9), vec![vec![2], vec![1, 0]]);
    }

    #[test]
    fn classify_out_of_range_thresholds() {
        let tree = literal_tree();
        assert_eq!(classify(&tree, -1.0).len(), 3);
        assert_eq!(classify(&tree, INF), vec![vec![2, 1, 0]]);
        assert_eq!(classify(&tree, f64::NAN).len(), 3);
    }

    #[test]
    fn classify_leaf() {
        let tree = MergeTree::Leaf { label: 7 };
        assert_eq!(classify(&tree, 0.5), vec![vec![7]]);
    }

    // ==================== cluster ====================

    #[test]
    fn cluster_groups_columns_by_shape() {
        let data = shape_columns();

        assert_eq!(
            canonical(cluster(&data, 0.01).unwrap()),
            vec![vec![0, 3], vec![1], vec![2]]
        );
        assert_eq!(
            canonical(cluster(&data, 0.1).unwrap()),
            vec![vec![0, 1, 3], vec![2]]
        );
        assert_eq!(
            canonical(cluster(&data, 0.5).unwrap()),
            vec![vec![0, 1, 2, 3]]
        );
    }

    #[test]
    fn cluster_default_threshold_keeps_scaled_copies_together() {
        let groups = canonical(cluster(&shape_columns(), DEFAULT_THRESHOLD).unwrap());
        assert!(groups.contains(&vec![0, 3]));
    }

    #[test]
    fn cluster_single_column() {
        let data = SeriesMatrix::from_columns(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(cluster(&data, 0.5).unwrap(), vec![vec![0]]);
    }

    #[test]
    fn cluster_no_columns() {
        let data = SeriesMatrix::zeros(4, 0);
        assert!(cluster(&data, 0.5).unwrap().is_empty());
    }

    #[test]
    fn cluster_rejects_nan_threshold() {
        let data = shape_columns();
        assert!(matches!(
            cluster(&data, f64::NAN),
            Err(ClusterError::InvalidParameter(_))
        ));
    }
}
