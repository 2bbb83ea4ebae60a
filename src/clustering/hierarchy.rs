//! Agglomerative merge tree over a pairwise distance matrix.
//!
//! Starting from one leaf per index, the closest live pair is merged
//! repeatedly until a single root remains. Distances are not recomputed
//! after a merge: the merged node inherits the row and column of the
//! smaller index, the larger index is retired.

use log::trace;

use crate::error::{ClusterError, Result};

/// Binary merge tree produced by [`build_tree`].
#[derive(Debug, Clone, PartialEq)]
pub enum MergeTree {
    /// A single original series.
    Leaf {
        /// Index of the series in the distance matrix
        label: usize,
    },
    /// Two subtrees joined at `distance`.
    Internal {
        /// Matrix value at which the two subtrees were merged
        distance: f64,
        /// Subtree that lived at the larger index
        left: Box<MergeTree>,
        /// Subtree that lived at the smaller index
        right: Box<MergeTree>,
    },
}

impl MergeTree {
    /// Leaf labels in left-to-right order.
    pub fn leaf_labels(&self) -> Vec<usize> {
        let mut labels = Vec::with_capacity(self.n_leaves());
        self.collect_labels(&mut labels);
        labels
    }

    fn collect_labels(&self, out: &mut Vec<usize>) {
        match self {
            MergeTree::Leaf { label } => out.push(*label),
            MergeTree::Internal { left, right, .. } => {
                left.collect_labels(out);
                right.collect_labels(out);
            }
        }
    }

    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            MergeTree::Leaf { .. } => 1,
            MergeTree::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Merge distance of an internal node, `None` for a leaf.
    pub fn distance(&self) -> Option<f64> {
        match self {
            MergeTree::Leaf { .. } => None,
            MergeTree::Internal { distance, .. } => Some(*distance),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MergeTree::Leaf { .. })
    }

    /// All merge distances in the tree, root first (pre-order).
    pub fn merge_distances(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let MergeTree::Internal {
                distance,
                left,
                right,
            } = node
            {
                out.push(*distance);
                stack.push(right);
                stack.push(left);
            }
        }
        out
    }
}

/// Build a merge tree from a square distance matrix.
///
/// The matrix is consumed: merged rows and columns are overwritten with
/// `+∞`. The diagonal is ignored. Among equal minima the first live pair in
/// row-major order wins; NaN entries are treated as `+∞`.
///
/// # Arguments
/// * `distances` - `n × n` matrix, `distances[i][j]` is the distance between
///   series `i` and `j`
///
/// # Example
/// ```
/// use shape_cluster::clustering::{build_tree, MergeTree};
///
/// let inf = f64::INFINITY;
/// let tree = build_tree(vec![
///     vec![inf, 0.05, 0.9],
///     vec![0.05, inf, 0.8],
///     vec![0.9, 0.8, inf],
/// ])
/// .unwrap();
///
/// assert_eq!(tree.distance(), Some(0.9));
/// assert_eq!(tree.leaf_labels(), vec![2, 1, 0]);
/// ```
pub fn build_tree(mut distances: Vec<Vec<f64>>) -> Result<MergeTree> {
    let n = distances.len();
    if n == 0 {
        return Err(ClusterError::EmptyData);
    }
    if let Some(row) = distances.iter().find(|row| row.len() != n) {
        return Err(ClusterError::DimensionMismatch {
            expected: n,
            got: row.len(),
        });
    }

    for (i, row) in distances.iter_mut().enumerate() {
        row[i] = f64::INFINITY;
    }

    let mut nodes: Vec<Option<MergeTree>> = (0..n)
        .map(|label| Some(MergeTree::Leaf { label }))
        .collect();
    let mut live = vec![true; n];
    let mut root = 0;

    for _ in 1..n {
        let Some((r, c, value)) = closest_live_pair(&distances, &live) else {
            break;
        };
        let (x, y) = if r >= c { (r, c) } else { (c, r) };

        let (Some(left), Some(right)) = (nodes[x].take(), nodes[y].take()) else {
            return Err(ClusterError::ComputationError(format!(
                "merge of retired index ({}, {})",
                x, y
            )));
        };
        trace!("merge {} into {} at distance {:.6}", x, y, value);

        nodes[y] = Some(MergeTree::Internal {
            distance: value,
            left: Box::new(left),
            right: Box::new(right),
        });
        root = y;

        live[x] = false;
        for (i, row) in distances.iter_mut().enumerate() {
            row[x] = f64::INFINITY;
            if i == x {
                row.fill(f64::INFINITY);
            }
        }
    }

    nodes[root]
        .take()
        .ok_or_else(|| ClusterError::ComputationError("merge tree has no root".to_string()))
}

/// First live off-diagonal pair holding the smallest value, row-major.
fn closest_live_pair(distances: &[Vec<f64>], live: &[bool]) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, row) in distances.iter().enumerate() {
        if !live[i] {
            continue;
        }
        for (j, &v) in row.iter().enumerate() {
            if i == j || !live[j] {
                continue;
            }
            let key = if v.is_nan() { f64::INFINITY } else { v };
            match best {
                Some((_, _, b)) if key >= b => {}
                _ => best = Some((i, j, key)),
            }
        }
    }
    best
}
