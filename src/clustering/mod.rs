//! Shape clustering algorithms.
//!
//! Provides k-Shape partitioning of series stored as rows, and agglomerative
//! grouping of series stored as columns cut at a distance threshold.
//!
//! # Example
//!
//! ```
//! use shape_cluster::clustering::{cluster, kshape, KShapeConfig};
//! use shape_cluster::core::SeriesMatrix;
//!
//! // k-Shape over rows
//! let rows = SeriesMatrix::from_rows(&[
//!     vec![0.0, 1.0, 3.0, 1.0, 0.0, 0.0],
//!     vec![0.0, 0.0, 1.0, 3.0, 1.0, 0.0],
//!     vec![3.0, 2.0, 1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 3.0, 2.0, 1.0, 0.0, 1.0],
//! ])
//! .unwrap();
//! let result = kshape(&rows, &KShapeConfig::default().k(2).seed(42)).unwrap();
//! assert_eq!(result.labels.len(), 4);
//!
//! // Threshold grouping over columns
//! let columns = SeriesMatrix::from_columns(&[
//!     vec![1.0, 2.0, 3.0, 2.0],
//!     vec![2.0, 4.0, 6.0, 4.0],
//!     vec![5.0, 0.0, 1.0, 0.0],
//! ])
//! .unwrap();
//! let groups = cluster(&columns, 0.01).unwrap();
//! assert!(groups.contains(&vec![1, 0]));
//! ```

pub mod centroid;
pub mod hierarchy;
pub mod kshape;
pub mod threshold;

// Re-export from centroid
pub use centroid::extract_shape;

// Re-export from kshape
pub use kshape::{
    kshape, kshape_with_rng, partition, refine, KShapeConfig, KShapeResult, ShapeCluster,
    DEFAULT_MAX_ITER,
};

// Re-export from hierarchy
pub use hierarchy::{build_tree, MergeTree};

// Re-export from threshold
pub use threshold::{classify, cluster, LabelGroup, DEFAULT_THRESHOLD};
