//! # shape-cluster
//!
//! Shape-based clustering of time series.
//!
//! Groups equal-length series by shape regardless of phase shift and scale.
//! Provides FFT-based normalized cross-correlation, the shape-based distance
//! (SBD), k-Shape partitioning with eigenvector centroids, and agglomerative
//! grouping cut at a distance threshold.

#![allow(clippy::needless_range_loop)]

pub mod clustering;
pub mod core;
pub mod distance;
pub mod error;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{ClusterError, Result};

pub mod prelude {
    pub use crate::clustering::{
        classify, cluster, kshape, partition, KShapeConfig, KShapeResult, LabelGroup, MergeTree,
    };
    pub use crate::core::SeriesMatrix;
    pub use crate::distance::{cross_correlation, shape_distance};
    pub use crate::error::{ClusterError, Result};
}
