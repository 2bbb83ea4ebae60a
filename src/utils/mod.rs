//! Numeric helpers shared by the distance and clustering modules.

pub mod stats;

pub use stats::{argmax, argmin, euclidean_distance, l2_norm, mean, mean_and_sample_std};
