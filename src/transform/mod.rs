//! Series normalization.
//!
//! Provides z-normalization (used by the centroid step) and min-max scaling
//! of raw input columns.
//!
//! # Example
//!
//! ```
//! use shape_cluster::transform::{min_max_normalize, zscore};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! // Zero mean, unit sample standard deviation
//! let z = zscore(&series);
//! assert!(z.iter().sum::<f64>().abs() < 1e-12);
//!
//! // Scale into [0, 1]
//! let scaled = min_max_normalize(&series);
//! assert_eq!(scaled, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! ```

pub mod scale;

// Re-export from scale
pub use scale::{min_max_normalize, normalize_columns, zscore, zscore_rows};
