//! Shift-invariant distance measures for time series.
//!
//! Provides normalized cross-correlation computed with FFT convolution and
//! the shape-based distance (SBD) built on top of it.
//!
//! # Example
//!
//! ```
//! use shape_cluster::distance::{cross_correlation, shape_distance, sbd_pairwise};
//!
//! let a = vec![0.0, 1.0, 3.0, 1.0, 0.0];
//! let b = vec![1.0, 3.0, 1.0, 0.0, 0.0];
//!
//! // Same shape, shifted by one step
//! let (dist, aligned) = shape_distance(&a, &b).unwrap();
//! assert!(dist < 1e-9);
//! assert_eq!(aligned, a);
//!
//! let cc = cross_correlation(&a, &b).unwrap();
//! assert_eq!(cc.len(), 2 * a.len() - 1);
//!
//! let matrix = sbd_pairwise(&[a, b]).unwrap();
//! assert_eq!(matrix.len(), 2);
//! ```

pub mod ncc;
pub mod sbd;

// Re-export from ncc
pub use ncc::{
    cross_correlation, cross_correlation_batch, cross_correlation_pairwise, SpectralCorrelator,
    Spectrum,
};

// Re-export from sbd
pub use sbd::{
    align_to_spectrum, roll_zeropad, sbd_column_matrix, sbd_pairwise, shape_distance,
    spectral_distance,
};
