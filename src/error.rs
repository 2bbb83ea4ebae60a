//! Error types for the shape-cluster library.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur during distance computation and clustering.
///
/// Degenerate but well-defined inputs (all-zero series, empty clusters,
/// thresholds outside the distance range) are not errors; they produce
/// zero vectors, infinities or empty groups instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// An operation that needs at least one element got none.
    #[error("empty input data")]
    EmptyData,

    /// Series lengths or matrix shapes do not agree.
    #[error("invalid input: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A parameter outside its valid range (`k == 0`, NaN threshold, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A cluster id or row index outside its range.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// The eigen solver failed or produced non-finite values.
    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ClusterError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ClusterError::DimensionMismatch {
            expected: 4,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid input: dimension mismatch: expected 4, got 3"
        );

        let err = ClusterError::InvalidParameter("k must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid parameter: k must be at least 1");

        let err = ClusterError::IndexOutOfBounds { index: 5, size: 3 };
        assert_eq!(err.to_string(), "index out of bounds: 5 (size: 3)");
    }

    #[test]
    fn errors_compare_by_value() {
        let err1 = ClusterError::EmptyData;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, ClusterError::ComputationError("nan".into()));
    }
}
