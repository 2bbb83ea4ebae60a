//! Core data structures for shape clustering.

mod matrix;

pub use matrix::SeriesMatrix;
