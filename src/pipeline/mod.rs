//! Driver-level helpers built on the clustering core.
//!
//! Splits a recording into cycles and groups its columns by shape in each
//! cycle.

pub mod cycle;

// Re-export from cycle
pub use cycle::{cycle_groups, CycleConfig, CycleGroups};
