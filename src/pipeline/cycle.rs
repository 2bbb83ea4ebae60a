//! Per-cycle grouping of a multivariate recording.
//!
//! Rows are split into consecutive cycles of `window * windows_per_cycle`
//! samples. The first cycle has no history, so every column is its own
//! group; each later cycle is grouped by shape with [`cluster`].

use std::ops::Range;

use log::debug;

use crate::clustering::{cluster, LabelGroup, DEFAULT_THRESHOLD};
use crate::core::SeriesMatrix;
use crate::error::{ClusterError, Result};

/// Cycle layout and clustering threshold.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Samples per window
    pub window: usize,
    /// Windows per cycle
    pub windows_per_cycle: usize,
    /// Distance threshold handed to [`cluster`]
    pub threshold: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            window: 1,
            windows_per_cycle: 1,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl CycleConfig {
    /// Set samples per window.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set windows per cycle.
    pub fn windows_per_cycle(mut self, windows_per_cycle: usize) -> Self {
        self.windows_per_cycle = windows_per_cycle;
        self
    }

    /// Set clustering threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Number of samples in one cycle.
    pub fn cycle_len(&self) -> usize {
        self.window.saturating_mul(self.windows_per_cycle)
    }
}

/// Groups found in every cycle of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleGroups {
    /// Column groups, one list per cycle
    pub groups: Vec<Vec<LabelGroup>>,
    /// Row range covered by each cycle
    pub ranges: Vec<Range<usize>>,
}

impl CycleGroups {
    pub fn n_cycles(&self) -> usize {
        self.groups.len()
    }

    /// Row range and groups of one cycle.
    pub fn cycle(&self, index: usize) -> Option<(Range<usize>, &[LabelGroup])> {
        let range = self.ranges.get(index)?.clone();
        let groups = self.groups.get(index)?;
        Some((range, groups.as_slice()))
    }

    /// Iterate over `(row range, groups)` in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = (Range<usize>, &[LabelGroup])> + '_ {
        self.ranges
            .iter()
            .cloned()
            .zip(self.groups.iter().map(|g| g.as_slice()))
    }
}

/// Group the columns of `data` cycle by cycle.
///
/// The last cycle may be shorter than `config.cycle_len()`.
///
/// # Example
/// ```
/// use shape_cluster::core::SeriesMatrix;
/// use shape_cluster::pipeline::{cycle_groups, CycleConfig};
///
/// let columns: Vec<Vec<f64>> = (0..3)
///     .map(|c| (0..8).map(|t| ((t + c) % 4) as f64).collect())
///     .collect();
/// let data = SeriesMatrix::from_columns(&columns).unwrap();
///
/// let config = CycleConfig::default().window(2).windows_per_cycle(2).threshold(0.5);
/// let result = cycle_groups(&data, &config).unwrap();
///
/// assert_eq!(result.n_cycles(), 2);
/// assert_eq!(result.groups[0], vec![vec![0], vec![1], vec![2]]);
/// ```
pub fn cycle_groups(data: &SeriesMatrix, config: &CycleConfig) -> Result<CycleGroups> {
    let cycle_len = config.cycle_len();
    if cycle_len == 0 {
        return Err(ClusterError::InvalidParameter(format!(
            "cycle length must be positive (window = {}, windows_per_cycle = {})",
            config.window, config.windows_per_cycle
        )));
    }
    if config.threshold.is_nan() {
        return Err(ClusterError::InvalidParameter(
            "threshold must not be NaN".to_string(),
        ));
    }

    let n = data.n_rows();
    let mut result = CycleGroups {
        groups: Vec::new(),
        ranges: Vec::new(),
    };

    let mut start = 0;
    while start < n {
        let end = n.min(start + cycle_len);
        let groups = if result.groups.is_empty() {
            (0..data.n_cols()).map(|c| vec![c]).collect()
        } else {
            cluster(&data.slice_rows(start, end)?, config.threshold)?
        };
        debug!(
            "cycle {} (rows {}..{}): {} groups",
            result.groups.len(),
            start,
            end,
            groups.len()
        );
        result.groups.push(groups);
        result.ranges.push(start..end);
        start = end;
    }

    Ok(result)
}
