//! Walkthrough of shape distance, k-Shape and threshold grouping.
//!
//! Run with `cargo run --example shape_clustering`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_cluster::clustering::{build_tree, classify, partition};
use shape_cluster::core::SeriesMatrix;
use shape_cluster::distance::{sbd_column_matrix, shape_distance};
use shape_cluster::pipeline::{cycle_groups, CycleConfig};
use shape_cluster::transform::normalize_columns;
use shape_cluster::Result;
use std::f64::consts::PI;

fn sine(len: usize, period: f64, phase: usize, amplitude: f64) -> Vec<f64> {
    (0..len)
        .map(|t| amplitude * (2.0 * PI * (t + phase) as f64 / period).sin())
        .collect()
}

fn pulse(len: usize, period: usize, width: usize) -> Vec<f64> {
    (0..len)
        .map(|t| if t % period < width { 1.0 } else { 0.0 })
        .collect()
}

fn main() -> Result<()> {
    // Shape distance
    let a = sine(32, 16.0, 0, 1.0);
    let b = sine(32, 16.0, 3, 4.0);
    let (d, _) = shape_distance(&a, &b)?;
    println!("SBD(sine, shifted scaled sine) = {:.4}", d);

    // k-Shape over rows
    let mut rows: Vec<Vec<f64>> = (0..4).map(|p| sine(32, 16.0, p, 1.0)).collect();
    rows.extend((0..4).map(|_| pulse(32, 16, 3)));
    let data = SeriesMatrix::from_rows(&rows)?;
    let mut rng = StdRng::seed_from_u64(42);
    for (c, cluster) in partition(&data, 2, &mut rng)?.iter().enumerate() {
        println!("k-Shape cluster {}: rows {:?}", c, cluster.members);
    }

    // Threshold grouping over columns
    let columns = vec![
        sine(48, 12.0, 0, 3.0),
        sine(48, 12.0, 0, 0.5),
        pulse(48, 12, 2),
        sine(48, 12.0, 6, 1.0),
    ];
    let recording = normalize_columns(&SeriesMatrix::from_columns(&columns)?);
    let tree = build_tree(sbd_column_matrix(&recording)?)?;
    println!("merge distances: {:?}", tree.merge_distances());
    for threshold in [0.01, 0.2, 1.0] {
        println!("threshold {:>4}: {:?}", threshold, classify(&tree, threshold));
    }

    // Per-cycle grouping
    let config = CycleConfig::default()
        .window(6)
        .windows_per_cycle(2)
        .threshold(0.05);
    let cycles = cycle_groups(&recording, &config)?;
    for (range, groups) in cycles.iter() {
        println!("rows {:?}: {:?}", range, groups);
    }

    Ok(())
}
