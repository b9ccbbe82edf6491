//! The top-down recursive construction of the node table: a single linear
//! sweep over node indices in breadth-first order, no back-tracking.

use crate::error::BuildError;
use crate::metric::Minkowski;
use crate::node::{left_child, node_count_bound, right_child, NodeInfo};
use crate::partition::{centroid, partition_at_median, widest_spread_axis};
use crate::points::Points;

pub struct BuiltArrays {
    pub idx: Vec<u32>,
    pub centroids: Vec<f64>,
    pub info: Vec<NodeInfo>,
}

/// Builds the index permutation, centroid matrix, and node-info table for
/// `points` under `metric`, splitting nodes with more than `leaf_size`
/// points.
pub fn build(points: &Points, metric: &Minkowski, leaf_size: usize) -> Result<BuiltArrays, BuildError> {
    let n = points.n();
    let d = points.d();
    let n_nodes = node_count_bound(n, leaf_size);

    let mut idx: Vec<u32> = (0..n as u32).collect();
    let mut centroids = vec![0.0; n_nodes * d];
    let mut info = vec![
        NodeInfo {
            idx_start: 0,
            idx_end: 0,
            is_leaf: true,
            radius: 0.0,
        };
        n_nodes
    ];

    info[0].idx_start = 0;
    info[0].idx_end = n as u32;

    for i in 0..n_nodes {
        if i > 0 {
            let p = (i - 1) / 2;
            if info[p].is_leaf {
                // Dead node: sits past a leaf ancestor. Empty slice, leaf by definition.
                let end = info[p].idx_end;
                info[i].idx_start = end;
                info[i].idx_end = end;
                info[i].is_leaf = true;
                continue;
            }
            let (s, e) = (info[p].idx_start, info[p].idx_end);
            let mid = s + ((e - s) + 1) / 2;
            if left_child(p) == i {
                info[i].idx_start = s;
                info[i].idx_end = mid;
            } else {
                info[i].idx_start = mid;
                info[i].idx_end = e;
            }
        }

        let (s, e) = (info[i].idx_start as usize, info[i].idx_end as usize);
        let slice = &idx[s..e];

        if slice.is_empty() {
            info[i].is_leaf = true;
            continue;
        }

        let c = centroid(points, slice);
        let radius = slice
            .iter()
            .map(|&j| metric.reduced_distance(&c, points.row(j as usize)))
            .fold(0.0_f64, f64::max);
        let radius = metric.to_true(radius);

        centroids[i * d..(i + 1) * d].copy_from_slice(&c);
        info[i].radius = radius;

        if slice.len() <= leaf_size {
            info[i].is_leaf = true;
            log::trace!("node {i}: leaf with {} points, radius {radius:.6}", slice.len());
        } else {
            let axis = widest_spread_axis(points, slice);
            partition_at_median(points, &mut idx[s..e], axis);
            info[i].is_leaf = false;
            log::trace!("node {i}: internal, {} points, split on axis {axis}", slice.len());
        }
    }

    let half = (n_nodes.saturating_sub(1)) / 2;
    if info[half..].iter().any(|node| !node.is_leaf) {
        return Err(BuildError::InternalOverflow {
            n,
            leaf_size,
            estimated: n_nodes,
        });
    }

    let leaf_count = info.iter().filter(|node| node.is_leaf && !node.is_empty()).count();
    log::debug!("built ball tree: n={n}, d={d}, leaf_size={leaf_size}, n_nodes={n_nodes}, leaves={leaf_count}");

    Ok(BuiltArrays { idx, centroids, info })
}
