//! Radius-neighbor search with subtree containment pruning (spec §4.4.4):
//! all-out pruning, all-in bulk admission, leaf partial scans, and internal
//! partial descent, in one of three output shapes.

use crate::metric::Minkowski;
use crate::node::{left_child, right_child, NodeInfo};
use crate::points::Points;

/// What a radius query should collect as it admits points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CountOnly,
    IndicesOnly,
    IndicesAndDistances,
}

/// The result of a single radius query, shaped per [`Mode`].
#[derive(Debug, Clone, PartialEq)]
pub enum RadiusResult {
    Count(usize),
    Indices(Vec<u32>),
    IndicesAndDistances(Vec<u32>, Vec<f64>),
}

#[allow(clippy::too_many_arguments)]
pub fn search(
    query: &[f64],
    r: f64,
    mode: Mode,
    points: &Points,
    metric: &Minkowski,
    idx: &[u32],
    centroids: &[f64],
    info: &[NodeInfo],
    d: usize,
) -> RadiusResult {
    let rho_r = metric.to_reduced(r);

    let mut count = 0usize;
    let mut out_indices = Vec::new();
    let mut out_distances = Vec::new();

    let mut stack = vec![0u32];
    while let Some(node_id) = stack.pop() {
        let node_id = node_id as usize;
        let node = &info[node_id];
        if node.is_empty() {
            continue;
        }

        let centroid = &centroids[node_id * d..(node_id + 1) * d];
        let delta_c = metric.distance(query, centroid);

        if delta_c - node.radius > r {
            // all-out: the whole node lies outside the query ball.
            continue;
        }

        let slice = &idx[node.idx_start as usize..node.idx_end as usize];

        if delta_c + node.radius < r {
            // all-in: every point in the subtree qualifies.
            admit_all(slice, points, query, metric, mode, &mut count, &mut out_indices, &mut out_distances);
            continue;
        }

        if node.is_leaf {
            for &j in slice {
                let rho = metric.reduced_distance(query, points.row(j as usize));
                if rho <= rho_r {
                    admit_one(j, metric.to_true(rho), mode, &mut count, &mut out_indices, &mut out_distances);
                }
            }
        } else {
            stack.push(left_child(node_id) as u32);
            stack.push(right_child(node_id) as u32);
        }
    }

    match mode {
        Mode::CountOnly => RadiusResult::Count(count),
        Mode::IndicesOnly => RadiusResult::Indices(out_indices),
        Mode::IndicesAndDistances => RadiusResult::IndicesAndDistances(out_indices, out_distances),
    }
}

#[allow(clippy::too_many_arguments)]
fn admit_all(
    slice: &[u32],
    points: &Points,
    query: &[f64],
    metric: &Minkowski,
    mode: Mode,
    count: &mut usize,
    out_indices: &mut Vec<u32>,
    out_distances: &mut Vec<f64>,
) {
    match mode {
        Mode::CountOnly => *count += slice.len(),
        Mode::IndicesOnly => out_indices.extend_from_slice(slice),
        Mode::IndicesAndDistances => {
            out_indices.extend_from_slice(slice);
            out_distances.extend(slice.iter().map(|&j| metric.distance(query, points.row(j as usize))));
        }
    }
}

fn admit_one(
    j: u32,
    true_distance: f64,
    mode: Mode,
    count: &mut usize,
    out_indices: &mut Vec<u32>,
    out_distances: &mut Vec<f64>,
) {
    match mode {
        Mode::CountOnly => *count += 1,
        Mode::IndicesOnly => out_indices.push(j),
        Mode::IndicesAndDistances => {
            out_indices.push(j);
            out_distances.push(true_distance);
        }
    }
}
