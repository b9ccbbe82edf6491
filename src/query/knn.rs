//! Bounded-k priority-queue kNN search with best-first branch ordering
//! (spec §4.4.3).

use crate::metric::Minkowski;
use crate::node::{left_child, right_child, NodeInfo};
use crate::points::Points;

use super::buffer::NeighborBuffer;
use super::stack::TraversalStack;

/// A lower bound, in true-distance units, on the distance from `query` to
/// any point contained in a node with the given centroid and radius.
#[inline]
fn lower_bound_true(metric: &Minkowski, query: &[f64], centroid: &[f64], radius: f64) -> f64 {
    (metric.distance(query, centroid) - radius).max(0.0)
}

/// Returns the `k` nearest points to `query` as `(true_distance, index)`
/// pairs, not required to be sorted (callers may sort if they want order).
#[allow(clippy::too_many_arguments)]
pub fn search(
    query: &[f64],
    k: usize,
    points: &Points,
    metric: &Minkowski,
    idx: &[u32],
    centroids: &[f64],
    info: &[NodeInfo],
    d: usize,
    stack: &mut TraversalStack,
) -> Vec<(f64, u32)> {
    stack.clear();
    let mut buffer = NeighborBuffer::new(k);

    let root_centroid = &centroids[0..d];
    let root_lb = metric.to_reduced(lower_bound_true(metric, query, root_centroid, info[0].radius));
    stack.push(0, root_lb);

    while let Some((node_id, lb)) = stack.pop() {
        if lb >= buffer.worst() {
            continue;
        }

        let node_id = node_id as usize;
        let node = &info[node_id];
        if node.is_empty() {
            continue;
        }

        if node.is_leaf {
            for &j in &idx[node.idx_start as usize..node.idx_end as usize] {
                let delta = metric.reduced_distance(query, points.row(j as usize));
                buffer.insert(delta, j);
            }
        } else {
            let l = left_child(node_id);
            let r = right_child(node_id);

            let lb_left = metric.to_reduced(lower_bound_true(
                metric,
                query,
                &centroids[l * d..(l + 1) * d],
                info[l].radius,
            ));
            let lb_right = metric.to_reduced(lower_bound_true(
                metric,
                query,
                &centroids[r * d..(r + 1) * d],
                info[r].radius,
            ));

            // Push the farther child first so the nearer one is popped
            // (and explored) first; equal bounds favor the left child.
            if lb_left <= lb_right {
                stack.push(r as u32, lb_right);
                stack.push(l as u32, lb_left);
            } else {
                stack.push(l as u32, lb_left);
                stack.push(r as u32, lb_right);
            }
        }
    }

    buffer
        .into_sorted_vec()
        .into_iter()
        .map(|(rho, i)| (metric.to_true(rho), i))
        .collect()
}
