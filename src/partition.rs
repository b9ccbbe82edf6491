//! Centroid, widest-spread axis, and in-place median partitioning over an
//! index slice. These are the primitives the builder (`crate::builder`)
//! uses to carve the index permutation into node slices.

use crate::points::Points;

/// The arithmetic mean, over each coordinate, of the points named by
/// `idx_slice`. O(n * d).
pub fn centroid(points: &Points, idx_slice: &[u32]) -> Vec<f64> {
    let d = points.d();
    let mut sum = vec![0.0; d];
    for &i in idx_slice {
        let row = points.row(i as usize);
        sum.iter_mut().zip(row).for_each(|(s, &v)| *s += v);
    }
    let n = idx_slice.len() as f64;
    sum.iter_mut().for_each(|s| *s /= n);
    sum
}

/// The axis with the widest spread (max - min) over `idx_slice`. Ties break
/// toward the lower-index axis.
pub fn widest_spread_axis(points: &Points, idx_slice: &[u32]) -> usize {
    let d = points.d();
    let mut mins = vec![f64::INFINITY; d];
    let mut maxs = vec![f64::NEG_INFINITY; d];
    for &i in idx_slice {
        let row = points.row(i as usize);
        for (axis, &v) in row.iter().enumerate() {
            if v < mins[axis] {
                mins[axis] = v;
            }
            if v > maxs[axis] {
                maxs[axis] = v;
            }
        }
    }
    let mut best_axis = 0;
    let mut best_spread = f64::NEG_INFINITY;
    for axis in 0..d {
        let spread = maxs[axis] - mins[axis];
        if spread > best_spread {
            best_spread = spread;
            best_axis = axis;
        }
    }
    best_axis
}

/// Rearranges `idx_slice` in place via quickselect so that every index whose
/// coordinate on `axis` is in the lower half comes before the median
/// position `k = idx_slice.len() / 2`, and every index in the upper half
/// comes after it. Order within each half is unspecified. O(n) expected.
pub fn partition_at_median(points: &Points, idx_slice: &mut [u32], axis: usize) {
    let n = idx_slice.len();
    if n < 2 {
        return;
    }
    let k = n / 2;
    quickselect(points, idx_slice, axis, k);
}

fn key(points: &Points, i: u32, axis: usize) -> f64 {
    points.row(i as usize)[axis]
}

fn quickselect(points: &Points, slice: &mut [u32], axis: usize, k: usize) {
    let mut lo = 0;
    let mut hi = slice.len() - 1;
    loop {
        if lo == hi {
            return;
        }
        let pivot_index = lo + (hi - lo) / 2;
        let pivot_index = partition_around_pivot(points, &mut slice[lo..=hi], axis, pivot_index - lo) + lo;
        if k == pivot_index {
            return;
        } else if k < pivot_index {
            hi = pivot_index - 1;
        } else {
            lo = pivot_index + 1;
        }
    }
}

/// Lomuto partition scheme around `slice[pivot_index]`. Returns the final
/// resting position of the pivot.
fn partition_around_pivot(points: &Points, slice: &mut [u32], axis: usize, pivot_index: usize) -> usize {
    let last = slice.len() - 1;
    slice.swap(pivot_index, last);
    let pivot_key = key(points, slice[last], axis);

    let mut store = 0;
    for i in 0..last {
        if key(points, slice[i], axis) < pivot_key {
            slice.swap(i, store);
            store += 1;
        }
    }
    slice.swap(store, last);
    store
}
