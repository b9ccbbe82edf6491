//! Post-construction structural invariants (spec §3, §8).

use rand::{Rng, SeedableRng};

use minkball::{BallTreeBuilder, Minkowski, Points};

#[test]
fn construction_invariants_hold_across_random_inputs() {
    for seed in 0..12u64 {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let n = rng.gen_range(1..120);
        let d = rng.gen_range(1..5);
        let leaf_size = rng.gen_range(1..25);

        let rows: Vec<Vec<f64>> = (0..n).map(|_| (0..d).map(|_| rng.gen_range(-50.0..50.0)).collect()).collect();
        let points = Points::from_rows(&rows).unwrap();
        let metric = Minkowski::euclidean();
        let tree = BallTreeBuilder::new(points).leaf_size(leaf_size).metric(metric).build().unwrap();

        let (header, idx, centroids, info) = tree.into_raw_parts();

        // idx is a permutation of 0..n
        let mut sorted = idx.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n as u32).collect::<Vec<_>>(), "seed {seed}");

        // every point lies within its node's radius (+ epsilon)
        for (i, node) in info.iter().enumerate() {
            if node.is_empty() {
                continue;
            }
            let c = &centroids[i * d..(i + 1) * d];
            for &j in &idx[node.idx_start as usize..node.idx_end as usize] {
                let dist = metric.distance(c, &rows[j as usize]);
                assert!(dist <= node.radius + 1e-7, "seed {seed} node {i} point {j}");
            }
        }

        // sibling slices partition the parent's slice, sizes differ by at most 1
        for i in 0..info.len() {
            if info[i].is_leaf {
                continue;
            }
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            assert_eq!(info[l].len() + info[r].len(), info[i].len(), "seed {seed}");
            assert!((info[l].len() as i64 - info[r].len() as i64).abs() <= 1, "seed {seed}");
            assert_eq!(info[l].idx_start, info[i].idx_start);
            assert_eq!(info[r].idx_end, info[i].idx_end);
            assert_eq!(info[l].idx_end, info[r].idx_start);
        }

        // every node at or past the first half is a leaf
        let half = (header.n_nodes.saturating_sub(1)) / 2;
        assert!(info[half..].iter().all(|node| node.is_leaf), "seed {seed}");

        assert_eq!(info[0].idx_start, 0);
        assert_eq!(info[0].idx_end, n as u32);
    }
}
