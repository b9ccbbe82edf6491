//! The public [`BallTree`] handle: a builder for construction, and the two
//! observable query operations (spec §6).

use crate::builder;
use crate::error::{BuildError, QueryError};
use crate::metric::Minkowski;
use crate::node::NodeInfo;
use crate::points::Points;
use crate::query::knn;
use crate::query::radius::{self, Mode as RadiusMode, RadiusResult};
use crate::query::stack::TraversalStack;

/// The result of a kNN query, shaped by the `return_distance` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum KnnResult {
    Indices(Vec<u32>),
    Distances { distances: Vec<f64>, indices: Vec<u32> },
}

/// A serializable snapshot of the parameters fixed at construction, as
/// described by spec §6's persisted state layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub n: usize,
    pub d: usize,
    pub leaf_size: usize,
    pub p: f64,
    pub n_nodes: usize,
}

/// Configures and constructs a [`BallTree`].
///
/// ```
/// use minkball::{BallTreeBuilder, Points};
///
/// let rows = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]];
/// let points = Points::from_rows(&rows).unwrap();
/// let tree = BallTreeBuilder::new(points).leaf_size(1).build().unwrap();
/// assert_eq!(tree.n(), 3);
/// ```
pub struct BallTreeBuilder<'a> {
    points: Points<'a>,
    leaf_size: usize,
    metric: Minkowski,
}

impl<'a> BallTreeBuilder<'a> {
    pub fn new(points: Points<'a>) -> Self {
        BallTreeBuilder {
            points,
            leaf_size: 20,
            metric: Minkowski::euclidean(),
        }
    }

    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    pub fn metric(mut self, metric: Minkowski) -> Self {
        self.metric = metric;
        self
    }

    /// Convenience for setting `p` directly; equivalent to
    /// `.metric(Minkowski::new(p)?)`.
    pub fn p(self, p: f64) -> Result<Self, BuildError> {
        let metric = Minkowski::new(p)?;
        Ok(self.metric(metric))
    }

    pub fn build(self) -> Result<BallTree<'a>, BuildError> {
        if self.leaf_size < 1 {
            return Err(BuildError::invalid_leaf_size(self.leaf_size));
        }
        let built = builder::build(&self.points, &self.metric, self.leaf_size)?;
        Ok(BallTree {
            n: self.points.n(),
            d: self.points.d(),
            points: self.points,
            leaf_size: self.leaf_size,
            metric: self.metric,
            idx: built.idx,
            centroids: built.centroids,
            info: built.info,
        })
    }
}

/// A static, array-backed ball tree over a fixed point set.
///
/// Immutable after construction: queries take `&self` and allocate their own
/// scratch buffers, so concurrent queries from multiple threads against the
/// same tree require no synchronization.
pub struct BallTree<'a> {
    points: Points<'a>,
    n: usize,
    d: usize,
    leaf_size: usize,
    metric: Minkowski,
    idx: Vec<u32>,
    centroids: Vec<f64>,
    info: Vec<NodeInfo>,
}

impl<'a> BallTree<'a> {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn metric(&self) -> Minkowski {
        self.metric
    }

    pub fn n_nodes(&self) -> usize {
        self.info.len()
    }

    fn check_shape(&self, query: &[f64]) -> Result<(), QueryError> {
        if query.len() != self.d {
            return Err(QueryError::ShapeMismatch { expected: self.d, got: query.len() });
        }
        Ok(())
    }

    /// Returns the `k` nearest neighbors of `query`.
    ///
    /// Errors if `query`'s length doesn't match the tree's dimensionality or
    /// if `k` is not in `1..=n`.
    pub fn knn_query(&self, query: &[f64], k: usize, return_distance: bool) -> Result<KnnResult, QueryError> {
        self.check_shape(query)?;
        if k == 0 || k > self.n {
            return Err(QueryError::KOutOfRange { k, n: self.n });
        }

        let mut stack = TraversalStack::with_capacity(self.n);
        let mut hits = knn::search(
            query,
            k,
            &self.points,
            &self.metric,
            &self.idx,
            &self.centroids,
            &self.info,
            self.d,
            &mut stack,
        );
        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        if return_distance {
            let (distances, indices) = hits.into_iter().unzip();
            Ok(KnnResult::Distances { distances, indices })
        } else {
            Ok(KnnResult::Indices(hits.into_iter().map(|(_, i)| i).collect()))
        }
    }

    /// Returns every point within radius `r` of `query`, shaped by
    /// `count_only` / `return_distance`.
    ///
    /// Errors if both `count_only` and `return_distance` are set, or if
    /// `query`'s length doesn't match the tree's dimensionality. `r` itself
    /// is not screened for being non-negative or finite, the same way
    /// non-finite coordinates propagate through IEEE-754 arithmetic rather
    /// than being trapped; callers are expected to pass `r >= 0`.
    pub fn radius_query(
        &self,
        query: &[f64],
        r: f64,
        return_distance: bool,
        count_only: bool,
    ) -> Result<RadiusResult, QueryError> {
        self.check_shape(query)?;
        if count_only && return_distance {
            return Err(QueryError::ConflictingOptions);
        }

        let mode = if count_only {
            RadiusMode::CountOnly
        } else if return_distance {
            RadiusMode::IndicesAndDistances
        } else {
            RadiusMode::IndicesOnly
        };

        Ok(radius::search(
            query,
            r,
            mode,
            &self.points,
            &self.metric,
            &self.idx,
            &self.centroids,
            &self.info,
            self.d,
        ))
    }

    /// Runs [`Self::knn_query`] over several query points, parallelizing
    /// across them with rayon. Per spec §5, the tree itself needs no
    /// synchronization for this; parallelism is purely the caller's choice.
    pub fn batch_knn_query(
        &self,
        queries: &[&[f64]],
        k: usize,
        return_distance: bool,
    ) -> Result<Vec<KnnResult>, QueryError> {
        use rayon::prelude::*;
        queries.par_iter().map(|&q| self.knn_query(q, k, return_distance)).collect()
    }

    /// Runs [`Self::radius_query`] over several query points with a shared
    /// radius, parallelizing across them with rayon.
    pub fn batch_radius_query(
        &self,
        queries: &[&[f64]],
        r: f64,
        return_distance: bool,
        count_only: bool,
    ) -> Result<Vec<RadiusResult>, QueryError> {
        use rayon::prelude::*;
        queries
            .par_iter()
            .map(|&q| self.radius_query(q, r, return_distance, count_only))
            .collect()
    }

    /// Disassembles the tree into its persisted-layout pieces: a header and
    /// the three backing arrays (spec §6). No file I/O lives here; this is
    /// the handoff point for an external persistence layer.
    pub fn into_raw_parts(self) -> (Header, Vec<u32>, Vec<f64>, Vec<NodeInfo>) {
        let header = Header {
            n: self.n,
            d: self.d,
            leaf_size: self.leaf_size,
            p: self.metric.p(),
            n_nodes: self.info.len(),
        };
        (header, self.idx, self.centroids, self.info)
    }

    /// Reassembles a tree from a header, the three backing arrays, and the
    /// point matrix they were built from. The caller is responsible for
    /// supplying arrays that were actually produced by [`Self::into_raw_parts`]
    /// (or an equivalent external serialization) for this exact point set;
    /// this does not re-run construction to re-verify the invariants.
    pub fn from_raw_parts(
        points: Points<'a>,
        header: Header,
        idx: Vec<u32>,
        centroids: Vec<f64>,
        info: Vec<NodeInfo>,
    ) -> Result<Self, BuildError> {
        if points.n() != header.n || points.d() != header.d {
            return Err(BuildError::InvalidShape { n: points.n(), d: points.d() });
        }
        let metric = Minkowski::new(header.p)?;
        Ok(BallTree {
            points,
            n: header.n,
            d: header.d,
            leaf_size: header.leaf_size,
            metric,
            idx,
            centroids,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::points::Points;

    use super::{BallTreeBuilder, KnnResult};

    #[test]
    fn knn_rejects_out_of_range_k() {
        let rows = vec![vec![0.0], vec![1.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points).build().unwrap();
        assert!(tree.knn_query(&[0.0], 0, false).is_err());
        assert!(tree.knn_query(&[0.0], 3, false).is_err());
    }

    #[test]
    fn knn_rejects_shape_mismatch() {
        let rows = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points).build().unwrap();
        assert!(tree.knn_query(&[0.0], 1, false).is_err());
    }

    #[test]
    fn radius_rejects_conflicting_options() {
        let rows = vec![vec![0.0], vec![1.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points).build().unwrap();
        assert!(tree.radius_query(&[0.0], 1.0, true, true).is_err());
    }

    #[test]
    fn radius_with_negative_r_yields_empty_result() {
        let rows = vec![vec![0.0], vec![1.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points).build().unwrap();
        match tree.radius_query(&[0.0], -1.0, false, false).unwrap() {
            crate::RadiusResult::Indices(indices) => assert!(indices.is_empty()),
            other => panic!("expected Indices variant, got {other:?}"),
        }
    }

    #[test]
    fn knn_returns_indices_only_when_not_requesting_distance() {
        let rows = vec![vec![0.0], vec![1.0], vec![2.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points).leaf_size(1).build().unwrap();
        match tree.knn_query(&[0.0], 1, false).unwrap() {
            KnnResult::Indices(indices) => assert_eq!(indices, vec![0]),
            KnnResult::Distances { .. } => panic!("expected Indices variant"),
        }
    }

    #[test]
    fn raw_parts_roundtrip() {
        let rows = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let points = Points::from_rows(&rows).unwrap();
        let tree = BallTreeBuilder::new(points.clone()).leaf_size(1).build().unwrap();
        let (header, idx, centroids, info) = tree.into_raw_parts();
        let rebuilt = super::BallTree::from_raw_parts(points, header, idx, centroids, info).unwrap();
        assert_eq!(rebuilt.n(), 4);
        assert_eq!(rebuilt.n_nodes(), header.n_nodes);
    }
}
