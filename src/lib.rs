//! `minkball`: a static, array-backed ball tree for exact k-nearest-neighbor
//! and radius-neighbor queries over a fixed point set under a configurable
//! Minkowski p-metric.
//!
//! The tree is built once from a point matrix and is immutable afterward;
//! queries take `&self` and allocate their own scratch state, so the same
//! tree can be queried concurrently from multiple threads with no
//! synchronization. There is no dynamic insertion/deletion, no approximate
//! search, and no metric family beyond Minkowski p.
//!
//! ```
//! use minkball::{BallTreeBuilder, Minkowski, Points};
//!
//! let rows = vec![vec![0.0, 0.0], vec![3.0, 0.0], vec![0.0, 4.0], vec![3.0, 4.0]];
//! let points = Points::from_rows(&rows).unwrap();
//! let tree = BallTreeBuilder::new(points)
//!     .leaf_size(1)
//!     .metric(Minkowski::chebyshev())
//!     .build()
//!     .unwrap();
//!
//! let result = tree.knn_query(&[1.0, 1.0], 1, true).unwrap();
//! ```

mod builder;
mod error;
mod metric;
mod node;
mod partition;
mod points;
mod query;
mod tree;

pub use error::{BuildError, QueryError};
pub use metric::Minkowski;
pub use node::NodeInfo;
pub use points::Points;
pub use query::{RadiusMode, RadiusResult};
pub use tree::{BallTree, BallTreeBuilder, Header, KnnResult};
