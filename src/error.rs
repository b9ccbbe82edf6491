//! Error types returned at the construction and query boundaries.
//!
//! Nothing past these boundaries returns a `Result`: once a `BallTree` is
//! built and a query's shape has been checked, the traversal itself cannot
//! fail.

/// Failures that can occur while building a [`crate::BallTree`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("point matrix has shape ({n}, {d}); both dimensions must be non-zero")]
    InvalidShape { n: usize, d: usize },

    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error(
        "node-count estimate ({estimated}) was insufficient for {n} points at leaf_size {leaf_size}; this is a bug in minkball, not in the caller's input"
    )]
    InternalOverflow {
        n: usize,
        leaf_size: usize,
        estimated: usize,
    },
}

impl BuildError {
    pub(crate) fn invalid_leaf_size(leaf_size: usize) -> Self {
        BuildError::InvalidParameter {
            message: format!("leaf_size must be >= 1, got {leaf_size}"),
        }
    }

    pub(crate) fn invalid_p(p: f64) -> Self {
        BuildError::InvalidParameter {
            message: format!("p must be >= 1 or +inf, got {p}"),
        }
    }
}

/// Failures that can occur while querying a [`crate::BallTree`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query point has {got} coordinates, tree was built over points with {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("k = {k} is out of range for a tree of {n} points (must satisfy 1 <= k <= n)")]
    KOutOfRange { k: usize, n: usize },

    #[error("count_only and return_distance cannot both be requested")]
    ConflictingOptions,
}
