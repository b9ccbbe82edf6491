//! The query engine (C4): bounded-k kNN traversal and radius-neighbor
//! traversal, sharing the node table built by [`crate::builder`].

pub mod buffer;
pub mod knn;
pub mod radius;
pub mod stack;

pub use radius::{Mode as RadiusMode, RadiusResult};
