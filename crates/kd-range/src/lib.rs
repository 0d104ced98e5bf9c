//! 2D k-d tree range queries.
//!
//! Builds balanced k-d trees over points in the plane and answers
//! axis-aligned rectangle queries with inclusive, tolerance-widened bounds.
//! See [`kd`] for the two tree representations.

pub mod kd;
mod config;
mod error;
mod oracle;
mod point;
mod presort;
mod rect;


pub use config::{DEFAULT_EPS, KdConfig};
pub use error::{KdError, Result};
pub use kd::{
    CollectingVisitor, FnVisitor, KdNode, KdTree, LeafKdTree, LeafNode, QueryStats, QueryVisitor,
    SplitSegment,
};
pub use oracle::brute_force;
pub use point::{Axis, Point, PointId};
pub use rect::{Rect2D, RegionClass};
