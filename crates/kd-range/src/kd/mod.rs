//! Two-dimensional k-d trees for rectangle range queries.
//!
//! Two node representations are provided:
//!
//! - [`KdTree`]: one point per node with a per-node bounding box. Supports
//!   insertion, lazy deletion and rebuild. Queries prune by bounding box and
//!   by split axis.
//! - [`LeafKdTree`]: points only in leaves, internal nodes hold a split line.
//!   Immutable. Queries classify each subtree's implicit region as inside,
//!   outside or intersecting the query and report inside subtrees wholesale.
//!
//! # Example
//!
//! ```
//! use kd_range::{KdTree, LeafKdTree};
//!
//! let sample = [[2.0, 3.0], [5.0, 4.0], [9.0, 6.0], [4.0, 7.0], [8.0, 1.0], [7.0, 2.0]];
//! let mut tree = KdTree::build(sample);
//! assert_eq!(tree.range_query(0.0, 8.0, 0.0, 5.0).unwrap().len(), 4);
//!
//! tree.delete([5.0, 4.0]);
//! tree.insert([1.0, 1.0]);
//! assert_eq!(tree.range_query(0.0, 8.0, 0.0, 5.0).unwrap().len(), 4);
//!
//! // Snapshot the live points into the immutable representation.
//! let frozen = LeafKdTree::from_tree(&tree);
//! assert_eq!(frozen.range_query(0.0, 8.0, 0.0, 5.0).unwrap().len(), 4);
//! ```
//!
//! # Architecture
//!
//! - [`KdNode`]: point-storage node with axis, bounding box and deletion flag
//! - [`LeafNode`]: leaf-storage node, either a leaf or a split line
//! - [`QueryVisitor`]: visitor trait receiving results and traversal events

mod leaf;
mod node;
mod segment;
mod tree;
mod visitor;

pub use leaf::{LeafKdTree, LeafNode};
pub use node::KdNode;
pub use segment::SplitSegment;
pub use tree::KdTree;
pub use visitor::{CollectingVisitor, FnVisitor, QueryStats, QueryVisitor};
