//! Leaf-storage k-d tree searched by region classification.
//!
//! Internal nodes hold only a split line; points live in the leaves. Nothing
//! is stored per node beyond that, so the region a node covers is rebuilt on
//! the way down from the unbounded root region. Comparing that region with
//! the query decides whether a subtree is reported wholesale, skipped, or
//! searched further.

use nalgebra::Point2;
use tracing::debug;

use crate::presort::Presorted;
use crate::{Axis, KdConfig, Point, PointId, Rect2D, RegionClass, Result};

use super::tree::KdTree;
use super::visitor::{CollectingVisitor, QueryVisitor};

/// A node of a leaf-storage k-d tree.
///
/// # Split convention
///
/// The left subtree of an internal node covers coordinates up to and
/// including `split_val`; the right subtree covers coordinates strictly
/// greater than it. The builder guarantees this even for duplicate
/// coordinates, which lets the search skip a right subtree whenever the
/// query ends on the split line.
#[derive(Debug, Clone)]
pub enum LeafNode {
    /// One point, or several points at exactly the same position.
    Leaf { points: Vec<Point> },
    Internal {
        axis: Axis,
        split_val: f64,
        left: Box<LeafNode>,
        right: Box<LeafNode>,
    },
}

impl LeafNode {
    /// Checks if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, LeafNode::Leaf { .. })
    }

    /// Number of points in this subtree.
    pub fn point_count(&self) -> usize {
        match self {
            LeafNode::Leaf { points } => points.len(),
            LeafNode::Internal { left, right, .. } => left.point_count() + right.point_count(),
        }
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        match self {
            LeafNode::Leaf { .. } => 1,
            LeafNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A two-dimensional k-d tree storing points only in its leaves.
///
/// This representation has no incremental mutation. Build a new tree when the
/// point set changes, for example with [`LeafKdTree::from_tree`].
#[derive(Debug, Clone, Default)]
pub struct LeafKdTree {
    root: Option<LeafNode>,
    config: KdConfig,
    len: usize,
}

impl LeafKdTree {
    /// Builds a tree from a collection of positions, with ids `0..n`.
    pub fn build<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2<f64>>,
    {
        Self::build_with(points, KdConfig::default())
    }

    /// Builds a tree using the given configuration.
    pub fn build_with<I, P>(points: I, config: KdConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2<f64>>,
    {
        let points = points
            .into_iter()
            .zip(0u64..)
            .map(|(position, id)| Point::new(PointId(id), position.into()))
            .collect();
        Self::from_points(points, config)
    }

    /// Builds a tree over the live points of `tree`, keeping their ids and
    /// the tree's configuration.
    pub fn from_tree(tree: &KdTree) -> Self {
        Self::from_points(tree.points(), *tree.config())
    }

    fn from_points(points: Vec<Point>, config: KdConfig) -> Self {
        let len = points.len();
        let root = build_node(Presorted::new(points), 0);
        let tree = Self { root, config, len };
        debug!(points = len, depth = tree.depth(), "built leaf k-d tree");
        tree
    }

    /// Returns `true` if the tree contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the boundary tolerance.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.config.eps()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&LeafNode> {
        self.root.as_ref()
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Every stored point, in no particular order.
    pub fn points(&self) -> Vec<Point> {
        let mut visitor = CollectingVisitor::new();
        if let Some(ref root) = self.root {
            report_subtree(root, &mut visitor);
        }
        visitor.into_points()
    }

    /// Returns the points inside `[x_min, x_max] x [y_min, y_max]`.
    ///
    /// Fails with [`KdError::InvalidRect`](crate::KdError::InvalidRect) if a
    /// lower bound exceeds its upper bound. See [`query`](LeafKdTree::query)
    /// for how the tolerance applies.
    pub fn range_query(
        &self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Vec<Point>> {
        let rect = Rect2D::new(x_min, x_max, y_min, y_max)?;
        Ok(self.query(&rect))
    }

    /// Returns the points inside `rect`.
    ///
    /// Bounds are inclusive and widened by `eps`, with one exception: a
    /// right subtree is skipped whenever the query's upper bound on the
    /// split axis is at most `split_val + eps`. A point lying in
    /// `(split_val, split_val + eps]` past a split line is then not
    /// reported, although [`KdTree::query`] would report it. With a small
    /// tolerance relative to the point spacing both trees agree.
    pub fn query(&self, rect: &Rect2D) -> Vec<Point> {
        let mut visitor = CollectingVisitor::new();
        self.query_with(rect, &mut visitor);
        visitor.into_points()
    }

    /// Runs a range query, reporting results and traversal events to `visitor`.
    pub fn query_with<V: QueryVisitor>(&self, rect: &Rect2D, visitor: &mut V) {
        if let Some(ref root) = self.root {
            let search = Search {
                query: rect,
                window: rect.inflated(self.config.eps()),
                eps: self.config.eps(),
            };
            search.descend(root, Rect2D::everything(), visitor);
        }
    }
}

/// Recursively builds a subtree honoring the closed-left/open-right split.
fn build_node(set: Presorted, depth: usize) -> Option<LeafNode> {
    if set.is_empty() {
        return None;
    }
    if set.len() == 1 {
        return Some(LeafNode::Leaf {
            points: set.into_points(),
        });
    }

    let preferred = Axis::at_depth(depth);
    let Some((axis, count)) = [preferred, preferred.other()]
        .into_iter()
        .find_map(|axis| split_count(set.sorted(axis), axis).map(|count| (axis, count)))
    else {
        // Both axes are constant: every point is at the same position.
        return Some(LeafNode::Leaf {
            points: set.into_points(),
        });
    };

    let split_val = set.sorted(axis)[count - 1].coord(axis);
    let (lower, upper) = set.split_at(axis, count);

    match (build_node(lower, depth + 1), build_node(upper, depth + 1)) {
        (Some(left), Some(right)) => Some(LeafNode::Internal {
            axis,
            split_val,
            left: Box::new(left),
            right: Box::new(right),
        }),
        // `split_count` never returns 0 or the full length.
        (left, right) => left.or(right),
    }
}

/// Number of leading points of `sorted` that go into the left subtree.
///
/// Starts from the lower median and moves the cut so it never falls inside a
/// run of equal coordinates: first past the end of the median's run, or,
/// if that run reaches the end, before its start. Returns `None` when every
/// point shares the same coordinate.
fn split_count(sorted: &[Point], axis: Axis) -> Option<usize> {
    let n = sorted.len();
    let mid = (n - 1) / 2;
    let value = sorted[mid].coord(axis);

    let run_end = mid + sorted[mid..].iter().take_while(|p| p.coord(axis) == value).count();
    if run_end < n {
        return Some(run_end);
    }

    let run_start = sorted[..mid]
        .iter()
        .rposition(|p| p.coord(axis) != value)
        .map_or(0, |i| i + 1);
    (run_start > 0).then_some(run_start)
}

/// State shared by one region-classified search.
struct Search<'a> {
    query: &'a Rect2D,
    /// `query` widened by `eps`.
    window: Rect2D,
    eps: f64,
}

impl Search<'_> {
    fn descend<V: QueryVisitor>(&self, node: &LeafNode, region: Rect2D, visitor: &mut V) {
        match node {
            LeafNode::Leaf { points } => {
                for point in points {
                    if self.window.contains(point.position()) {
                        visitor.visit(point);
                    } else {
                        visitor.reject(point);
                    }
                }
            }
            LeafNode::Internal {
                axis,
                split_val,
                left,
                right,
            } => {
                let (left_region, right_region) = region.split(*axis, *split_val);

                let left_class = left_region.classify(&self.window);
                self.follow(left, left_region, left_class, visitor);

                // The right region is open at the split line and the builder
                // keeps equal coordinates on the left, so a query ending on
                // the line cannot reach anything to the right.
                let mut right_class = right_region.classify(&self.window);
                if right_class == RegionClass::Intersects
                    && self.query.max_on(*axis) <= *split_val + self.eps
                {
                    right_class = RegionClass::Outside;
                }
                self.follow(right, right_region, right_class, visitor);
            }
        }
    }

    fn follow<V: QueryVisitor>(
        &self,
        child: &LeafNode,
        region: Rect2D,
        class: RegionClass,
        visitor: &mut V,
    ) {
        match class {
            RegionClass::Inside => {
                visitor.accept(&region);
                report_subtree(child, visitor);
            }
            RegionClass::Outside => visitor.prune(&region),
            RegionClass::Intersects => {
                visitor.enter(&region);
                self.descend(child, region, visitor);
            }
        }
    }
}

/// Reports every point below `node` without checking coordinates.
fn report_subtree<V: QueryVisitor>(node: &LeafNode, visitor: &mut V) {
    match node {
        LeafNode::Leaf { points } => points.iter().for_each(|p| visitor.visit(p)),
        LeafNode::Internal { left, right, .. } => {
            report_subtree(left, visitor);
            report_subtree(right, visitor);
        }
    }
}
