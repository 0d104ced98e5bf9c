//! Point-storage k-d tree: construction, mutation and range queries.

use nalgebra::Point2;
use tracing::{debug, trace};

use crate::presort::Presorted;
use crate::{Axis, KdConfig, Point, PointId, Rect2D, Result};

use super::node::KdNode;
use super::segment::{SplitSegment, collect_segments};
use super::visitor::{CollectingVisitor, QueryVisitor};

/// A two-dimensional k-d tree storing one point per node.
///
/// # Construction
///
/// [`build`](KdTree::build) sorts the input once by `(x, y, id)` and once by
/// `(y, x, id)`, then splits every level at the exact median of the order
/// matching its axis. The other order is partitioned by id membership, so no
/// level sorts again. The result has logarithmic height.
///
/// ```
/// use kd_range::KdTree;
///
/// let tree = KdTree::build([[2.0, 3.0], [5.0, 4.0], [9.0, 6.0], [4.0, 7.0]]);
/// let found = tree.range_query(0.0, 6.0, 0.0, 5.0).unwrap();
/// assert_eq!(found.len(), 2);
/// ```
///
/// # Mutation
///
/// [`insert`](KdTree::insert) descends without rebalancing and
/// [`delete`](KdTree::delete) only marks a node as deleted. Both keep queries
/// exact, but depth and bounding boxes drift with churn.
/// [`rebuild`](KdTree::rebuild) restores a balanced tree over the live points.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    root: Option<KdNode>,
    config: KdConfig,
    next_id: u64,
    live: usize,
    tombstones: usize,
}

impl KdTree {
    /// Creates an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the given configuration.
    pub fn with_config(config: KdConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a balanced tree from a collection of positions.
    ///
    /// Points receive ids `0..n` in input order. Returns an empty tree if the
    /// input is empty.
    pub fn build<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2<f64>>,
    {
        Self::build_with(points, KdConfig::default())
    }

    /// Builds a balanced tree using the given configuration.
    pub fn build_with<I, P>(points: I, config: KdConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2<f64>>,
    {
        let points: Vec<Point> = points
            .into_iter()
            .zip(0u64..)
            .map(|(position, id)| Point::new(PointId(id), position.into()))
            .collect();
        let next_id = points.len() as u64;

        let mut tree = Self::with_config(config);
        tree.next_id = next_id;
        tree.replace_contents(points);
        debug!(points = tree.live, depth = tree.depth(), "built k-d tree");
        tree
    }

    /// Returns the configuration the tree was built with.
    #[inline]
    pub fn config(&self) -> &KdConfig {
        &self.config
    }

    /// Returns the boundary tolerance.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.config.eps()
    }

    /// Returns `true` if the tree holds no live points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of live points.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of deleted points still occupying nodes.
    #[inline]
    pub fn tombstone_count(&self) -> usize {
        self.tombstones
    }

    /// Number of nodes, tombstones included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.live + self.tombstones
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&KdNode> {
        self.root.as_ref()
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Bounding box of every stored point, tombstones included.
    pub fn bounds(&self) -> Option<Rect2D> {
        self.root.as_ref().map(|n| *n.bbox())
    }

    /// Inserts a point and returns its newly assigned id.
    ///
    /// The point descends from the root: strictly smaller coordinates on a
    /// node's axis go left, everything else (ties included) goes right. Every
    /// bounding box on the path grows to cover the point. No rebalancing is
    /// performed.
    pub fn insert(&mut self, position: impl Into<Point2<f64>>) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        let point = Point::new(id, position.into());

        if let Some(root) = self.root.as_mut() {
            insert_below(root, point, 0);
        } else {
            self.root = Some(KdNode::new(point, Axis::at_depth(0)));
        }
        self.live += 1;

        trace!(%id, x = point.x(), y = point.y(), "inserted point");
        id
    }

    /// Deletes one live point at exactly `position`.
    ///
    /// The node is only marked; it keeps its place and its bounding box until
    /// the next [`rebuild`](KdTree::rebuild). Returns `false`, changing
    /// nothing, if no live point sits at `position`. With coincident points
    /// each call removes one of them.
    pub fn delete(&mut self, position: impl Into<Point2<f64>>) -> bool {
        let target = position.into();
        let removed = self
            .root
            .as_mut()
            .is_some_and(|root| tombstone_at(root, &target));

        if removed {
            self.mark_removed();
        }
        trace!(x = target.x, y = target.y, removed, "delete by position");
        removed
    }

    /// Deletes the live point carrying `id`.
    ///
    /// Ids carry no location, so this visits every node in the worst case.
    pub fn delete_id(&mut self, id: PointId) -> bool {
        let removed = self
            .root
            .as_mut()
            .is_some_and(|root| tombstone_id(root, id));

        if removed {
            self.mark_removed();
        }
        trace!(%id, removed, "delete by id");
        removed
    }

    /// Discards every node and builds a balanced tree over the live points.
    ///
    /// Ids are preserved. This is the only operation that reclaims deleted
    /// nodes and shrinks bounding boxes.
    pub fn rebuild(&mut self) {
        let reclaimed = self.tombstones;
        let points = self.points();
        self.replace_contents(points);
        debug!(
            points = self.live,
            reclaimed,
            depth = self.depth(),
            "rebuilt k-d tree"
        );
    }

    /// Snapshot of every live point, in no particular order.
    pub fn points(&self) -> Vec<Point> {
        let mut result = Vec::with_capacity(self.live);
        collect_live(self.root.as_ref(), &mut result);
        result
    }

    /// Returns the live points inside `[x_min, x_max] x [y_min, y_max]`.
    ///
    /// Bounds are inclusive and widened by the tree's tolerance. Fails with
    /// [`KdError::InvalidRect`](crate::KdError::InvalidRect) if a lower bound
    /// exceeds its upper bound.
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

    /// Returns the live points inside `rect`.
    pub fn query(&self, rect: &Rect2D) -> Vec<Point> {
        let mut visitor = CollectingVisitor::new();
        self.query_with(rect, &mut visitor);
        visitor.into_points()
    }

    /// Runs a range query, reporting results and traversal events to `visitor`.
    ///
    /// Each node is handled in three steps:
    /// 1. a subtree whose bounding box misses the query is pruned,
    /// 2. the node's own point is reported if live and inside,
    /// 3. a child is only visited if the query reaches its side of the split.
    pub fn query_with<V: QueryVisitor>(&self, rect: &Rect2D, visitor: &mut V) {
        if let Some(ref root) = self.root {
            let window = rect.inflated(self.config.eps());
            query_node(root, &window, visitor);
        }
    }

    /// Split lines of every node, clipped to the region the node partitions.
    ///
    /// Regions start from the root's bounding box. Segments are listed in
    /// pre-order and tagged with their depth.
    pub fn split_segments(&self) -> Vec<SplitSegment> {
        let mut segments = Vec::with_capacity(self.node_count());
        if let Some(ref root) = self.root {
            collect_segments(root, *root.bbox(), 0, &mut segments);
        }
        segments
    }

    fn replace_contents(&mut self, points: Vec<Point>) {
        self.live = points.len();
        self.tombstones = 0;
        self.root = build_node(Presorted::new(points), 0);
    }

    fn mark_removed(&mut self) {
        self.live -= 1;
        self.tombstones += 1;
    }
}

impl<P: Into<Point2<f64>>> FromIterator<P> for KdTree {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Recursively builds a balanced subtree from a presorted set.
fn build_node(set: Presorted, depth: usize) -> Option<KdNode> {
    if set.is_empty() {
        return None;
    }

    let axis = Axis::at_depth(depth);
    let median = set.len() / 2;
    let (left, pivot, right) = set.split_around(axis, median);

    Some(KdNode::with_children(
        pivot,
        axis,
        build_node(left, depth + 1),
        build_node(right, depth + 1),
    ))
}

/// Adds `point` below `node`, which sits at `depth`.
fn insert_below(node: &mut KdNode, point: Point, depth: usize) {
    node.bbox_mut().expand_to(point.position());

    let slot = if point.coord(node.axis()) < node.split_value() {
        node.left_slot()
    } else {
        node.right_slot()
    };

    if let Some(child) = slot.as_deref_mut() {
        insert_below(child, point, depth + 1);
    } else {
        *slot = Some(Box::new(KdNode::new(point, Axis::at_depth(depth + 1))));
    }
}

/// Marks the first live node at exactly `target`.
///
/// Equal split coordinates can sit on either side, so a tie searches the
/// right subtree first and then the left one.
fn tombstone_at(node: &mut KdNode, target: &Point2<f64>) -> bool {
    if !node.bbox().contains(target) {
        return false;
    }
    if !node.is_deleted() && node.point().position() == target {
        return node.mark_deleted();
    }

    let coord = node.axis().of(target);
    let split = node.split_value();

    let found_right = coord >= split
        && node
            .right_slot()
            .as_deref_mut()
            .is_some_and(|n| tombstone_at(n, target));

    found_right
        || (coord <= split
            && node
                .left_slot()
                .as_deref_mut()
                .is_some_and(|n| tombstone_at(n, target)))
}

fn tombstone_id(node: &mut KdNode, id: PointId) -> bool {
    if node.point().id() == id {
        return node.mark_deleted();
    }
    node.left_slot()
        .as_deref_mut()
        .is_some_and(|n| tombstone_id(n, id))
        || node
            .right_slot()
            .as_deref_mut()
            .is_some_and(|n| tombstone_id(n, id))
}

/// Range search over a node subtree. `window` is already widened by eps.
fn query_node<V: QueryVisitor>(node: &KdNode, window: &Rect2D, visitor: &mut V) {
    if !node.bbox().intersects(window) {
        visitor.prune(node.bbox());
        return;
    }
    visitor.enter(node.bbox());

    if !node.is_deleted() {
        if window.contains(node.point().position()) {
            visitor.visit(node.point());
        } else {
            visitor.reject(node.point());
        }
    }

    let split = node.split_value();
    if window.min_on(node.axis()) <= split {
        if let Some(left) = node.left() {
            query_node(left, window, visitor);
        }
    }
    if window.max_on(node.axis()) >= split {
        if let Some(right) = node.right() {
            query_node(right, window, visitor);
        }
    }
}

/// Recursively collects all live points from a node subtree.
fn collect_live(node: Option<&KdNode>, result: &mut Vec<Point>) {
    if let Some(n) = node {
        if !n.is_deleted() {
            result.push(*n.point());
        }
        collect_live(n.left(), result);
        collect_live(n.right(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KdError;
    use crate::kd::visitor::QueryStats;

    const SAMPLE: [[f64; 2]; 6] = [
        [2.0, 3.0],
        [5.0, 4.0],
        [9.0, 6.0],
        [4.0, 7.0],
        [8.0, 1.0],
        [7.0, 2.0],
    ];

    fn coords(points: &[Point]) -> Vec<(f64, f64)> {
        let mut result: Vec<_> = points.iter().map(|p| (p.x(), p.y())).collect();
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result
    }

    /// Checks the split invariant and bbox soundness for every node.
    fn assert_invariants(node: &KdNode) {
        let split = node.split_value();
        let mut below = Vec::new();
        if let Some(left) = node.left() {
            collect_all(left, &mut below);
            for p in &below {
                assert!(p.coord(node.axis()) <= split, "left child above split");
            }
            assert_invariants(left);
        }
        let mut above = Vec::new();
        if let Some(right) = node.right() {
            collect_all(right, &mut above);
            for p in &above {
                assert!(p.coord(node.axis()) >= split, "right child below split");
            }
            assert_invariants(right);
        }
        assert!(node.bbox().contains(node.point().position()));
        for p in below.iter().chain(above.iter()) {
            assert!(node.bbox().contains(p.position()), "bbox misses {p:?}");
        }
    }

    fn collect_all(node: &KdNode, out: &mut Vec<Point>) {
        out.push(*node.point());
        if let Some(l) = node.left() {
            collect_all(l, out);
        }
        if let Some(r) = node.right() {
            collect_all(r, out);
        }
    }

    fn assert_axes_alternate(node: &KdNode, depth: usize) {
        assert_eq!(node.axis(), Axis::at_depth(depth));
        if let Some(l) = node.left() {
            assert_axes_alternate(l, depth + 1);
        }
        if let Some(r) = node.right() {
            assert_axes_alternate(r, depth + 1);
        }
    }

    #[test]
    fn empty_tree() {
        let tree = KdTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root().is_none());
        assert!(tree.bounds().is_none());
        assert!(tree.points().is_empty());
        assert!(tree.range_query(-1.0, 1.0, -1.0, 1.0).unwrap().is_empty());
        assert!(tree.split_segments().is_empty());
    }

    #[test]
    fn build_empty() {
        let tree = KdTree::build(Vec::<[f64; 2]>::new());
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn build_single_point() {
        let tree = KdTree::build([[1.0, 2.0]]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.axis(), Axis::X);
        assert_eq!(root.point().id(), PointId(0));
    }

    #[test]
    fn build_picks_median_pivots() {
        let tree = KdTree::build(SAMPLE);
        let root = tree.root().unwrap();

        // x order: 2, 4, 5, 7, 8, 9 -> index 3
        assert_eq!(root.point().position(), &Point2::new(7.0, 2.0));
        assert_eq!(root.axis(), Axis::X);

        // left set by y: (5,4) (2,3)... sorted y: 3, 4, 7 -> index 1
        let left = root.left().unwrap();
        assert_eq!(left.point().position(), &Point2::new(5.0, 4.0));
        assert_eq!(left.axis(), Axis::Y);

        // right set by y: (8,1), (9,6) -> index 1
        let right = root.right().unwrap();
        assert_eq!(right.point().position(), &Point2::new(9.0, 6.0));

        assert_eq!(tree.depth(), 3);
        assert_eq!(*root.bbox(), Rect2D::new(2.0, 9.0, 1.0, 7.0).unwrap());
    }

    #[test]
    fn build_is_balanced() {
        let points: Vec<[f64; 2]> = (0..1000)
            .map(|i| [(i * 37 % 1000) as f64, (i * 91 % 1000) as f64])
            .collect();
        let tree = KdTree::build(points);

        assert_eq!(tree.len(), 1000);
        // ceil(log2(1001)) = 10
        assert_eq!(tree.depth(), 10);
        assert_invariants(tree.root().unwrap());
        assert_axes_alternate(tree.root().unwrap(), 0);
    }

    #[test]
    fn build_is_deterministic_with_duplicates() {
        let points = [[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [0.0, 2.0], [1.0, 1.0]];
        let a = KdTree::build(points);
        let b = KdTree::build(points);

        let ids_a: Vec<_> = a.points().iter().map(Point::id).collect();
        let ids_b: Vec<_> = b.points().iter().map(Point::id).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(a.len(), 5);
        assert_invariants(a.root().unwrap());
    }

    #[test]
    fn range_query_scenario() {
        let tree = KdTree::build(SAMPLE);
        let found = tree.range_query(0.0, 8.0, 0.0, 5.0).unwrap();
        assert_eq!(
            coords(&found),
            vec![(2.0, 3.0), (5.0, 4.0), (7.0, 2.0), (8.0, 1.0)]
        );
    }

    #[test]
    fn delete_then_insert_scenario() {
        let mut tree = KdTree::build(SAMPLE);

        assert!(tree.delete([5.0, 4.0]));
        let found = tree.range_query(0.0, 8.0, 0.0, 5.0).unwrap();
        assert_eq!(coords(&found), vec![(2.0, 3.0), (7.0, 2.0), (8.0, 1.0)]);

        let id = tree.insert([1.0, 1.0]);
        assert_eq!(id, PointId(6));
        let found = tree.range_query(0.0, 8.0, 0.0, 5.0).unwrap();
        assert_eq!(
            coords(&found),
            vec![(1.0, 1.0), (2.0, 3.0), (7.0, 2.0), (8.0, 1.0)]
        );
    }

    #[test]
    fn range_query_rejects_inverted_rect() {
        let tree = KdTree::build(SAMPLE);
        assert!(matches!(
            tree.range_query(8.0, 0.0, 0.0, 5.0),
            Err(KdError::InvalidRect { .. })
        ));
        assert!(tree.range_query(0.0, 8.0, 5.0, 0.0).is_err());

        // Empty trees validate too.
        assert!(KdTree::new().range_query(1.0, 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn boundary_points_are_included() {
        let tree = KdTree::build(SAMPLE);
        let found = tree.range_query(2.0, 7.0, 2.0, 4.0).unwrap();
        assert_eq!(coords(&found), vec![(2.0, 3.0), (5.0, 4.0), (7.0, 2.0)]);

        let exact = tree.range_query(9.0, 9.0, 6.0, 6.0).unwrap();
        assert_eq!(coords(&exact), vec![(9.0, 6.0)]);
    }

    #[test]
    fn eps_widens_boundaries() {
        let config = KdConfig::new().with_eps(0.01).unwrap();
        let tree = KdTree::build_with(SAMPLE, config);
        assert_eq!(tree.eps(), 0.01);

        let found = tree.range_query(0.0, 6.995, 0.0, 2.005).unwrap();
        assert_eq!(coords(&found), vec![(7.0, 2.0)]);

        let exact = KdTree::build_with(SAMPLE, KdConfig::new().with_eps(0.0).unwrap());
        assert!(exact.range_query(0.0, 6.995, 0.0, 2.005).unwrap().is_empty());
    }

    #[test]
    fn delete_absent_is_noop() {
        let mut tree = KdTree::build(SAMPLE);
        assert!(!tree.delete([100.0, 100.0]));
        assert!(!tree.delete([5.0, 4.5]));
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.tombstone_count(), 0);
        assert!(!KdTree::new().delete([0.0, 0.0]));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut tree = KdTree::build(SAMPLE);
        assert!(tree.delete([9.0, 6.0]));
        let bounds = tree.bounds();
        assert!(!tree.delete([9.0, 6.0]));

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.tombstone_count(), 1);
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.bounds(), bounds);
    }

    #[test]
    fn delete_keeps_bbox_until_rebuild() {
        let mut tree = KdTree::build(SAMPLE);
        assert!(tree.delete([4.0, 7.0]));
        assert_eq!(tree.bounds(), Some(Rect2D::new(2.0, 9.0, 1.0, 7.0).unwrap()));

        tree.rebuild();
        assert_eq!(tree.bounds(), Some(Rect2D::new(2.0, 9.0, 1.0, 6.0).unwrap()));
        assert_eq!(tree.tombstone_count(), 0);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn delete_duplicates_one_at_a_time() {
        let mut tree = KdTree::build([[3.0, 3.0], [3.0, 3.0], [1.0, 5.0], [3.0, 3.0]]);
        for remaining in (0..3).rev() {
            assert!(tree.delete([3.0, 3.0]));
            let found = tree.range_query(3.0, 3.0, 3.0, 3.0).unwrap();
            assert_eq!(found.len(), remaining);
        }
        assert!(!tree.delete([3.0, 3.0]));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn delete_finds_inserted_ties_on_either_side() {
        // Build puts some equal x values left of the root, inserts put them right.
        let mut tree = KdTree::build([[5.0, 0.0], [5.0, 1.0], [5.0, 2.0], [5.0, 3.0]]);
        tree.insert([5.0, 1.0]);
        tree.insert([5.0, 2.5]);

        for y in [0.0, 1.0, 1.0, 2.0, 2.5, 3.0] {
            assert!(tree.delete([5.0, y]), "failed to delete (5, {y})");
        }
        assert!(tree.is_empty());
        assert_eq!(tree.tombstone_count(), 6);
    }

    #[test]
    fn delete_id_targets_one_duplicate() {
        let mut tree = KdTree::build([[1.0, 1.0], [1.0, 1.0]]);
        assert!(tree.delete_id(PointId(1)));
        assert!(!tree.delete_id(PointId(1)));
        assert!(!tree.delete_id(PointId(7)));

        let remaining = tree.points();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), PointId(0));
    }

    #[test]
    fn insert_into_empty_creates_root() {
        let mut tree = KdTree::new();
        let id = tree.insert([4.0, 4.0]);
        assert_eq!(id, PointId(0));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().unwrap().axis(), Axis::X);
        assert_eq!(tree.range_query(4.0, 4.0, 4.0, 4.0).unwrap().len(), 1);
    }

    #[test]
    fn insert_ties_go_right() {
        let mut tree = KdTree::build([[5.0, 5.0]]);
        tree.insert([5.0, 0.0]);
        tree.insert([4.9, 9.0]);

        let root = tree.root().unwrap();
        assert_eq!(root.right().unwrap().point().position(), &Point2::new(5.0, 0.0));
        assert_eq!(root.right().unwrap().axis(), Axis::Y);
        assert_eq!(root.left().unwrap().point().position(), &Point2::new(4.9, 9.0));
    }

    #[test]
    fn insert_expands_bboxes() {
        let mut tree = KdTree::build(SAMPLE);
        tree.insert([-3.0, 12.0]);
        tree.insert([20.0, -1.0]);

        assert_eq!(tree.bounds(), Some(Rect2D::new(-3.0, 20.0, -1.0, 12.0).unwrap()));
        assert_invariants(tree.root().unwrap());
        assert_axes_alternate(tree.root().unwrap(), 0);
    }

    #[test]
    fn skewed_inserts_degrade_until_rebuild() {
        let mut tree = KdTree::new();
        for i in 0..64 {
            tree.insert([i as f64, i as f64]);
        }
        assert_eq!(tree.depth(), 64);

        let before = tree.range_query(10.0, 20.0, 0.0, 100.0).unwrap();
        tree.rebuild();
        assert_eq!(tree.depth(), 7);
        assert_eq!(coords(&tree.range_query(10.0, 20.0, 0.0, 100.0).unwrap()), coords(&before));
        assert_invariants(tree.root().unwrap());
    }

    #[test]
    fn rebuild_preserves_ids_and_results() {
        let mut tree = KdTree::build(SAMPLE);
        tree.delete([8.0, 1.0]);
        let inserted = tree.insert([3.0, 3.0]);

        let mut before: Vec<_> = tree.points().iter().map(Point::id).collect();
        tree.rebuild();
        let mut after: Vec<_> = tree.points().iter().map(Point::id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(after.contains(&inserted));

        // Ids keep counting after a rebuild.
        assert_eq!(tree.insert([0.0, 0.0]), PointId(7));
    }

    #[test]
    fn rebuild_of_all_deleted_is_empty() {
        let mut tree = KdTree::build([[1.0, 2.0], [3.0, 4.0]]);
        tree.delete([1.0, 2.0]);
        tree.delete([3.0, 4.0]);
        tree.rebuild();
        assert!(tree.root().is_none());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn points_skips_tombstones() {
        let mut tree = KdTree::build(SAMPLE);
        tree.delete([2.0, 3.0]);
        let points = tree.points();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.position() != &Point2::new(2.0, 3.0)));
    }

    #[test]
    fn query_stats_show_pruning() {
        let tree = KdTree::build(SAMPLE);
        let mut stats = QueryStats::default();
        tree.query_with(&Rect2D::new(8.5, 9.5, 5.5, 6.5).unwrap(), &mut stats);

        assert_eq!(stats.reported, 1);
        assert!(stats.entered < tree.node_count());
    }

    #[test]
    fn whole_plane_query_returns_everything() {
        let tree = KdTree::build(SAMPLE);
        let all = tree.query(&Rect2D::everything());
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn collect_from_iterator() {
        let tree: KdTree = SAMPLE.iter().map(|&[x, y]| Point2::new(x, y)).collect();
        assert_eq!(tree.len(), 6);
    }
}
