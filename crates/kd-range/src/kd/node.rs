//! Point-storage k-d tree node.

use crate::{Axis, Point, Rect2D};

/// A node of a point-storage k-d tree.
///
/// Every node stores exactly one point and splits its subtree along `axis`
/// at that point's coordinate:
/// - `left`: points whose `axis` coordinate is less than or equal to the split value
/// - `right`: points whose `axis` coordinate is greater than or equal to the split value
///
/// Equal coordinates may appear on both sides. Bulk construction places them
/// by the presorted order; insertion always sends them right.
///
/// # Bounding box
///
/// `bbox` covers the node's own point and every point below it, including
/// tombstoned ones. Deleting never shrinks a box; only a rebuild does.
#[derive(Debug, Clone)]
pub struct KdNode {
    point: Point,
    axis: Axis,
    bbox: Rect2D,
    deleted: bool,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

impl KdNode {
    /// Creates a childless node whose bounding box is the point itself.
    pub fn new(point: Point, axis: Axis) -> Self {
        Self {
            bbox: Rect2D::from_point(point.position()),
            point,
            axis,
            deleted: false,
            left: None,
            right: None,
        }
    }

    /// Creates a node with the given subtrees and derives its bounding box.
    pub fn with_children(
        point: Point,
        axis: Axis,
        left: Option<KdNode>,
        right: Option<KdNode>,
    ) -> Self {
        let mut node = Self::new(point, axis);
        node.left = left.map(Box::new);
        node.right = right.map(Box::new);
        node.refresh_bbox();
        node
    }

    /// Returns the stored point.
    #[inline]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Returns the splitting axis.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The stored point's coordinate along the splitting axis.
    #[inline]
    pub fn split_value(&self) -> f64 {
        self.point.coord(self.axis)
    }

    /// Returns the bounding box of this subtree.
    #[inline]
    pub fn bbox(&self) -> &Rect2D {
        &self.bbox
    }

    /// Whether the stored point has been deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    #[inline]
    pub fn left(&self) -> Option<&KdNode> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&KdNode> {
        self.right.as_deref()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree, tombstones included.
    pub fn node_count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.node_count())
            + self.right.as_ref().map_or(0, |n| n.node_count())
    }

    /// Number of live points in this subtree.
    pub fn live_count(&self) -> usize {
        usize::from(!self.deleted)
            + self.left.as_ref().map_or(0, |n| n.live_count())
            + self.right.as_ref().map_or(0, |n| n.live_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let left_depth = self.left.as_ref().map_or(0, |n| n.depth());
        let right_depth = self.right.as_ref().map_or(0, |n| n.depth());
        1 + left_depth.max(right_depth)
    }

    /// Recomputes the bounding box from the own point and the children's boxes.
    pub(crate) fn refresh_bbox(&mut self) {
        let mut bbox = Rect2D::from_point(self.point.position());
        for child in [self.left.as_deref(), self.right.as_deref()].into_iter().flatten() {
            bbox = bbox.union(child.bbox());
        }
        self.bbox = bbox;
    }

    #[inline]
    pub(crate) fn bbox_mut(&mut self) -> &mut Rect2D {
        &mut self.bbox
    }

    /// Marks the point as deleted. Returns `false` if it already was.
    pub(crate) fn mark_deleted(&mut self) -> bool {
        !std::mem::replace(&mut self.deleted, true)
    }

    #[inline]
    pub(crate) fn left_slot(&mut self) -> &mut Option<Box<KdNode>> {
        &mut self.left
    }

    #[inline]
    pub(crate) fn right_slot(&mut self) -> &mut Option<Box<KdNode>> {
        &mut self.right
    }
}
