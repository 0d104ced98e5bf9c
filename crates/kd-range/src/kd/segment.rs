//! Split lines of a point-storage tree, for drawing.

use nalgebra::Point2;

use crate::{Axis, Rect2D};

use super::node::KdNode;

/// A node's split line, clipped to the region the node partitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    pub axis: Axis,
    pub depth: usize,
}

/// Appends the segments of `node`'s subtree in pre-order.
pub(crate) fn collect_segments(
    node: &KdNode,
    region: Rect2D,
    depth: usize,
    out: &mut Vec<SplitSegment>,
) {
    let split = node.split_value();
    let (min, max) = (region.min(), region.max());

    let (start, end) = match node.axis() {
        Axis::X => (Point2::new(split, min.y), Point2::new(split, max.y)),
        Axis::Y => (Point2::new(min.x, split), Point2::new(max.x, split)),
    };
    out.push(SplitSegment {
        start,
        end,
        axis: node.axis(),
        depth,
    });

    let (lower, upper) = region.split(node.axis(), split);
    if let Some(left) = node.left() {
        collect_segments(left, lower, depth + 1, out);
    }
    if let Some(right) = node.right() {
        collect_segments(right, upper, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use crate::KdTree;
    use crate::{Axis, Rect2D};
    use nalgebra::Point2;

    #[test]
    fn segments_are_clipped_to_regions() {
        let tree = KdTree::build([
            [2.0, 3.0],
            [5.0, 4.0],
            [9.0, 6.0],
            [4.0, 7.0],
            [8.0, 1.0],
            [7.0, 2.0],
        ]);
        let segments = tree.split_segments();
        assert_eq!(segments.len(), 6);

        // Root splits x = 7 across the full bounding box.
        assert_eq!(segments[0].axis, Axis::X);
        assert_eq!(segments[0].depth, 0);
        assert_eq!(segments[0].start, Point2::new(7.0, 1.0));
        assert_eq!(segments[0].end, Point2::new(7.0, 7.0));

        // Its left child splits y = 4 only left of x = 7.
        assert_eq!(segments[1].axis, Axis::Y);
        assert_eq!(segments[1].depth, 1);
        assert_eq!(segments[1].start, Point2::new(2.0, 4.0));
        assert_eq!(segments[1].end, Point2::new(7.0, 4.0));

        let bounds = tree.bounds().unwrap();
        for segment in &segments {
            assert!(bounds.contains(&segment.start));
            assert!(bounds.contains(&segment.end));
        }
        assert!(segments.iter().all(|s| s.depth < 3));
        assert_eq!(bounds, Rect2D::new(2.0, 9.0, 1.0, 7.0).unwrap());
    }
}
