//! Point and axis representation for k-d trees.

use std::fmt;

use nalgebra::Point2;

/// Stable identity of a point stored in a tree.
///
/// Ids are handed out once and never reused, so two points at the same
/// coordinates remain distinguishable. They also act as the final tie-break
/// when ordering points, which keeps construction deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in the plane together with its identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    id: PointId,
    position: Point2<f64>,
}

impl Point {
    /// Creates a new point.
    ///
    /// # Panics (debug builds only)
    /// Panics if either coordinate is NaN or infinite.
    pub fn new(id: PointId, position: Point2<f64>) -> Self {
        debug_assert!(
            position.x.is_finite() && position.y.is_finite(),
            "Point coordinates must be finite"
        );
        Self { id, position }
    }

    /// Returns the identity of the point.
    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Returns the coordinates of the point.
    #[inline]
    pub fn position(&self) -> &Point2<f64> {
        &self.position
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns the coordinate of the point along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> f64 {
        axis.of(&self.position)
    }
}

/// Splitting axis of a k-d tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Split on the x coordinate (vertical split line).
    X,
    /// Split on the y coordinate (horizontal split line).
    Y,
}

impl Axis {
    /// Axis used at the given depth: `X` at the root, alternating below it.
    #[inline]
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Axis::X } else { Axis::Y }
    }

    /// Returns the other axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Extracts the coordinate along this axis.
    #[inline]
    pub fn of(self, position: &Point2<f64>) -> f64 {
        match self {
            Axis::X => position.x,
            Axis::Y => position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_alternates_with_depth() {
        assert_eq!(Axis::at_depth(0), Axis::X);
        assert_eq!(Axis::at_depth(1), Axis::Y);
        assert_eq!(Axis::at_depth(2), Axis::X);
        assert_eq!(Axis::at_depth(7), Axis::Y);
    }

    #[test]
    fn axis_other() {
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.other(), Axis::X);
    }

    #[test]
    fn coord_follows_axis() {
        let p = Point::new(PointId(3), Point2::new(2.5, -1.0));
        assert_eq!(p.coord(Axis::X), 2.5);
        assert_eq!(p.coord(Axis::Y), -1.0);
        assert_eq!(p.x(), 2.5);
        assert_eq!(p.y(), -1.0);
        assert_eq!(p.id(), PointId(3));
    }

    #[test]
    fn coincident_points_differ_by_id() {
        let a = Point::new(PointId(0), Point2::new(1.0, 1.0));
        let b = Point::new(PointId(1), Point2::new(1.0, 1.0));
        assert_eq!(a.position(), b.position());
        assert_ne!(a, b);
    }

    #[test]
    fn id_display() {
        assert_eq!(PointId(42).to_string(), "#42");
    }
}
