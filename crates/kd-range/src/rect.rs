//! Axis-aligned rectangles: query windows, bounding boxes and node regions.

use nalgebra::{Point2, Vector2};

use crate::{Axis, KdError, Result};

/// How a node's region relates to a query rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionClass {
    /// The region lies entirely within the query rectangle.
    Inside,
    /// The region and the query rectangle do not overlap.
    Outside,
    /// The region is partially covered by the query rectangle.
    Intersects,
}

/// A closed axis-aligned rectangle `[min.x, max.x] x [min.y, max.y]`.
///
/// Bounds may be infinite, which is how the unbounded root region of a
/// leaf-storage tree is represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2D {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Rect2D {
    /// Creates a rectangle from its bounds.
    ///
    /// Fails with [`KdError::InvalidRect`] when a lower bound exceeds the
    /// matching upper bound or any bound is NaN. Bounds are never swapped.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        // `!(a <= b)` also catches NaN.
        if !(x_min <= x_max) || !(y_min <= y_max) {
            return Err(KdError::InvalidRect {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Self {
            min: Point2::new(x_min, y_min),
            max: Point2::new(x_max, y_max),
        })
    }

    /// The whole plane.
    pub fn everything() -> Self {
        Self {
            min: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: Point2::new(f64::INFINITY, f64::INFINITY),
        }
    }

    /// The degenerate rectangle covering a single position.
    pub fn from_point(position: &Point2<f64>) -> Self {
        Self {
            min: *position,
            max: *position,
        }
    }

    /// Returns the lower corner.
    #[inline]
    pub fn min(&self) -> Point2<f64> {
        self.min
    }

    /// Returns the upper corner.
    #[inline]
    pub fn max(&self) -> Point2<f64> {
        self.max
    }

    /// Lower bound along `axis`.
    #[inline]
    pub fn min_on(&self, axis: Axis) -> f64 {
        axis.of(&self.min)
    }

    /// Upper bound along `axis`.
    #[inline]
    pub fn max_on(&self, axis: Axis) -> f64 {
        axis.of(&self.max)
    }

    /// Returns `max - min`.
    pub fn extent(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Returns the rectangle grown by `eps` on every side.
    pub fn inflated(&self, eps: f64) -> Self {
        let margin = Vector2::new(eps, eps);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, position: &Point2<f64>) -> bool {
        self.min.x <= position.x
            && position.x <= self.max.x
            && self.min.y <= position.y
            && position.y <= self.max.y
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect2D) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Whether the two closed rectangles share at least one point.
    ///
    /// They are disjoint iff one rectangle's upper bound on some axis is
    /// strictly below the other's lower bound on that axis.
    pub fn intersects(&self, other: &Rect2D) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }

    /// Grows the rectangle so it covers `position`. Never shrinks.
    pub fn expand_to(&mut self, position: &Point2<f64>) {
        self.min.x = self.min.x.min(position.x);
        self.min.y = self.min.y.min(position.y);
        self.max.x = self.max.x.max(position.x);
        self.max.y = self.max.y.max(position.y);
    }

    /// Smallest rectangle covering both rectangles.
    pub fn union(&self, other: &Rect2D) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Splits the rectangle along `axis` at `value`.
    ///
    /// Returns `(lower, upper)`; both halves include the split line.
    pub fn split(&self, axis: Axis, value: f64) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        match axis {
            Axis::X => {
                lower.max.x = value;
                upper.min.x = value;
            }
            Axis::Y => {
                lower.max.y = value;
                upper.min.y = value;
            }
        }
        (lower, upper)
    }

    /// Classifies this rectangle, taken as a region, against `window`.
    pub fn classify(&self, window: &Rect2D) -> RegionClass {
        if window.contains_rect(self) {
            RegionClass::Inside
        } else if !window.intersects(self) {
            RegionClass::Outside
        } else {
            RegionClass::Intersects
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Rect2D {
        Rect2D::new(x_min, x_max, y_min, y_max).unwrap()
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(matches!(
            Rect2D::new(5.0, 1.0, 0.0, 1.0),
            Err(KdError::InvalidRect { .. })
        ));
        assert!(Rect2D::new(0.0, 1.0, 3.0, 2.0).is_err());
    }

    #[test]
    fn new_rejects_nan() {
        assert!(Rect2D::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(Rect2D::new(0.0, 1.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn new_accepts_degenerate_and_infinite() {
        assert!(Rect2D::new(1.0, 1.0, 2.0, 2.0).is_ok());
        assert!(Rect2D::new(f64::NEG_INFINITY, f64::INFINITY, 0.0, 0.0).is_ok());
    }

    #[test]
    fn contains_is_inclusive() {
        let r = rect(0.0, 8.0, 0.0, 5.0);
        assert!(r.contains(&Point2::new(0.0, 0.0)));
        assert!(r.contains(&Point2::new(8.0, 5.0)));
        assert!(r.contains(&Point2::new(4.0, 2.5)));
        assert!(!r.contains(&Point2::new(8.000001, 2.0)));
        assert!(!r.contains(&Point2::new(4.0, -0.1)));
    }

    #[test]
    fn inflated_admits_near_boundary() {
        let r = rect(0.0, 1.0, 0.0, 1.0).inflated(0.01);
        assert!(r.contains(&Point2::new(1.005, -0.005)));
        assert!(!r.contains(&Point2::new(1.02, 0.5)));
    }

    #[test]
    fn touching_rectangles_intersect() {
        let a = rect(0.0, 1.0, 0.0, 1.0);
        let b = rect(1.0, 2.0, 1.0, 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = rect(1.5, 2.0, 0.0, 1.0);
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn expand_to_grows_only() {
        let mut r = Rect2D::from_point(&Point2::new(1.0, 1.0));
        r.expand_to(&Point2::new(3.0, -2.0));
        r.expand_to(&Point2::new(2.0, 0.0));
        assert_eq!(r, rect(1.0, 3.0, -2.0, 1.0));
    }

    #[test]
    fn union_covers_both() {
        let a = rect(0.0, 1.0, 0.0, 1.0);
        let b = rect(-1.0, 0.5, 2.0, 3.0);
        assert_eq!(a.union(&b), rect(-1.0, 1.0, 0.0, 3.0));
    }

    #[test]
    fn split_shares_the_line() {
        let (lower, upper) = rect(0.0, 10.0, 0.0, 4.0).split(Axis::X, 3.0);
        assert_eq!(lower, rect(0.0, 3.0, 0.0, 4.0));
        assert_eq!(upper, rect(3.0, 10.0, 0.0, 4.0));

        let (lower, upper) = Rect2D::everything().split(Axis::Y, 1.0);
        assert_eq!(lower.max_on(Axis::Y), 1.0);
        assert_eq!(lower.min_on(Axis::Y), f64::NEG_INFINITY);
        assert_eq!(upper.min_on(Axis::Y), 1.0);
        assert_eq!(upper.max_on(Axis::X), f64::INFINITY);
    }

    #[test]
    fn classify_regions() {
        let window = rect(0.0, 10.0, 0.0, 10.0);
        assert_eq!(rect(1.0, 2.0, 1.0, 2.0).classify(&window), RegionClass::Inside);
        assert_eq!(window.classify(&window), RegionClass::Inside);
        assert_eq!(rect(11.0, 12.0, 1.0, 2.0).classify(&window), RegionClass::Outside);
        assert_eq!(rect(5.0, 15.0, 1.0, 2.0).classify(&window), RegionClass::Intersects);
        assert_eq!(
            Rect2D::everything().classify(&window),
            RegionClass::Intersects
        );
    }

    #[test]
    fn extent_is_size() {
        let e = rect(1.0, 4.0, 2.0, 7.0).extent();
        assert_eq!(e, Vector2::new(3.0, 5.0));
    }
}
