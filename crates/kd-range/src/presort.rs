//! Presorted point orders used by the tree builders.
//!
//! Both builders keep two copies of the working set: one ordered by
//! `(x, y, id)` and one by `(y, x, id)`. Splitting a level takes a prefix of
//! the list matching the split axis and partitions the other list by id
//! membership, which preserves its order without sorting again.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{Axis, Point, PointId};

/// Total order along `axis`: the axis coordinate, then the other coordinate,
/// then the id.
pub(crate) fn cmp_along(axis: Axis, a: &Point, b: &Point) -> Ordering {
    a.coord(axis)
        .total_cmp(&b.coord(axis))
        .then_with(|| a.coord(axis.other()).total_cmp(&b.coord(axis.other())))
        .then_with(|| a.id().cmp(&b.id()))
}

/// A point set held in both axis orders.
#[derive(Debug, Clone)]
pub(crate) struct Presorted {
    by_x: Vec<Point>,
    by_y: Vec<Point>,
}

impl Presorted {
    /// Sorts `points` once per axis.
    pub(crate) fn new(points: Vec<Point>) -> Self {
        let mut by_x = points;
        let mut by_y = by_x.clone();
        by_x.sort_unstable_by(|a, b| cmp_along(Axis::X, a, b));
        by_y.sort_unstable_by(|a, b| cmp_along(Axis::Y, a, b));
        Self { by_x, by_y }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.by_x.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_x.is_empty()
    }

    /// The points in `axis` order.
    #[inline]
    pub(crate) fn sorted(&self, axis: Axis) -> &[Point] {
        match axis {
            Axis::X => &self.by_x,
            Axis::Y => &self.by_y,
        }
    }

    /// Consumes the set, returning its points in x order.
    pub(crate) fn into_points(self) -> Vec<Point> {
        self.by_x
    }

    /// Removes the element at `index` of the `axis` order and splits the rest
    /// into the elements before it and the elements after it.
    pub(crate) fn split_around(self, axis: Axis, index: usize) -> (Self, Point, Self) {
        let (mut primary, secondary) = self.take(axis);
        let mut after = primary.split_off(index);
        let pivot = after.remove(0);

        let before_ids: HashSet<PointId> = primary.iter().map(Point::id).collect();
        let (secondary_before, secondary_after): (Vec<_>, Vec<_>) = secondary
            .into_iter()
            .filter(|p| p.id() != pivot.id())
            .partition(|p| before_ids.contains(&p.id()));

        (
            Self::assemble(axis, primary, secondary_before),
            pivot,
            Self::assemble(axis, after, secondary_after),
        )
    }

    /// Splits into the first `count` elements of the `axis` order and the rest.
    pub(crate) fn split_at(self, axis: Axis, count: usize) -> (Self, Self) {
        let (mut primary, secondary) = self.take(axis);
        let after = primary.split_off(count);

        let before_ids: HashSet<PointId> = primary.iter().map(Point::id).collect();
        let (secondary_before, secondary_after): (Vec<_>, Vec<_>) = secondary
            .into_iter()
            .partition(|p| before_ids.contains(&p.id()));

        (
            Self::assemble(axis, primary, secondary_before),
            Self::assemble(axis, after, secondary_after),
        )
    }

    /// Returns `(axis order, other order)`.
    fn take(self, axis: Axis) -> (Vec<Point>, Vec<Point>) {
        match axis {
            Axis::X => (self.by_x, self.by_y),
            Axis::Y => (self.by_y, self.by_x),
        }
    }

    fn assemble(axis: Axis, primary: Vec<Point>, secondary: Vec<Point>) -> Self {
        debug_assert_eq!(primary.len(), secondary.len());
        match axis {
            Axis::X => Self {
                by_x: primary,
                by_y: secondary,
            },
            Axis::Y => Self {
                by_x: secondary,
                by_y: primary,
            },
        }
    }
}
