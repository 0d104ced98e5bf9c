//! Visitor pattern for range query traversal.
//!
//! Visitors receive the reported points of a range query and, optionally,
//! the traversal events around them. This keeps the search logic independent
//! of what the caller does with the results: collect them, count them, or
//! animate the traversal.

use crate::{Point, Rect2D};

/// Visitor for processing points during a range query.
///
/// Only [`visit`](QueryVisitor::visit) is required. The remaining callbacks
/// describe how the search moved through the tree and default to no-ops.
/// The area passed to them is a node's bounding box for [`KdTree`] and a
/// node's implicit region for [`LeafKdTree`].
///
/// [`KdTree`]: crate::KdTree
/// [`LeafKdTree`]: crate::LeafKdTree
pub trait QueryVisitor {
    /// Called for each point inside the query rectangle.
    fn visit(&mut self, point: &Point);

    /// Called when the search descends into a node covering `area`.
    fn enter(&mut self, _area: &Rect2D) {}

    /// Called when a subtree covering `area` is skipped without descending.
    fn prune(&mut self, _area: &Rect2D) {}

    /// Called when a subtree's region lies inside the query and every point
    /// below it is reported without further checks.
    fn accept(&mut self, _area: &Rect2D) {}

    /// Called for each live point that was examined and lies outside the query.
    fn reject(&mut self, _point: &Point) {}
}

/// A simple visitor that collects all reported points.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Point>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected points.
    pub fn into_points(self) -> Vec<Point> {
        self.collected
    }

    /// Returns a reference to the collected points.
    pub fn points(&self) -> &[Point] {
        &self.collected
    }
}

impl QueryVisitor for CollectingVisitor {
    fn visit(&mut self, point: &Point) {
        self.collected.push(*point);
    }
}

/// A visitor that calls a closure for each reported point.
pub struct FnVisitor<F>
where
    F: FnMut(&Point),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&Point),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> QueryVisitor for FnVisitor<F>
where
    F: FnMut(&Point),
{
    fn visit(&mut self, point: &Point) {
        (self.func)(point);
    }
}

/// Counts traversal events; useful for measuring how much a query pruned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    pub reported: usize,
    pub rejected: usize,
    pub entered: usize,
    pub pruned: usize,
    pub accepted: usize,
}

impl QueryVisitor for QueryStats {
    fn visit(&mut self, _point: &Point) {
        self.reported += 1;
    }

    fn enter(&mut self, _area: &Rect2D) {
        self.entered += 1;
    }

    fn prune(&mut self, _area: &Rect2D) {
        self.pruned += 1;
    }

    fn accept(&mut self, _area: &Rect2D) {
        self.accepted += 1;
    }

    fn reject(&mut self, _point: &Point) {
        self.rejected += 1;
    }
}
