//! Shared visualization utilities for the k-d tree demos.

use kd_range::{KdNode, KdTree, Point, QueryVisitor, Rect2D, SplitSegment};
use macroquad::prelude::*;
use nalgebra::Point2;
use tracing_subscriber::EnvFilter;

pub mod generators;
pub mod navigator;
pub use navigator::TreeNavigator;

/// Side length of the square world every demo draws in.
pub const WORLD_SIZE: f64 = 1000.0;

/// Installs a `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Maps world coordinates onto the window, keeping the aspect ratio and
/// flipping y so it grows upwards.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    world: Rect2D,
    margin: f32,
}

impl Viewport {
    /// Creates a viewport showing `world`, inset by `margin` pixels.
    pub fn new(world: Rect2D, margin: f32) -> Self {
        Self { world, margin }
    }

    /// The world rectangle shown.
    pub fn world(&self) -> Rect2D {
        self.world
    }

    fn scale(&self) -> f32 {
        let extent = self.world.extent();
        let usable_w = screen_width() - 2.0 * self.margin;
        let usable_h = screen_height() - 2.0 * self.margin;
        (usable_w / extent.x as f32).min(usable_h / extent.y as f32)
    }

    /// Converts a world position to screen pixels.
    pub fn to_screen(&self, p: &Point2<f64>) -> Vec2 {
        let s = self.scale();
        let min = self.world.min();
        vec2(
            self.margin + (p.x - min.x) as f32 * s,
            screen_height() - self.margin - (p.y - min.y) as f32 * s,
        )
    }

    /// Converts screen pixels to a world position.
    pub fn to_world(&self, v: Vec2) -> Point2<f64> {
        let s = self.scale();
        let min = self.world.min();
        Point2::new(
            min.x + ((v.x - self.margin) / s) as f64,
            min.y + ((screen_height() - self.margin - v.y) / s) as f64,
        )
    }

    /// Draws the outline of a world rectangle, clamping infinite bounds to
    /// the viewport.
    pub fn draw_rect(&self, rect: &Rect2D, thickness: f32, color: Color) {
        let clipped = clamp_to(rect, &self.world);
        let a = self.to_screen(&clipped.min());
        let b = self.to_screen(&clipped.max());
        draw_rectangle_lines(a.x, b.y, b.x - a.x, a.y - b.y, thickness, color);
    }

    /// Fills a world rectangle, clamping infinite bounds to the viewport.
    pub fn fill_rect(&self, rect: &Rect2D, color: Color) {
        let clipped = clamp_to(rect, &self.world);
        let a = self.to_screen(&clipped.min());
        let b = self.to_screen(&clipped.max());
        draw_rectangle(a.x, b.y, b.x - a.x, a.y - b.y, color);
    }

    /// Draws points as dots.
    pub fn draw_points<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Point>,
        radius: f32,
        color: Color,
    ) {
        for p in points {
            let v = self.to_screen(p.position());
            draw_circle(v.x, v.y, radius, color);
        }
    }

    /// Draws split lines, thinner and fainter with depth.
    pub fn draw_segments(&self, segments: &[SplitSegment]) {
        for segment in segments {
            let a = self.to_screen(&segment.start);
            let b = self.to_screen(&segment.end);
            let thickness = (3.0 - segment.depth as f32 * 0.4).max(1.0);
            draw_line(a.x, a.y, b.x, b.y, thickness, depth_color(segment.depth));
        }
    }
}

/// Color for split lines at `depth`.
pub fn depth_color(depth: usize) -> Color {
    let fade = (depth as f32 * 0.12).min(0.7);
    Color::new(0.9 - fade, 0.9 - fade, 0.95 - fade * 0.5, 1.0)
}

fn clamp_to(rect: &Rect2D, bounds: &Rect2D) -> Rect2D {
    let (min, max) = (rect.min(), rect.max());
    let (lo, hi) = (bounds.min(), bounds.max());
    Rect2D::new(
        min.x.clamp(lo.x, hi.x),
        max.x.clamp(lo.x, hi.x),
        min.y.clamp(lo.y, hi.y),
        max.y.clamp(lo.y, hi.y),
    )
    .unwrap_or(*bounds)
}

/// Finds the live point closest to `target` within `radius`.
pub fn nearest_point(tree: &KdTree, target: &Point2<f64>, radius: f64) -> Option<Point> {
    let window = Rect2D::new(
        target.x - radius,
        target.x + radius,
        target.y - radius,
        target.y + radius,
    )
    .ok()?;
    tree.query(&window).into_iter().min_by(|a, b| {
        let da = nalgebra::distance_squared(a.position(), target);
        let db = nalgebra::distance_squared(b.position(), target);
        da.total_cmp(&db)
    })
}

/// One step of a recorded range query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    Enter(Rect2D),
    Prune(Rect2D),
    Accept(Rect2D),
    Report(Point),
    Reject(Point),
}

/// Visitor that records every traversal event in order, for replay.
#[derive(Debug, Default)]
pub struct TraceVisitor {
    events: Vec<TraceEvent>,
}

impl TraceVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl QueryVisitor for TraceVisitor {
    fn visit(&mut self, point: &Point) {
        self.events.push(TraceEvent::Report(*point));
    }

    fn enter(&mut self, area: &Rect2D) {
        self.events.push(TraceEvent::Enter(*area));
    }

    fn prune(&mut self, area: &Rect2D) {
        self.events.push(TraceEvent::Prune(*area));
    }

    fn accept(&mut self, area: &Rect2D) {
        self.events.push(TraceEvent::Accept(*area));
    }

    fn reject(&mut self, point: &Point) {
        self.events.push(TraceEvent::Reject(*point));
    }
}

/// Draws the first `count` recorded events on top of the scene.
///
/// Reported points stay green and rejected points stay red; the most recent
/// area is outlined in orange.
pub fn draw_trace(viewport: &Viewport, events: &[TraceEvent], count: usize) {
    let shown = &events[..count.min(events.len())];
    for event in shown {
        match event {
            TraceEvent::Prune(area) => viewport.fill_rect(area, Color::from_rgba(80, 80, 160, 40)),
            TraceEvent::Accept(area) => viewport.fill_rect(area, Color::from_rgba(40, 160, 60, 50)),
            TraceEvent::Enter(_) => {}
            TraceEvent::Report(p) => viewport.draw_points([p], 4.0, GREEN),
            TraceEvent::Reject(p) => viewport.draw_points([p], 4.0, RED),
        }
    }
    if let Some(area) = shown.iter().rev().find_map(|e| match e {
        TraceEvent::Enter(a) | TraceEvent::Prune(a) | TraceEvent::Accept(a) => Some(a),
        _ => None,
    }) {
        viewport.draw_rect(area, 2.0, ORANGE);
    }
}

/// Outlines the bounding box of every node, tombstones drawn in gray.
pub fn draw_bboxes(viewport: &Viewport, node: &KdNode) {
    let color = if node.is_deleted() {
        Color::from_rgba(90, 90, 90, 120)
    } else {
        Color::from_rgba(70, 130, 180, 90)
    };
    viewport.draw_rect(node.bbox(), 1.0, color);
    for child in [node.left(), node.right()].into_iter().flatten() {
        draw_bboxes(viewport, child);
    }
}

/// Draws tombstoned points as hollow rings.
pub fn draw_tombstones(viewport: &Viewport, node: &KdNode) {
    if node.is_deleted() {
        let v = viewport.to_screen(node.point().position());
        draw_circle_lines(v.x, v.y, 3.0, 1.0, GRAY);
    }
    for child in [node.left(), node.right()].into_iter().flatten() {
        draw_tombstones(viewport, child);
    }
}
