//! Replays a range query step by step on either tree representation.

use kd_range::{Axis, KdTree, LeafKdTree, LeafNode, Rect2D, SplitSegment};
use kd_viz::generators::{self, Distribution};
use kd_viz::{TraceEvent, TraceVisitor, Viewport, WORLD_SIZE, draw_trace};
use macroquad::prelude::*;
use tracing::info;

/// Events revealed per second.
const STEP_RATE: f64 = 12.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Strategy {
    PointStorage,
    LeafStorage,
}

impl Strategy {
    fn label(self) -> &'static str {
        match self {
            Strategy::PointStorage => "point-storage (bbox + axis pruning)",
            Strategy::LeafStorage => "leaf-storage (region classification)",
        }
    }
}

/// Split lines of a leaf-storage tree, clipped to each node's region.
fn leaf_segments(node: &LeafNode, region: Rect2D, depth: usize, out: &mut Vec<SplitSegment>) {
    let LeafNode::Internal {
        axis,
        split_val,
        left,
        right,
    } = node
    else {
        return;
    };
    let (min, max) = (region.min(), region.max());
    let (start, end) = match axis {
        Axis::X => ([*split_val, min.y], [*split_val, max.y]),
        Axis::Y => ([min.x, *split_val], [max.x, *split_val]),
    };
    out.push(SplitSegment {
        start: start.into(),
        end: end.into(),
        axis: *axis,
        depth,
    });
    let (lower, upper) = region.split(*axis, *split_val);
    leaf_segments(left, lower, depth + 1, out);
    leaf_segments(right, upper, depth + 1, out);
}

fn record(
    strategy: Strategy,
    tree: &KdTree,
    leaf: &LeafKdTree,
    query: &Rect2D,
) -> Vec<TraceEvent> {
    let mut visitor = TraceVisitor::new();
    match strategy {
        Strategy::PointStorage => tree.query_with(query, &mut visitor),
        Strategy::LeafStorage => leaf.query_with(query, &mut visitor),
    }
    let events = visitor.into_events();
    info!(strategy = strategy.label(), events = events.len(), "recorded query");
    events
}

#[macroquad::main("K-d Tree Query Trace")]
async fn main() {
    kd_viz::init_logging();

    let viewport = Viewport::new(
        Rect2D::new(0.0, WORLD_SIZE, 0.0, WORLD_SIZE).unwrap_or_else(|_| Rect2D::everything()),
        20.0,
    );
    let world = viewport.world();

    let tree = KdTree::build(generators::generate(Distribution::Clusters, 250, 0.0, WORLD_SIZE));
    let leaf = LeafKdTree::from_tree(&tree);

    let point_segments = tree.split_segments();
    let mut leaf_lines = Vec::new();
    if let Some(root) = leaf.root() {
        leaf_segments(root, world, 0, &mut leaf_lines);
    }

    let mut query = Rect2D::new(250.0, 650.0, 300.0, 600.0).unwrap_or(world);
    let mut strategy = Strategy::PointStorage;
    let mut events = record(strategy, &tree, &leaf, &query);
    let mut started = get_time();

    loop {
        let mut rerun = false;
        if is_key_pressed(KeyCode::Tab) {
            strategy = match strategy {
                Strategy::PointStorage => Strategy::LeafStorage,
                Strategy::LeafStorage => Strategy::PointStorage,
            };
            rerun = true;
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            let center = viewport.to_world(Vec2::from(mouse_position()));
            let extent = query.extent() / 2.0;
            if let Ok(moved) = Rect2D::new(
                center.x - extent.x,
                center.x + extent.x,
                center.y - extent.y,
                center.y + extent.y,
            ) {
                query = moved;
                rerun = true;
            }
        }
        if rerun {
            events = record(strategy, &tree, &leaf, &query);
            started = get_time();
        }
        if is_key_pressed(KeyCode::Space) {
            started = get_time();
        }

        let shown = ((get_time() - started) * STEP_RATE) as usize;

        clear_background(Color::from_rgba(20, 20, 30, 255));
        viewport.draw_rect(&world, 1.0, DARKGRAY);
        match strategy {
            Strategy::PointStorage => viewport.draw_segments(&point_segments),
            Strategy::LeafStorage => viewport.draw_segments(&leaf_lines),
        }
        viewport.draw_points(&tree.points(), 3.0, SKYBLUE);
        draw_trace(&viewport, &events, shown);
        viewport.draw_rect(&query, 2.0, RED);

        let reported = events[..shown.min(events.len())]
            .iter()
            .filter(|e| matches!(e, TraceEvent::Report(_)))
            .count();
        draw_text(&format!("Strategy: {}", strategy.label()), 10.0, 25.0, 20.0, WHITE);
        draw_text(
            &format!("Step {}/{} | {} reported", shown.min(events.len()), events.len(), reported),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text("[Tab] switch | LMB move query | [Space] replay", 10.0, 65.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
