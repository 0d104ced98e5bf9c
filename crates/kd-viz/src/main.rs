use kd_range::{KdTree, QueryStats, Rect2D};
use kd_viz::generators::{self, Distribution};
use kd_viz::{TreeNavigator, Viewport, WORLD_SIZE, draw_bboxes, draw_tombstones, nearest_point};
use macroquad::prelude::*;
use tracing::info;

const POINT_COUNT: usize = 300;

fn build_tree(distribution: Distribution) -> KdTree {
    let tree = KdTree::build(generators::generate(distribution, POINT_COUNT, 0.0, WORLD_SIZE));
    info!(
        distribution = distribution.name(),
        points = tree.len(),
        depth = tree.depth(),
        "generated tree"
    );
    tree
}

#[macroquad::main("K-d Tree Editor")]
async fn main() {
    kd_viz::init_logging();

    let world = Rect2D::new(0.0, WORLD_SIZE, 0.0, WORLD_SIZE)
        .unwrap_or_else(|_| Rect2D::everything());
    let viewport = Viewport::new(world, 20.0);

    let mut distribution = Distribution::Uniform;
    let mut tree = build_tree(distribution);
    let mut navigator = TreeNavigator::new();
    let mut query: Option<Rect2D> = None;
    let mut drag_start: Option<Vec2> = None;
    let mut show_bboxes = false;

    loop {
        if navigator.update(&tree) {
            if let Some(node) = navigator.current_node(&tree) {
                info!(id = %node.point().id(), depth = navigator.depth(), "navigated");
            }
        }

        let distribution_keys = [
            KeyCode::Key1,
            KeyCode::Key2,
            KeyCode::Key3,
            KeyCode::Key4,
            KeyCode::Key5,
            KeyCode::Key6,
            KeyCode::Key7,
        ];
        for (key, dist) in distribution_keys.into_iter().zip(Distribution::ALL) {
            if is_key_pressed(key) {
                distribution = dist;
                tree = build_tree(distribution);
                navigator.go_root();
            }
        }
        if is_key_pressed(KeyCode::R) {
            let reclaimed = tree.tombstone_count();
            tree.rebuild();
            navigator.clamp(&tree);
            info!(reclaimed, depth = tree.depth(), "rebuilt");
        }
        if is_key_pressed(KeyCode::B) {
            show_bboxes = !show_bboxes;
        }
        if is_key_pressed(KeyCode::C) {
            query = None;
        }

        let mouse = Vec2::from(mouse_position());
        if is_mouse_button_pressed(MouseButton::Left) {
            let position = viewport.to_world(mouse);
            let id = tree.insert(position);
            info!(%id, x = position.x, y = position.y, "inserted");
        }
        if is_mouse_button_pressed(MouseButton::Right) {
            let target = viewport.to_world(mouse);
            if let Some(point) = nearest_point(&tree, &target, 15.0) {
                tree.delete_id(point.id());
                navigator.clamp(&tree);
                info!(id = %point.id(), "deleted");
            }
        }
        if is_mouse_button_pressed(MouseButton::Middle) {
            drag_start = Some(mouse);
        }
        if let Some(start) = drag_start {
            let (a, b) = (viewport.to_world(start), viewport.to_world(mouse));
            query = Rect2D::new(a.x.min(b.x), a.x.max(b.x), a.y.min(b.y), a.y.max(b.y)).ok();
            if is_mouse_button_released(MouseButton::Middle) {
                drag_start = None;
            }
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));

        viewport.draw_rect(&viewport.world(), 1.0, DARKGRAY);
        viewport.draw_segments(&tree.split_segments());
        if show_bboxes {
            if let Some(root) = tree.root() {
                draw_bboxes(&viewport, root);
            }
        }
        navigator.render(&tree, &viewport);
        viewport.draw_points(&tree.points(), 3.0, SKYBLUE);
        if let Some(root) = tree.root() {
            draw_tombstones(&viewport, root);
        }

        let mut stats = QueryStats::default();
        if let Some(rect) = &query {
            tree.query_with(rect, &mut stats);
            viewport.fill_rect(rect, Color::from_rgba(255, 80, 80, 30));
            viewport.draw_rect(rect, 2.0, RED);
            viewport.draw_points(&tree.query(rect), 4.0, GREEN);
        }

        draw_text(
            &format!(
                "K-d tree ({}) - {} live, {} tombstones, depth {}",
                distribution.name(),
                tree.len(),
                tree.tombstone_count(),
                tree.depth()
            ),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        if query.is_some() {
            draw_text(
                &format!(
                    "Query: {} reported, {} rejected, {} entered, {} pruned, {} accepted",
                    stats.reported, stats.rejected, stats.entered, stats.pruned, stats.accepted
                ),
                10.0,
                45.0,
                18.0,
                GREEN,
            );
        }
        navigator.draw_ui(&tree, 70.0);
        draw_text(
            "LMB insert | RMB delete | MMB drag query | [C]lear query | [R]ebuild | [B]boxes \
             | 1-7 distribution",
            10.0,
            screen_height() - 10.0,
            16.0,
            GRAY,
        );

        next_frame().await
    }
}
