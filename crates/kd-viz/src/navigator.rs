//! K-d tree navigation utilities for interactive visualization.

use kd_range::{Axis, KdNode, KdTree};
use macroquad::prelude::*;

use crate::Viewport;

/// Direction taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Walks a [`KdTree`] one node at a time, highlighting the current subtree.
///
/// The path is stored rather than a node reference, so the navigator
/// survives mutations of the tree; [`TreeNavigator::clamp`] trims the path
/// when a rebuild invalidates it.
#[derive(Debug, Default)]
pub struct TreeNavigator {
    path: Vec<Direction>,
}

impl TreeNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to step into the left child. Returns true if successful.
    pub fn go_left(&mut self, tree: &KdTree) -> bool {
        self.go(tree, Direction::Left)
    }

    /// Attempts to step into the right child. Returns true if successful.
    pub fn go_right(&mut self, tree: &KdTree) -> bool {
        self.go(tree, Direction::Right)
    }

    fn go(&mut self, tree: &KdTree, direction: Direction) -> bool {
        let has_child = self.current_node(tree).is_some_and(|node| match direction {
            Direction::Left => node.left().is_some(),
            Direction::Right => node.right().is_some(),
        });
        if has_child {
            self.path.push(direction);
        }
        has_child
    }

    /// Steps up to the parent. Returns true if not already at the root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Drops path steps that no longer lead to a node.
    pub fn clamp(&mut self, tree: &KdTree) {
        let Some(mut current) = tree.root() else {
            self.path.clear();
            return;
        };
        let mut valid = 0;
        for dir in &self.path {
            let next = match dir {
                Direction::Left => current.left(),
                Direction::Right => current.right(),
            };
            match next {
                Some(node) => {
                    current = node;
                    valid += 1;
                }
                None => break,
            }
        }
        self.path.truncate(valid);
    }

    /// Handles arrow-key navigation. Returns true if the position changed.
    pub fn update(&mut self, tree: &KdTree) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::Left) {
            changed = self.go_left(tree);
        }
        if is_key_pressed(KeyCode::Right) {
            changed = self.go_right(tree);
        }
        if is_key_pressed(KeyCode::Up) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::Home) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns the current node, if the tree is non-empty.
    pub fn current_node<'a>(&self, tree: &'a KdTree) -> Option<&'a KdNode> {
        tree.root().and_then(|root| node_at_path(root, &self.path))
    }

    /// Highlights the current node's bounding box, split line and point.
    pub fn render(&self, tree: &KdTree, viewport: &Viewport) {
        let Some(node) = self.current_node(tree) else {
            return;
        };
        let bbox = node.bbox();
        viewport.fill_rect(bbox, Color::from_rgba(255, 200, 0, 30));
        viewport.draw_rect(bbox, 2.0, YELLOW);

        let split = node.split_value();
        let (min, max) = (bbox.min(), bbox.max());
        let (a, b) = match node.axis() {
            Axis::X => (
                viewport.to_screen(&[split, min.y].into()),
                viewport.to_screen(&[split, max.y].into()),
            ),
            Axis::Y => (
                viewport.to_screen(&[min.x, split].into()),
                viewport.to_screen(&[max.x, split].into()),
            ),
        };
        draw_line(a.x, a.y, b.x, b.y, 2.0, ORANGE);

        let v = viewport.to_screen(node.point().position());
        draw_circle(v.x, v.y, 6.0, ORANGE);
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui(&self, tree: &KdTree, y_offset: f32) {
        let Some(node) = self.current_node(tree) else {
            draw_text("Tree is empty", 10.0, y_offset, 18.0, GRAY);
            return;
        };

        let path_str = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
                .iter()
                .map(|d| match d {
                    Direction::Left => "L",
                    Direction::Right => "R",
                })
                .collect::<Vec<_>>()
                .join(" -> ")
        };
        let axis = match node.axis() {
            Axis::X => "x",
            Axis::Y => "y",
        };

        draw_text(
            &format!(
                "Node {} at ({:.1}, {:.1}){}",
                node.point().id(),
                node.point().x(),
                node.point().y(),
                if node.is_deleted() { " [deleted]" } else { "" }
            ),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Split {} = {:.1} | subtree {} live / {} nodes",
                axis,
                node.split_value(),
                node.live_count(),
                node.node_count()
            ),
            10.0,
            y_offset + 20.0,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {})", path_str, self.path.len()),
            10.0,
            y_offset + 40.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Children: {}{}{}",
                if node.left().is_some() { "[<]left " } else { "" },
                if node.right().is_some() { "[>]right " } else { "" },
                if node.is_leaf() { "(leaf)" } else { "" }
            ),
            10.0,
            y_offset + 60.0,
            18.0,
            if node.is_leaf() { ORANGE } else { GREEN },
        );
        draw_text("[Up] parent | [Home] root", 10.0, y_offset + 80.0, 16.0, DARKGRAY);
    }
}

fn node_at_path<'a>(root: &'a KdNode, path: &[Direction]) -> Option<&'a KdNode> {
    let mut current = root;
    for dir in path {
        current = match dir {
            Direction::Left => current.left()?,
            Direction::Right => current.right()?,
        };
    }
    Some(current)
}
