//! Horizontal tree layout.
//!
//! Pass 1 (post-order) sizes every visible subtree; pass 2 (pre-order) places
//! children to the right of their parent, stacked top to bottom. Layout is
//! zoom-independent and deterministic for a fixed collapse state.

use shared_types::{Point, Size};

use crate::config::LayoutConfig;
use crate::tree::{NodeGeometry, NodeHandle, TraceTree};

pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Recompute geometry for every visible node. Hidden nodes end up with
    /// no geometry. Returns the root's subtree size.
    pub fn layout(&self, tree: &mut TraceTree) -> Size {
        tree.geometry.iter_mut().for_each(|slot| *slot = None);
        if tree.is_empty() {
            return Size::default();
        }

        let root = tree.root();
        let size = self.measure(tree, root);
        self.place(tree, root, self.config.origin);
        tracing::debug!(
            nodes = tree.len(),
            width = size.width,
            height = size.height,
            "Laid out trace tree"
        );
        size
    }

    fn measure(&self, tree: &mut TraceTree, handle: NodeHandle) -> Size {
        let LayoutConfig {
            node_width,
            node_height,
            horizontal_spacing,
            vertical_spacing,
            ..
        } = self.config;

        let children = tree.children(handle).to_vec();
        let size = if tree.is_collapsed(handle) || children.is_empty() {
            Size::new(node_width, node_height)
        } else {
            let mut stacked_height = 0.0_f32;
            let mut widest_child = 0.0_f32;
            for (position, child) in children.iter().enumerate() {
                let child_size = self.measure(tree, *child);
                if position > 0 {
                    stacked_height += vertical_spacing;
                }
                stacked_height += child_size.height;
                widest_child = widest_child.max(child_size.width);
            }
            Size::new(
                node_width + horizontal_spacing + widest_child,
                stacked_height.max(node_height),
            )
        };

        tree.geometry[handle.index()] = Some(NodeGeometry {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        });
        size
    }

    fn place(&self, tree: &mut TraceTree, handle: NodeHandle, at: Point) {
        let Some(geometry) = tree.geometry[handle.index()].as_mut() else {
            return;
        };
        geometry.x = at.x;
        geometry.y = at.y;

        if tree.is_collapsed(handle) {
            return;
        }

        let child_x = at.x + self.config.node_width + self.config.horizontal_spacing;
        let mut child_y = at.y;
        for child in tree.children(handle).to_vec() {
            self.place(tree, child, Point::new(child_x, child_y));
            let child_height = tree
                .geometry(child)
                .map_or(self.config.node_height, |geometry| geometry.height);
            child_y += child_height + self.config.vertical_spacing;
        }
    }
}
