use shared_types::{
    EdgeCurve, NodeKind, Point, Scene, SceneEdge, SceneNode, Size, ViewTransform,
};

use crate::config::LayoutConfig;
use crate::parser::truncate;
use crate::tree::{NodeHandle, TraceTree};

/// Horizontal pull of connector control points
const EDGE_CONTROL_OFFSET: f32 = 20.0;

pub fn node_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "#1E88E5",
        NodeKind::Function => "#43A047",
        NodeKind::ArgumentBundle => "#FB8C00",
        NodeKind::Tool => "#E53935",
        NodeKind::Result => "#8E24AA",
        NodeKind::Other => "#546E7A",
    }
}

/// Connector from the parent's right-edge midpoint to the child's left-edge
/// midpoint.
pub fn edge_curve(parent: Point, child: Point, layout: &LayoutConfig) -> EdgeCurve {
    let start = Point::new(parent.x + layout.node_width, parent.y + layout.node_height / 2.0);
    let end = Point::new(child.x, child.y + layout.node_height / 2.0);
    EdgeCurve {
        start,
        control_start: start.offset(EDGE_CONTROL_OFFSET, 0.0),
        control_end: end.offset(-EDGE_CONTROL_OFFSET, 0.0),
        end,
    }
}

pub struct SceneOptions<'a> {
    pub layout: &'a LayoutConfig,
    pub transform: ViewTransform,
    pub selected: Option<NodeHandle>,
    pub label_max_chars: usize,
}

/// Project a laid-out tree onto the renderer contract. Nodes without
/// geometry (hidden, or layout never ran) are skipped.
pub fn build_scene(tree: &TraceTree, options: &SceneOptions<'_>) -> Scene {
    let layout = options.layout;
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for handle in tree.visible() {
        let Some(geometry) = tree.geometry(handle) else {
            continue;
        };
        let node = tree.node(handle);
        let collapsed = tree.is_collapsed(handle);

        nodes.push(SceneNode {
            id: node.id.clone(),
            kind: node.kind,
            label: truncate(&node.label, options.label_max_chars),
            x: geometry.x,
            y: geometry.y,
            width: layout.node_width,
            height: layout.node_height,
            subtree: geometry.subtree(),
            has_children: node.has_children(),
            collapsed,
            selected: options.selected == Some(handle),
            color: node_color(node.kind).to_string(),
        });

        if collapsed {
            continue;
        }
        for child in &node.children {
            let Some(child_geometry) = tree.geometry(*child) else {
                continue;
            };
            edges.push(SceneEdge {
                from: node.id.clone(),
                to: tree.node(*child).id.clone(),
                curve: edge_curve(geometry.origin(), child_geometry.origin(), layout),
            });
        }
    }

    let bounds = tree
        .geometry(tree.root())
        .map_or_else(Size::default, |geometry| geometry.subtree());

    Scene {
        nodes,
        edges,
        transform: options.transform,
        bounds,
        selected_id: options.selected.map(|handle| tree.node(handle).id.clone()),
    }
}

/// Topmost visible node whose box contains `point` (content space).
pub fn hit_test(tree: &TraceTree, layout: &LayoutConfig, point: Point) -> Option<NodeHandle> {
    tree.visible().into_iter().rev().find(|handle| {
        tree.geometry(*handle).is_some_and(|geometry| {
            point.x >= geometry.x
                && point.x <= geometry.x + layout.node_width
                && point.y >= geometry.y
                && point.y <= geometry.y + layout.node_height
        })
    })
}
