//! Shared types between the trace graph engine and its renderers
//!
//! These types are produced by:
//! - `trace-graph` (native Rust, the layout + interaction engine)
//!
//! and consumed by any presentation layer (the CLI's SVG writer, a web canvas).
//! Serializable with serde for JSON; exported to TypeScript with ts-rs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Geometry
// ============================================================================

/// A point in either content space or screen space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Node classification
// ============================================================================

/// Role of a node in a parsed trace. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "generated.ts")]
pub enum NodeKind {
    Root,
    Function,
    ArgumentBundle,
    Tool,
    Result,
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Function => "function",
            NodeKind::ArgumentBundle => "argument-bundle",
            NodeKind::Tool => "tool",
            NodeKind::Result => "result",
            NodeKind::Other => "other",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scene (renderer input)
// ============================================================================

/// A visible, positioned node box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct SceneNode {
    pub id: String,
    pub kind: NodeKind,
    /// Label truncated for display inside the box
    pub label: String,
    /// Box origin in content space
    pub x: f32,
    pub y: f32,
    /// Box size (always the configured node size)
    pub width: f32,
    pub height: f32,
    /// Footprint of the node plus its visible descendants
    pub subtree: Size,
    pub has_children: bool,
    pub collapsed: bool,
    pub selected: bool,
    /// Fill color, `#RRGGBB`
    pub color: String,
}

/// Cubic bezier from a parent's right edge to a child's left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct EdgeCurve {
    pub start: Point,
    pub control_start: Point,
    pub control_end: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub curve: EdgeCurve,
}

/// `translate(pan) · scale(zoom)` applied to the whole scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct ViewTransform {
    pub pan: Point,
    pub zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct Scene {
    /// Visible nodes, pre-order
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub transform: ViewTransform,
    /// Content-space extent of the laid-out tree
    pub bounds: Size,
    pub selected_id: Option<String>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// True when the root has nothing beneath it, whatever the collapse state.
    pub fn is_empty(&self) -> bool {
        self.nodes.first().map_or(true, |root| !root.has_children)
    }
}

// ============================================================================
// Side panel / view state
// ============================================================================

/// Detail record for the selected node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct NodeDetails {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    #[ts(type = "unknown")]
    pub value: serde_json::Value,
}

/// Serializable copy of the interaction state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated.ts")]
pub struct ViewSnapshot {
    pub collapsed_ids: Vec<String>,
    pub zoom: f32,
    pub pan: Point,
    pub dragging: bool,
    pub selected_id: Option<String>,
    pub fullscreen: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::Config;

    #[test]
    fn test_node_kind_serialization() {
        let json = serde_json::to_string(&NodeKind::ArgumentBundle).unwrap();
        assert_eq!(json, "\"argument-bundle\"");
        let kind: NodeKind = serde_json::from_str("\"tool\"").unwrap();
        assert_eq!(kind, NodeKind::Tool);
    }

    #[test]
    fn test_node_kind_display_matches_serde() {
        for kind in [
            NodeKind::Root,
            NodeKind::Function,
            NodeKind::ArgumentBundle,
            NodeKind::Tool,
            NodeKind::Result,
            NodeKind::Other,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.offset(3.0, 4.0), b);
    }

    #[test]
    fn test_scene_empty_when_only_root() {
        let scene = Scene {
            nodes: vec![SceneNode {
                id: "root".to_string(),
                kind: NodeKind::Root,
                label: "root".to_string(),
                x: 0.0,
                y: 0.0,
                width: 160.0,
                height: 32.0,
                subtree: Size::new(160.0, 32.0),
                has_children: false,
                collapsed: false,
                selected: false,
                color: "#1E88E5".to_string(),
            }],
            edges: vec![],
            transform: ViewTransform::default(),
            bounds: Size::new(160.0, 32.0),
            selected_id: None,
        };
        assert!(scene.is_empty());
        assert!(scene.node("root").is_some());

        let mut collapsed = scene.clone();
        collapsed.nodes[0].has_children = true;
        collapsed.nodes[0].collapsed = true;
        assert!(!collapsed.is_empty());

        collapsed.nodes.clear();
        assert!(collapsed.is_empty());
    }

    #[test]
    fn export_types() {
        // The export_to attribute in each type's #[ts] macro specifies the output file
        let config = Config::default();
        Point::export(&config).unwrap();
        Size::export(&config).unwrap();
        NodeKind::export(&config).unwrap();
        SceneNode::export(&config).unwrap();
        EdgeCurve::export(&config).unwrap();
        SceneEdge::export(&config).unwrap();
        ViewTransform::export(&config).unwrap();
        Scene::export(&config).unwrap();
        NodeDetails::export(&config).unwrap();
        ViewSnapshot::export(&config).unwrap();
    }
}
