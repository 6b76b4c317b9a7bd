//! Trace graph engine - parse nested execution traces into a collapsible
//! node-link diagram with pan/zoom interaction.
//!
//! Rendering is left to the caller: [`InteractionController::scene`] yields a
//! renderer-agnostic [`Scene`] in content coordinates plus the view transform.

pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod parser;
pub mod scene;
pub mod tree;

pub use config::{LayoutConfig, ViewConfig, VisualizerConfig};
pub use error::{Result, TraceGraphError};
pub use interaction::{DragAnchor, Effect, InteractionController, InteractionEvent, ViewState};
pub use layout::LayoutEngine;
pub use parser::TraceParser;
pub use scene::{build_scene, hit_test, node_color, SceneOptions};
pub use tree::{NodeGeometry, NodeHandle, TraceNode, TraceTree};

pub use shared_types::{
    EdgeCurve, NodeDetails, NodeKind, Point, Scene, SceneEdge, SceneNode, Size, ViewSnapshot,
    ViewTransform,
};
