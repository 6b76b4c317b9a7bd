//! Interaction state machine for one displayed trace.
//!
//! The controller owns the parsed tree and its [`ViewState`]. Collapse flags
//! live in the tree and pan/zoom/drag state in the view, so a toggle during a
//! drag leaves the drag anchor untouched.

use serde_json::Value;
use shared_types::{NodeDetails, Point, Scene, Size, ViewSnapshot, ViewTransform};

use crate::config::VisualizerConfig;
use crate::layout::LayoutEngine;
use crate::parser::TraceParser;
use crate::scene::{build_scene, hit_test, SceneOptions};
use crate::tree::{NodeHandle, TraceTree};

/// Pointer position and pan captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer_start: Point,
    pub pan_start: Point,
    /// Farthest distance the pointer has travelled from `pointer_start`
    pub max_travel: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub pan: Point,
    pub drag: Option<DragAnchor>,
    pub selected: Option<NodeHandle>,
    pub fullscreen: bool,
}

/// Discrete UI events accepted by [`InteractionController::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    Toggle(String),
    Select(Option<String>),
    ExpandAll,
    CollapseAll,
    ZoomIn,
    ZoomOut,
    ResetView,
    Pan { dx: f32, dy: f32 },
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Wheel {
        pointer: Point,
        delta_y: f32,
        pinch: bool,
    },
    SetFullscreen(bool),
}

/// What a handled event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing observable changed
    None,
    /// Transform or selection changed; geometry is untouched
    View,
    /// Collapse state changed and layout was recomputed
    Relayout,
}

pub struct InteractionController {
    config: VisualizerConfig,
    engine: LayoutEngine,
    tree: TraceTree,
    view: ViewState,
}

impl InteractionController {
    /// Build a controller for `trace`. Out-of-range view settings are repaired
    /// with [`ViewConfig::sanitized`](crate::config::ViewConfig::sanitized), so
    /// an unvalidated config never panics or poisons the view with NaN.
    pub fn new(trace: Value, mut config: VisualizerConfig) -> Self {
        config.view = config.view.sanitized();
        let engine = LayoutEngine::new(&config.layout);
        let tree = TraceParser::parse(trace);
        let view = Self::initial_view(&config);
        let mut controller = Self {
            config,
            engine,
            tree,
            view,
        };
        controller.reset_tree_state();
        controller
    }

    /// Replace the trace. All view state is reset.
    pub fn load(&mut self, trace: Value) {
        self.tree = TraceParser::parse(trace);
        self.view = Self::initial_view(&self.config);
        self.reset_tree_state();
    }

    fn initial_view(config: &VisualizerConfig) -> ViewState {
        ViewState {
            zoom: config.view.clamp_zoom(config.view.initial_zoom),
            pan: config.view.initial_pan,
            drag: None,
            selected: None,
            fullscreen: false,
        }
    }

    fn reset_tree_state(&mut self) {
        self.tree.collapse_below(self.config.view.expanded_depth);
        self.relayout();
        tracing::debug!(
            nodes = self.tree.len(),
            collapsed = self.tree.collapsed_ids().len(),
            "Loaded trace into controller"
        );
    }

    fn relayout(&mut self) -> Size {
        self.engine.layout(&mut self.tree)
    }

    pub fn tree(&self) -> &TraceTree {
        &self.tree
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    // ── Collapse state ───────────────────────────────────────────────────────

    /// Flip one node's collapse flag. Unknown ids and leaves are no-ops.
    /// Descendants keep their own flags.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tree.find(id) {
            Some(handle) => self.toggle_handle(handle),
            None => {
                tracing::trace!(id, "Toggle target not found");
                false
            }
        }
    }

    pub fn toggle_handle(&mut self, handle: NodeHandle) -> bool {
        if self.tree.get(handle).map_or(true, |node| !node.has_children()) {
            return false;
        }
        let collapsed = !self.tree.is_collapsed(handle);
        self.tree.set_collapsed(handle, collapsed);
        self.relayout();
        tracing::trace!(id = %self.tree.node(handle).id, collapsed, "Toggled node");
        true
    }

    pub fn expand_all(&mut self) {
        for handle in self.tree.handles().collect::<Vec<_>>() {
            self.tree.set_collapsed(handle, false);
        }
        self.relayout();
    }

    /// Collapse every node; the root only when it has children.
    pub fn collapse_all(&mut self) {
        let root = self.tree.root();
        for handle in self.tree.handles().collect::<Vec<_>>() {
            let collapsed = handle != root || self.tree.node(root).has_children();
            self.tree.set_collapsed(handle, collapsed);
        }
        self.relayout();
    }

    /// Entering fullscreen expands everything; leaving keeps collapse state.
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> Effect {
        let entering = fullscreen && !self.view.fullscreen;
        self.view.fullscreen = fullscreen;
        if entering {
            self.expand_all();
            Effect::Relayout
        } else {
            Effect::View
        }
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Select a node by id; an unknown id or `None` clears the selection.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        self.view.selected = id.and_then(|id| self.tree.find(id));
        self.view.selected.is_some()
    }

    pub fn selected_details(&self) -> Option<NodeDetails> {
        self.view.selected.map(|handle| self.tree.details(handle))
    }

    // ── Zoom and pan ─────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        let factor = 1.0 + self.config.view.zoom_step;
        self.view.zoom = self.config.view.clamp_zoom(self.view.zoom * factor);
    }

    pub fn zoom_out(&mut self) {
        let factor = 1.0 + self.config.view.zoom_step;
        self.view.zoom = self.config.view.clamp_zoom(self.view.zoom / factor);
    }

    pub fn reset_view(&mut self) {
        self.view.zoom = self.config.view.clamp_zoom(1.0);
        self.view.pan = Point::ORIGIN;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.view.pan = self.view.pan.offset(dx, dy);
    }

    /// Zoom one step toward (`delta_sign < 0`) or away from the content, keeping
    /// the content point under `pointer` fixed on screen.
    pub fn wheel_zoom_toward_cursor(&mut self, pointer: Point, delta_sign: f32) {
        if delta_sign == 0.0 || delta_sign.is_nan() {
            return;
        }
        let step = self.config.view.wheel_zoom_step;
        let zoom = self.view.zoom;
        let new_zoom = self
            .config
            .view
            .clamp_zoom(zoom * (1.0 - delta_sign.signum() * step));
        let content = self.screen_to_content(pointer);
        let scale_diff = new_zoom - zoom;
        self.view.pan = self
            .view
            .pan
            .offset(-content.x * scale_diff, -content.y * scale_diff);
        self.view.zoom = new_zoom;
        tracing::trace!(zoom = new_zoom, "Wheel zoom");
    }

    /// Pinch (or ctrl-wheel) zooms toward the cursor; a plain wheel pans
    /// vertically.
    pub fn wheel(&mut self, pointer: Point, delta_y: f32, pinch: bool) {
        if pinch {
            self.wheel_zoom_toward_cursor(pointer, delta_y);
        } else {
            self.pan(0.0, -delta_y);
        }
    }

    // ── Drag ─────────────────────────────────────────────────────────────────

    pub fn begin_drag(&mut self, pointer: Point) {
        self.view.drag = Some(DragAnchor {
            pointer_start: pointer,
            pan_start: self.view.pan,
            max_travel: 0.0,
        });
    }

    /// Pan follows the pointer relative to the anchor, so sampling rate never
    /// accumulates error. No-op without an active drag.
    pub fn continue_drag(&mut self, pointer: Point) {
        let Some(anchor) = self.view.drag.as_mut() else {
            return;
        };
        anchor.max_travel = anchor.max_travel.max(pointer.distance(anchor.pointer_start));
        self.view.pan = anchor.pan_start.offset(
            pointer.x - anchor.pointer_start.x,
            pointer.y - anchor.pointer_start.y,
        );
    }

    /// Clears the anchor and returns it, if a drag was active.
    pub fn end_drag(&mut self) -> Option<DragAnchor> {
        self.view.drag.take()
    }

    pub fn is_dragging(&self) -> bool {
        self.view.drag.is_some()
    }

    // ── Pointer gestures ─────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, pointer: Point) {
        self.begin_drag(pointer);
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        self.continue_drag(pointer);
    }

    /// Ends the gesture. A press/release that stayed within the drag threshold
    /// is a click on whatever node lies under the pointer.
    pub fn pointer_up(&mut self, pointer: Point) -> Effect {
        let Some(mut anchor) = self.end_drag() else {
            return Effect::None;
        };
        anchor.max_travel = anchor.max_travel.max(pointer.distance(anchor.pointer_start));
        if anchor.max_travel >= self.config.view.drag_threshold {
            self.view.pan = anchor.pan_start.offset(
                pointer.x - anchor.pointer_start.x,
                pointer.y - anchor.pointer_start.y,
            );
            return Effect::View;
        }
        self.view.pan = anchor.pan_start;
        self.click(pointer)
    }

    /// Toggle and select the node under a screen-space point.
    pub fn click(&mut self, pointer: Point) -> Effect {
        let content = self.screen_to_content(pointer);
        let Some(handle) = hit_test(&self.tree, self.engine.config(), content) else {
            return Effect::None;
        };
        self.view.selected = Some(handle);
        if self.toggle_handle(handle) {
            Effect::Relayout
        } else {
            Effect::View
        }
    }

    // ── Coordinates ──────────────────────────────────────────────────────────

    pub fn screen_to_content(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.view.pan.x) / self.view.zoom,
            (point.y - self.view.pan.y) / self.view.zoom,
        )
    }

    pub fn content_to_screen(&self, point: Point) -> Point {
        Point::new(
            point.x * self.view.zoom + self.view.pan.x,
            point.y * self.view.zoom + self.view.pan.y,
        )
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            pan: self.view.pan,
            zoom: self.view.zoom,
        }
    }

    // ── Output ───────────────────────────────────────────────────────────────

    pub fn scene(&self) -> Scene {
        build_scene(
            &self.tree,
            &SceneOptions {
                layout: self.engine.config(),
                transform: self.transform(),
                selected: self.view.selected,
                label_max_chars: self.config.view.label_max_chars,
            },
        )
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            collapsed_ids: self.tree.collapsed_ids().into_iter().collect(),
            zoom: self.view.zoom,
            pan: self.view.pan,
            dragging: self.view.drag.is_some(),
            selected_id: self
                .view
                .selected
                .map(|handle| self.tree.node(handle).id.clone()),
            fullscreen: self.view.fullscreen,
        }
    }

    // ── Reducer ──────────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, event: InteractionEvent) -> Effect {
        tracing::trace!(?event, "Dispatching interaction event");
        match event {
            InteractionEvent::Toggle(id) => {
                if self.toggle(&id) {
                    Effect::Relayout
                } else {
                    Effect::None
                }
            }
            InteractionEvent::Select(id) => {
                self.select(id.as_deref());
                Effect::View
            }
            InteractionEvent::ExpandAll => {
                self.expand_all();
                Effect::Relayout
            }
            InteractionEvent::CollapseAll => {
                self.collapse_all();
                Effect::Relayout
            }
            InteractionEvent::ZoomIn => {
                self.zoom_in();
                Effect::View
            }
            InteractionEvent::ZoomOut => {
                self.zoom_out();
                Effect::View
            }
            InteractionEvent::ResetView => {
                self.reset_view();
                Effect::View
            }
            InteractionEvent::Pan { dx, dy } => {
                self.pan(dx, dy);
                Effect::View
            }
            InteractionEvent::PointerDown(pointer) => {
                self.pointer_down(pointer);
                Effect::None
            }
            InteractionEvent::PointerMove(pointer) => {
                if self.is_dragging() {
                    self.pointer_move(pointer);
                    Effect::View
                } else {
                    Effect::None
                }
            }
            InteractionEvent::PointerUp(pointer) => self.pointer_up(pointer),
            InteractionEvent::Wheel {
                pointer,
                delta_y,
                pinch,
            } => {
                self.wheel(pointer, delta_y, pinch);
                Effect::View
            }
            InteractionEvent::SetFullscreen(fullscreen) => self.set_fullscreen(fullscreen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use serde_json::json;

    fn controller(value: Value) -> InteractionController {
        InteractionController::new(value, VisualizerConfig::default())
    }

    fn nested_trace() -> Value {
        json!({
            "function": "agent",
            "args": {"query": {"text": "q"}},
            "tools": [
                {"name": "search", "args": {"q": "rust"}, "result": {"hits": [{"url": "a"}]}},
            ],
            "result": {"answer": "done"},
        })
    }

    #[test]
    fn test_default_collapse_depth() {
        let controller = controller(nested_trace());
        let tree = controller.tree();
        assert!(!tree.is_collapsed(tree.find("root").unwrap()));
        assert!(!tree.is_collapsed(tree.find("root-tool-0").unwrap()));
        assert!(tree.is_collapsed(tree.find("root-tool-0-result").unwrap()));
        assert!(tree.is_collapsed(tree.find("root-args-query").unwrap()));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut controller = controller(nested_trace());
        let before = controller.scene();
        let snapshot = controller.snapshot();
        assert!(!controller.toggle("root-tool-7"));
        assert_eq!(controller.scene(), before);
        assert_eq!(controller.snapshot(), snapshot);
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let mut controller = controller(json!({"function": "f"}));
        assert!(!controller.toggle("root-function"));
        assert!(!controller.tree().is_collapsed(controller.tree().find("root-function").unwrap()));
    }

    #[test]
    fn test_toggle_preserves_descendant_flags() {
        let mut controller = controller(nested_trace());
        let tool = controller.tree().find("root-tool-0").unwrap();
        let tool_result = controller.tree().find("root-tool-0-result").unwrap();
        assert!(controller.toggle("root-tool-0-result"));
        assert!(!controller.tree().is_collapsed(tool_result));

        assert!(controller.toggle("root-tool-0"));
        assert!(controller.tree().is_collapsed(tool));
        assert!(controller.tree().geometry(tool_result).is_none());

        assert!(controller.toggle("root-tool-0"));
        assert!(!controller.tree().is_collapsed(tool_result));
        assert!(controller.tree().geometry(tool_result).is_some());
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut controller = controller(nested_trace());
        controller.expand_all();
        assert!(controller.tree().collapsed_ids().is_empty());
        assert_eq!(controller.scene().nodes.len(), controller.tree().len());

        controller.collapse_all();
        assert_eq!(controller.tree().collapsed_ids().len(), controller.tree().len());
        assert_eq!(controller.scene().nodes.len(), 1);
    }

    #[test]
    fn test_collapse_all_leaves_childless_root_expanded() {
        let mut controller = controller(json!({}));
        controller.collapse_all();
        assert!(!controller.tree().is_collapsed(controller.tree().root()));
    }

    #[test]
    fn test_unvalidated_config_is_repaired() {
        let config = VisualizerConfig {
            view: ViewConfig {
                min_zoom: 3.0,
                max_zoom: 2.0,
                initial_zoom: f32::NAN,
                initial_pan: Point::new(f32::NAN, 0.0),
                ..ViewConfig::default()
            },
            ..VisualizerConfig::default()
        };
        let mut controller = InteractionController::new(json!({"function": "f"}), config);
        assert_eq!(controller.view().zoom, 2.0);
        assert_eq!(controller.view().pan, Point::new(50.0, 50.0));

        for _ in 0..20 {
            controller.zoom_in();
        }
        assert_eq!(controller.view().zoom, 3.0);
        controller.wheel_zoom_toward_cursor(Point::new(10.0, 10.0), 1.0);
        let content = controller.screen_to_content(Point::new(10.0, 10.0));
        assert!(content.x.is_finite() && content.y.is_finite());
        assert!(controller.view().zoom.is_finite());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut controller = controller(json!({}));
        for _ in 0..100 {
            controller.zoom_in();
        }
        assert_eq!(controller.view().zoom, 2.0);
        for _ in 0..200 {
            controller.zoom_out();
        }
        assert_eq!(controller.view().zoom, 0.1);
    }

    #[test]
    fn test_zoom_does_not_touch_layout() {
        let mut controller = controller(nested_trace());
        let nodes = controller.scene().nodes;
        controller.zoom_in();
        assert_eq!(controller.scene().nodes, nodes);
    }

    #[test]
    fn test_zero_distance_drag_keeps_pan() {
        let mut controller = controller(json!({}));
        let pan = controller.view().pan;
        let pointer = Point::new(300.0, 200.0);
        controller.begin_drag(pointer);
        controller.continue_drag(pointer);
        assert!(controller.end_drag().is_some());
        assert_eq!(controller.view().pan, pan);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_is_anchor_relative() {
        let mut controller = controller(json!({}));
        controller.begin_drag(Point::new(10.0, 10.0));
        for step in 1..=50 {
            controller.continue_drag(Point::new(10.0 + step as f32 * 0.3, 10.0));
        }
        controller.continue_drag(Point::new(40.0, 25.0));
        controller.end_drag();
        assert_eq!(controller.view().pan, Point::new(80.0, 65.0));
    }

    #[test]
    fn test_continue_drag_without_anchor_is_noop() {
        let mut controller = controller(json!({}));
        controller.continue_drag(Point::new(500.0, 500.0));
        assert_eq!(controller.view().pan, Point::new(50.0, 50.0));
        assert!(controller.end_drag().is_none());
    }

    #[test]
    fn test_toggle_during_drag_keeps_anchor() {
        let mut controller = controller(nested_trace());
        controller.begin_drag(Point::new(0.0, 0.0));
        let anchor = controller.view().drag;
        controller.toggle("root-tool-0");
        controller.expand_all();
        assert_eq!(controller.view().drag, anchor);
        controller.continue_drag(Point::new(5.0, 5.0));
        assert_eq!(controller.view().pan, Point::new(55.0, 55.0));
    }

    #[test]
    fn test_wheel_zoom_keeps_point_under_cursor() {
        let mut controller = controller(json!({}));
        let pointer = Point::new(320.0, 240.0);
        let before = controller.screen_to_content(pointer);
        controller.wheel_zoom_toward_cursor(pointer, -1.0);
        assert!((controller.view().zoom - 0.7 * 1.05).abs() < 1e-6);
        let after = controller.screen_to_content(pointer);
        assert!((before.x - after.x).abs() < 1e-3, "{before:?} vs {after:?}");
        assert!((before.y - after.y).abs() < 1e-3, "{before:?} vs {after:?}");
    }

    #[test]
    fn test_wheel_zoom_clamped_pan_consistent() {
        let mut controller = controller(json!({}));
        for _ in 0..100 {
            controller.wheel_zoom_toward_cursor(Point::new(100.0, 100.0), 1.0);
        }
        assert_eq!(controller.view().zoom, 0.1);
        let pan = controller.view().pan;
        controller.wheel_zoom_toward_cursor(Point::new(100.0, 100.0), 1.0);
        assert_eq!(controller.view().pan, pan);
    }

    #[test]
    fn test_plain_wheel_pans_vertically() {
        let mut controller = controller(json!({}));
        controller.wheel(Point::new(0.0, 0.0), 120.0, false);
        assert_eq!(controller.view().pan, Point::new(50.0, -70.0));
        assert_eq!(controller.view().zoom, 0.7);
    }

    #[test]
    fn test_click_toggles_and_selects() {
        let mut controller = controller(nested_trace());
        let tool = controller.tree().find("root-tool-0").unwrap();
        let geometry = controller.tree().geometry(tool).unwrap();
        let screen = controller.content_to_screen(Point::new(geometry.x + 5.0, geometry.y + 5.0));

        controller.pointer_down(screen);
        let effect = controller.pointer_up(screen.offset(1.0, 1.0));
        assert_eq!(effect, Effect::Relayout);
        assert!(controller.tree().is_collapsed(tool));
        assert_eq!(controller.view().pan, Point::new(50.0, 50.0));
        assert_eq!(
            controller.selected_details().map(|details| details.label),
            Some("search".to_string())
        );
    }

    #[test]
    fn test_long_drag_is_not_a_click() {
        let mut controller = controller(nested_trace());
        let root_screen = controller.content_to_screen(Point::new(5.0, 5.0));
        controller.pointer_down(root_screen);
        controller.pointer_move(root_screen.offset(30.0, 0.0));
        let effect = controller.pointer_up(root_screen.offset(30.0, 0.0));
        assert_eq!(effect, Effect::View);
        assert!(!controller.tree().is_collapsed(controller.tree().root()));
        assert_eq!(controller.view().pan, Point::new(80.0, 50.0));
        assert!(controller.view().selected.is_none());
    }

    #[test]
    fn test_selection_independent_of_layout() {
        let mut controller = controller(nested_trace());
        let nodes = controller.scene().nodes;
        assert!(controller.select(Some("root-result")));
        let details = controller.selected_details().unwrap();
        assert_eq!(details.value, json!({"answer": "done"}));
        assert_eq!(controller.tree().collapsed_ids(), {
            let fresh = InteractionController::new(nested_trace(), VisualizerConfig::default());
            fresh.tree().collapsed_ids()
        });
        let after: Vec<_> = controller
            .scene()
            .nodes
            .into_iter()
            .map(|node| (node.id, node.x, node.y))
            .collect();
        let before: Vec<_> = nodes.into_iter().map(|node| (node.id, node.x, node.y)).collect();
        assert_eq!(after, before);

        assert!(!controller.select(Some("missing")));
        assert!(controller.selected_details().is_none());
    }

    #[test]
    fn test_fullscreen_expands_all() {
        let mut controller = controller(nested_trace());
        assert_eq!(controller.set_fullscreen(true), Effect::Relayout);
        assert!(controller.tree().collapsed_ids().is_empty());
        controller.toggle("root-tool-0");
        assert_eq!(controller.set_fullscreen(false), Effect::View);
        assert_eq!(controller.tree().collapsed_ids().len(), 1);
    }

    #[test]
    fn test_reset_view() {
        let mut controller = controller(json!({}));
        controller.pan(10.0, 10.0);
        controller.zoom_in();
        controller.reset_view();
        assert_eq!(controller.transform(), ViewTransform::default());
    }

    #[test]
    fn test_load_resets_view_state() {
        let mut controller = controller(nested_trace());
        controller.select(Some("root-result"));
        controller.pan(100.0, 0.0);
        controller.begin_drag(Point::new(1.0, 1.0));
        controller.load(json!({"function": "g"}));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.selected_id, None);
        assert_eq!(snapshot.pan, Point::new(50.0, 50.0));
        assert!(!snapshot.dragging);
        assert_eq!(controller.tree().len(), 2);
    }

    #[test]
    fn test_dispatch_reports_effects() {
        let mut controller = controller(nested_trace());
        assert_eq!(
            controller.dispatch(InteractionEvent::Toggle("root-args".to_string())),
            Effect::Relayout
        );
        assert_eq!(
            controller.dispatch(InteractionEvent::Toggle("nope".to_string())),
            Effect::None
        );
        assert_eq!(controller.dispatch(InteractionEvent::ZoomIn), Effect::View);
        assert_eq!(
            controller.dispatch(InteractionEvent::PointerMove(Point::new(1.0, 1.0))),
            Effect::None
        );
        assert_eq!(
            controller.dispatch(InteractionEvent::PointerUp(Point::new(1.0, 1.0))),
            Effect::None
        );
        assert_eq!(
            controller.dispatch(InteractionEvent::Pan { dx: 1.0, dy: 2.0 }),
            Effect::View
        );
        assert_eq!(controller.view().pan, Point::new(51.0, 52.0));
    }
}
