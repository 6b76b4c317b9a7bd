use std::path::Path;

use serde::Deserialize;
use shared_types::Point;

use crate::error::{Result, TraceGraphError};

/// Geometry constants for the layout pass.
///
/// These are caller-supplied and never derived from font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Gap between a parent's right edge and its children's left edge
    pub horizontal_spacing: f32,
    /// Gap between consecutive sibling subtrees
    pub vertical_spacing: f32,
    /// Where the root box is placed
    pub origin: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 32.0,
            horizontal_spacing: 40.0,
            vertical_spacing: 36.0,
            origin: Point::ORIGIN,
        }
    }
}

impl LayoutConfig {
    /// Copy with negative or NaN constants clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            node_width: self.node_width.max(0.0),
            node_height: self.node_height.max(0.0),
            horizontal_spacing: self.horizontal_spacing.max(0.0),
            vertical_spacing: self.vertical_spacing.max(0.0),
            origin: self.origin,
        }
    }
}

/// Zoom, pan and gesture settings for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Relative step for the zoom in/out buttons
    pub zoom_step: f32,
    /// Relative step for one pinch / ctrl-wheel tick
    pub wheel_zoom_step: f32,
    pub initial_zoom: f32,
    pub initial_pan: Point,
    /// Nodes deeper than this start collapsed
    pub expanded_depth: usize,
    /// Pointer travel (screen px) below which a press/release is a click
    pub drag_threshold: f32,
    pub label_max_chars: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 2.0,
            zoom_step: 0.1,
            wheel_zoom_step: 0.05,
            initial_zoom: 0.7,
            initial_pan: Point::new(50.0, 50.0),
            expanded_depth: 1,
            drag_threshold: 4.0,
            label_max_chars: 20,
        }
    }
}

impl ViewConfig {
    /// Clamp into `[min_zoom, max_zoom]`. Never panics; a NaN zoom lands on
    /// `min_zoom`.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Copy where every value [`VisualizerConfig::validate`] would reject is
    /// replaced by its default, and inverted zoom bounds are swapped.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        let mut min_zoom = positive(self.min_zoom, defaults.min_zoom);
        let mut max_zoom = positive(self.max_zoom, defaults.max_zoom);
        if min_zoom > max_zoom {
            std::mem::swap(&mut min_zoom, &mut max_zoom);
        }
        let wheel_zoom_step = match positive(self.wheel_zoom_step, defaults.wheel_zoom_step) {
            step if step < 1.0 => step,
            _ => defaults.wheel_zoom_step,
        };
        let initial_pan = if self.initial_pan.x.is_finite() && self.initial_pan.y.is_finite() {
            self.initial_pan
        } else {
            defaults.initial_pan
        };
        let drag_threshold = if self.drag_threshold.is_finite() && self.drag_threshold >= 0.0 {
            self.drag_threshold
        } else {
            defaults.drag_threshold
        };

        Self {
            min_zoom,
            max_zoom,
            zoom_step: positive(self.zoom_step, defaults.zoom_step),
            wheel_zoom_step,
            initial_zoom: positive(self.initial_zoom, defaults.initial_zoom),
            initial_pan,
            expanded_depth: self.expanded_depth,
            drag_threshold,
            label_max_chars: self.label_max_chars,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub layout: LayoutConfig,
    pub view: ViewConfig,
}

impl VisualizerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded visualizer config");
        Ok(config)
    }

    /// Apply `TRACE_GRAPH_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        let layout = &mut self.layout;
        layout.node_width = env_parse("TRACE_GRAPH_NODE_WIDTH", layout.node_width)?;
        layout.node_height = env_parse("TRACE_GRAPH_NODE_HEIGHT", layout.node_height)?;
        layout.horizontal_spacing = env_parse("TRACE_GRAPH_H_GAP", layout.horizontal_spacing)?;
        layout.vertical_spacing = env_parse("TRACE_GRAPH_V_GAP", layout.vertical_spacing)?;

        let view = &mut self.view;
        view.min_zoom = env_parse("TRACE_GRAPH_MIN_ZOOM", view.min_zoom)?;
        view.max_zoom = env_parse("TRACE_GRAPH_MAX_ZOOM", view.max_zoom)?;
        view.zoom_step = env_parse("TRACE_GRAPH_ZOOM_STEP", view.zoom_step)?;
        view.expanded_depth = env_parse("TRACE_GRAPH_EXPANDED_DEPTH", view.expanded_depth)?;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let view = &self.view;
        if not_positive(view.min_zoom) || not_positive(view.max_zoom) {
            return Err(TraceGraphError::InvalidConfig(format!(
                "zoom bounds must be positive (min_zoom={}, max_zoom={})",
                view.min_zoom, view.max_zoom
            )));
        }
        if view.min_zoom > view.max_zoom {
            return Err(TraceGraphError::InvalidConfig(format!(
                "min_zoom {} exceeds max_zoom {}",
                view.min_zoom, view.max_zoom
            )));
        }
        if not_positive(view.zoom_step) || not_positive(view.wheel_zoom_step) {
            return Err(TraceGraphError::InvalidConfig(
                "zoom steps must be positive".to_string(),
            ));
        }
        if view.wheel_zoom_step >= 1.0 {
            return Err(TraceGraphError::InvalidConfig(format!(
                "wheel_zoom_step {} must be below 1",
                view.wheel_zoom_step
            )));
        }
        if not_positive(view.initial_zoom) {
            return Err(TraceGraphError::InvalidConfig(format!(
                "initial_zoom must be positive and finite (got {})",
                view.initial_zoom
            )));
        }
        if !view.initial_pan.x.is_finite() || !view.initial_pan.y.is_finite() {
            return Err(TraceGraphError::InvalidConfig(format!(
                "initial_pan must be finite (got {}, {})",
                view.initial_pan.x, view.initial_pan.y
            )));
        }
        if !view.drag_threshold.is_finite() || view.drag_threshold < 0.0 {
            return Err(TraceGraphError::InvalidConfig(format!(
                "drag_threshold must be finite and non-negative (got {})",
                view.drag_threshold
            )));
        }
        Ok(())
    }
}

/// NaN, infinite, zero and negative values all fail.
fn not_positive(value: f32) -> bool {
    !value.is_finite() || value <= 0.0
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<T>().map_err(|e| {
            TraceGraphError::InvalidConfig(format!("Failed to parse env var {key}={val}: {e}"))
        }),
        Err(_) => Ok(default),
    }
}
