//! Static SVG rendering of a [`Scene`].

use std::fmt::Write as _;

use trace_graph::{Scene, SceneNode};

const EDGE_COLOR: &str = "#94a3b8";
const SELECTED_STROKE: &str = "#60a5fa";
const NODE_STROKE: &str = "#0f172a";
const LABEL_COLOR: &str = "#ffffff";
const BACKGROUND: &str = "#111827";
/// Room around the drawing beyond the transformed bounds
const MARGIN: f32 = 50.0;

pub fn render_svg(scene: &Scene) -> String {
    let transform = scene.transform;
    let width = (scene.bounds.width * transform.zoom + transform.pan.x + MARGIN).max(1.0);
    let height = (scene.bounds.height * transform.zoom + transform.pan.y + MARGIN).max(1.0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.1}" height="{height:.1}" viewBox="0 0 {width:.1} {height:.1}">"#
    );
    let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="{BACKGROUND}"/>"#);
    let _ = writeln!(
        out,
        r#"  <g transform="translate({:.1} {:.1}) scale({:.3})">"#,
        transform.pan.x, transform.pan.y, transform.zoom
    );

    for edge in &scene.edges {
        let curve = edge.curve;
        let _ = writeln!(
            out,
            r#"    <path d="M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}" fill="none" stroke="{EDGE_COLOR}" stroke-width="1.5"/>"#,
            curve.start.x,
            curve.start.y,
            curve.control_start.x,
            curve.control_start.y,
            curve.control_end.x,
            curve.control_end.y,
            curve.end.x,
            curve.end.y,
        );
    }

    for node in &scene.nodes {
        write_node(&mut out, node);
    }

    out.push_str("  </g>\n</svg>\n");
    out
}

fn write_node(out: &mut String, node: &SceneNode) {
    let (stroke, stroke_width) = if node.selected {
        (SELECTED_STROKE, "2.5")
    } else {
        (NODE_STROKE, "1")
    };
    let _ = writeln!(out, r#"    <g data-id="{}">"#, escape(&node.id));
    let _ = writeln!(
        out,
        r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="6" fill="{}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#,
        node.x,
        node.y,
        node.width,
        node.height,
        escape(&node.color),
    );
    let _ = writeln!(
        out,
        r#"      <text x="{:.1}" y="{:.1}" fill="{LABEL_COLOR}" font-size="12" dominant-baseline="middle">{}</text>"#,
        node.x + 10.0,
        node.y + node.height / 2.0,
        escape(&node.label),
    );
    if node.has_children {
        let marker = if node.collapsed { "+" } else { "-" };
        let _ = writeln!(
            out,
            r#"      <text x="{:.1}" y="{:.1}" fill="{LABEL_COLOR}" font-size="12" text-anchor="end" dominant-baseline="middle">{marker}</text>"#,
            node.x + node.width - 8.0,
            node.y + node.height / 2.0,
        );
    }
    out.push_str("    </g>\n");
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
