//! Arena-backed trace tree.
//!
//! Nodes live in one flat `Vec` addressed by [`NodeHandle`]. Collapse flags and
//! layout geometry are kept in parallel vectors so that toggling is a single
//! index write and layout is the only pass over the whole tree. Parents are
//! referenced by handle, never owned.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use serde_json::Value;
use shared_types::{NodeDetails, NodeKind, Point, Size};

static NULL: Value = Value::Null;

/// Index of a node inside its [`TraceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    pub const ROOT: NodeHandle = NodeHandle(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Which owned document a node's JSON pointer resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueOrigin {
    /// The trace value handed to the parser
    Source,
    /// A value synthesized during parsing (function wrapper, merged args)
    Synthetic(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValueRef {
    pub(crate) origin: ValueOrigin,
    pub(crate) pointer: String,
}

#[derive(Debug, Clone)]
pub struct TraceNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Depth from the root (root = 0)
    pub level: usize,
    pub parent: Option<NodeHandle>,
    pub children: Vec<NodeHandle>,
    pub(crate) value: ValueRef,
}

impl TraceNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Layout output for one node. `width`/`height` are the subtree footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeGeometry {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn subtree(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct TraceTree {
    source: Value,
    synthetic: Vec<Value>,
    nodes: Vec<TraceNode>,
    index: HashMap<String, NodeHandle>,
    pub(crate) collapsed: Vec<bool>,
    pub(crate) geometry: Vec<Option<NodeGeometry>>,
}

impl TraceTree {
    pub(crate) fn from_parts(
        source: Value,
        synthetic: Vec<Value>,
        nodes: Vec<TraceNode>,
    ) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.contains_key(&node.id) {
                tracing::warn!(
                    id = %node.id,
                    "Duplicate trace node id; lookups resolve to the first occurrence"
                );
                continue;
            }
            index.insert(node.id.clone(), NodeHandle(position));
        }
        let count = nodes.len();
        Self {
            source,
            synthetic,
            nodes,
            index,
            collapsed: vec![false; count],
            geometry: vec![None; count],
        }
    }

    pub fn root(&self) -> NodeHandle {
        NodeHandle::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, handle: NodeHandle) -> &TraceNode {
        &self.nodes[handle.0]
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&TraceNode> {
        self.nodes.get(handle.0)
    }

    /// Handle for `id`. When adversarial keys make two nodes share an id
    /// (an object key `tool-0` beside a `tools` array, or `{"x-a": {"b": ..}}`
    /// beside `{"x": {"a-b": ..}}`), this resolves to the first one discovered
    /// and the later one is reachable only by handle.
    pub fn find(&self, id: &str) -> Option<NodeHandle> {
        self.index.get(id).copied()
    }

    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> {
        (0..self.nodes.len()).map(NodeHandle)
    }

    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        &self.nodes[handle.0].children
    }

    pub fn parent_id(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes[handle.0]
            .parent
            .map(|parent| self.nodes[parent.0].id.as_str())
    }

    /// Walks from the node's parent up to the root.
    pub fn ancestors(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.nodes[handle.0].parent, move |current| {
            self.nodes[current.0].parent
        })
    }

    /// The raw value this node represents.
    pub fn value(&self, handle: NodeHandle) -> &Value {
        let value_ref = &self.nodes[handle.0].value;
        let document = match value_ref.origin {
            ValueOrigin::Source => &self.source,
            ValueOrigin::Synthetic(slot) => match self.synthetic.get(slot) {
                Some(value) => value,
                None => return &NULL,
            },
        };
        if value_ref.pointer.is_empty() {
            return document;
        }
        document.pointer(&value_ref.pointer).unwrap_or(&NULL)
    }

    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn is_collapsed(&self, handle: NodeHandle) -> bool {
        self.collapsed[handle.0]
    }

    pub fn set_collapsed(&mut self, handle: NodeHandle, collapsed: bool) {
        self.collapsed[handle.0] = collapsed;
    }

    /// Collapse every node deeper than `depth`, expand the rest.
    pub fn collapse_below(&mut self, depth: usize) {
        for (flag, node) in self.collapsed.iter_mut().zip(&self.nodes) {
            *flag = node.level > depth;
        }
    }

    pub fn collapsed_ids(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .zip(&self.collapsed)
            .filter(|(_, collapsed)| **collapsed)
            .map(|(node, _)| node.id.clone())
            .collect()
    }

    /// Layout geometry, `None` if the node is hidden or layout has not run.
    pub fn geometry(&self, handle: NodeHandle) -> Option<NodeGeometry> {
        self.geometry[handle.0]
    }

    /// Visible nodes in pre-order, never descending into collapsed nodes.
    pub fn visible(&self) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![NodeHandle::ROOT];
        while let Some(handle) = stack.pop() {
            out.push(handle);
            if !self.collapsed[handle.0] {
                stack.extend(self.nodes[handle.0].children.iter().rev().copied());
            }
        }
        out
    }

    pub fn details(&self, handle: NodeHandle) -> NodeDetails {
        let node = self.node(handle);
        NodeDetails {
            id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            value: self.value(handle).clone(),
        }
    }

    /// The source trace, pretty-printed.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.source).unwrap_or_else(|_| self.source.to_string())
    }

    /// Indented outline of every node, ignoring collapse state.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![NodeHandle::ROOT];
        while let Some(handle) = stack.pop() {
            let node = &self.nodes[handle.0];
            let _ = writeln!(
                out,
                "{:indent$}{} [{}] {}",
                "",
                node.id,
                node.kind,
                node.label,
                indent = node.level * 2
            );
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}
