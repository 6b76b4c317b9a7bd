//! Trace parsing: nested JSON value -> typed [`TraceTree`].
//!
//! Each composite value is expanded in a fixed order: `function`, merged
//! `args`/`kwargs`, `tools` (array order), `result`, then every other
//! object- or array-valued key in document order. Arrays contribute one
//! child per composite element. Ids are the parent id plus a discriminator,
//! so parsing identical input always yields identical ids.
//!
//! `serde_json::Value` owns its children, so input is acyclic by construction.

use serde_json::{Map, Value};
use shared_types::NodeKind;

use crate::tree::{NodeHandle, TraceNode, TraceTree, ValueOrigin, ValueRef};

pub const ROOT_ID: &str = "root";
pub const LABEL_MAX_CHARS: usize = 30;
const ELLIPSIS: &str = "...";

const STRUCTURAL_KEYS: [&str; 5] = ["function", "args", "kwargs", "tools", "result"];

pub struct TraceParser;

impl TraceParser {
    /// Parse a trace value. Total for every JSON value.
    pub fn parse(value: Value) -> TraceTree {
        let mut builder = TreeBuilder::default();
        builder.build(&value);
        let TreeBuilder { nodes, synthetic } = builder;
        tracing::debug!(
            nodes = nodes.len(),
            synthetic = synthetic.len(),
            "Parsed trace"
        );
        TraceTree::from_parts(value, synthetic, nodes)
    }

    /// Parse raw text. Text that is not JSON becomes a single root leaf
    /// holding the text as a string.
    pub fn parse_text(raw: &str) -> TraceTree {
        Self::parse(Self::read_value(raw))
    }

    /// Decode raw trace text, keeping text that is not JSON as a string value.
    pub fn read_value(raw: &str) -> Value {
        serde_json::from_str::<Value>(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Trace is not valid JSON; rendering it as a leaf");
            Value::String(raw.to_string())
        })
    }
}

#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<TraceNode>,
    synthetic: Vec<Value>,
}

impl TreeBuilder {
    fn build(&mut self, value: &Value) {
        let at = ValueRef {
            origin: ValueOrigin::Source,
            pointer: String::new(),
        };
        let root = self.push(ROOT_ID.to_string(), NodeKind::Root, None, value, at.clone());
        self.expand(root, value, &at);
    }

    fn push(
        &mut self,
        id: String,
        kind: NodeKind,
        parent: Option<NodeHandle>,
        value: &Value,
        at: ValueRef,
    ) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        let level = parent.map_or(0, |parent| self.nodes[parent.0].level + 1);
        let label = node_label(value, &id);
        self.nodes.push(TraceNode {
            id,
            kind,
            label,
            level,
            parent,
            children: Vec::new(),
            value: at,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(handle);
        }
        handle
    }

    fn descend(
        &mut self,
        parent: NodeHandle,
        suffix: &str,
        kind: NodeKind,
        value: &Value,
        at: ValueRef,
    ) {
        let id = format!("{}-{suffix}", self.nodes[parent.0].id);
        let handle = self.push(id, kind, Some(parent), value, at.clone());
        self.expand(handle, value, &at);
    }

    /// Reserve a slot for a value built during parsing; filled after its
    /// subtree has been walked.
    fn reserve_synthetic(&mut self) -> usize {
        self.synthetic.push(Value::Null);
        self.synthetic.len() - 1
    }

    fn expand(&mut self, handle: NodeHandle, value: &Value, at: &ValueRef) {
        match value {
            Value::Object(map) => self.expand_object(handle, map, at),
            Value::Array(items) => {
                for (position, item) in items.iter().enumerate() {
                    if is_composite(item) {
                        let token = position.to_string();
                        self.descend(handle, &token, NodeKind::Other, item, at.child(&token));
                    }
                }
            }
            _ => {}
        }
    }

    fn expand_object(&mut self, handle: NodeHandle, map: &Map<String, Value>, at: &ValueRef) {
        if let Some(function) = present(map, "function") {
            let slot = self.reserve_synthetic();
            let mut wrapper = Map::new();
            wrapper.insert("name".to_string(), function.clone());
            let wrapper = Value::Object(wrapper);
            self.descend(
                handle,
                "function",
                NodeKind::Function,
                &wrapper,
                ValueRef::synthetic(slot),
            );
            self.synthetic[slot] = wrapper;
        }

        let args = present(map, "args");
        let kwargs = present(map, "kwargs");
        if args.is_some() || kwargs.is_some() {
            let slot = self.reserve_synthetic();
            let mut merged = Map::new();
            for part in [args, kwargs].into_iter().flatten() {
                merge_arguments(&mut merged, part);
            }
            let merged = Value::Object(merged);
            self.descend(
                handle,
                "args",
                NodeKind::ArgumentBundle,
                &merged,
                ValueRef::synthetic(slot),
            );
            self.synthetic[slot] = merged;
        }

        if let Some(Value::Array(tools)) = map.get("tools") {
            let tools_at = at.child("tools");
            for (position, tool) in tools.iter().enumerate() {
                let token = position.to_string();
                self.descend(
                    handle,
                    &format!("tool-{position}"),
                    NodeKind::Tool,
                    tool,
                    tools_at.child(&token),
                );
            }
        }

        if let Some(result) = present(map, "result") {
            self.descend(handle, "result", NodeKind::Result, result, at.child("result"));
        }

        for (key, value) in map {
            if STRUCTURAL_KEYS.contains(&key.as_str()) || !is_composite(value) {
                continue;
            }
            self.descend(handle, key, NodeKind::Other, value, at.child(key));
        }
    }
}

impl ValueRef {
    fn synthetic(slot: usize) -> Self {
        Self {
            origin: ValueOrigin::Synthetic(slot),
            pointer: String::new(),
        }
    }

    fn child(&self, token: &str) -> Self {
        let mut pointer = String::with_capacity(self.pointer.len() + token.len() + 1);
        pointer.push_str(&self.pointer);
        pointer.push('/');
        pointer.push_str(&token.replace('~', "~0").replace('/', "~1"));
        Self {
            origin: self.origin,
            pointer,
        }
    }
}

fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// A field counts as present when the key exists and is not `null`.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn merge_arguments(merged: &mut Map<String, Value>, part: &Value) {
    match part {
        Value::Object(entries) => {
            for (key, value) in entries {
                merged.insert(key.clone(), value.clone());
            }
        }
        Value::Array(items) => {
            for (position, item) in items.iter().enumerate() {
                merged.insert(position.to_string(), item.clone());
            }
        }
        _ => {}
    }
}

// ── Labels ───────────────────────────────────────────────────────────────────

type LabelRule = fn(&Map<String, Value>) -> Option<String>;

/// Evaluated in order on object values; first match wins.
const LABEL_RULES: [LabelRule; 4] = [by_name, by_input_message, by_type, by_function];

fn by_name(map: &Map<String, Value>) -> Option<String> {
    present(map, "name").map(display_string)
}

fn by_input_message(map: &Map<String, Value>) -> Option<String> {
    present(map, "input_message").map(|message| {
        format!(
            "Input: {}",
            truncate(&display_string(message), LABEL_MAX_CHARS)
        )
    })
}

fn by_type(map: &Map<String, Value>) -> Option<String> {
    present(map, "type").map(display_string)
}

fn by_function(map: &Map<String, Value>) -> Option<String> {
    present(map, "function").map(display_string)
}

fn node_label(value: &Value, id: &str) -> String {
    match value {
        Value::Object(map) => LABEL_RULES
            .iter()
            .find_map(|rule| rule(map))
            .unwrap_or_else(|| path_label(id)),
        Value::Array(_) => path_label(id),
        primitive => truncate(&display_string(primitive), LABEL_MAX_CHARS),
    }
}

/// Last `-`-separated piece of the id, or the whole id.
fn path_label(id: &str) -> String {
    id.rsplit('-').next().unwrap_or(id).to_string()
}

/// Strings verbatim, everything else in JSON form.
pub(crate) fn display_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// First `max_chars` characters, with `...` appended when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
