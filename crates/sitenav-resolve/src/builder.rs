//! Sidebar tree builder: raw spec to typed forest.
//!
//! Pure transform with no side effects. Author order is preserved exactly;
//! no node is dropped or reordered. Any shape that does not match one of the
//! four node variants aborts the pass with a [`MalformedNodeError`] naming
//! the sidebar and the offending node's path.

use serde_json::Value;

use crate::node::{CategoryLanding, NodePath, PathSegment, SidebarNode};
use crate::spec::NavigationSpec;

/// Maximum category nesting depth.
///
/// The data model imposes no limit, but pathological nesting is rejected
/// as a structural error before it can exhaust the stack downstream.
pub(crate) const MAX_DEPTH: usize = 64;

/// Structural error in the declarative navigation spec. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Sidebar '{sidebar}', node {path}: {reason}")]
pub struct MalformedNodeError {
    /// Name of the sidebar containing the offending node.
    pub sidebar: String,
    /// Path of the offending node from the forest root.
    pub path: NodePath,
    /// What was wrong with the shape.
    pub reason: String,
}

impl MalformedNodeError {
    fn new(sidebar: &str, path: NodePath, reason: impl Into<String>) -> Self {
        Self {
            sidebar: sidebar.to_owned(),
            path,
            reason: reason.into(),
        }
    }
}

/// A sidebar with its typed node forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuiltSidebar {
    pub(crate) name: String,
    pub(crate) nodes: Vec<SidebarNode>,
}

/// Build typed forests for every sidebar in the spec.
///
/// Sidebar names must be unique; declaration order is preserved.
pub(crate) fn build_forests(spec: &NavigationSpec) -> Result<Vec<BuiltSidebar>, MalformedNodeError> {
    let mut built = Vec::with_capacity(spec.sidebars.len());

    for sidebar in &spec.sidebars {
        if built.iter().any(|b: &BuiltSidebar| b.name == sidebar.name) {
            return Err(MalformedNodeError::new(
                &sidebar.name,
                NodePath::root(),
                "duplicate sidebar name",
            ));
        }

        let nodes = build_items(&sidebar.name, &sidebar.nodes, &NodePath::root(), 0)?;
        built.push(BuiltSidebar {
            name: sidebar.name.clone(),
            nodes,
        });
    }

    Ok(built)
}

/// Build an ordered child sequence.
fn build_items(
    sidebar: &str,
    items: &[Value],
    parent: &NodePath,
    depth: usize,
) -> Result<Vec<SidebarNode>, MalformedNodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, value)| build_node(sidebar, value, parent, index, depth))
        .collect()
}

/// Build a single node from its raw value.
fn build_node(
    sidebar: &str,
    value: &Value,
    parent: &NodePath,
    index: usize,
    depth: usize,
) -> Result<SidebarNode, MalformedNodeError> {
    let path = parent.child(raw_segment(value, index));

    match value {
        // String shorthand for a bare doc reference.
        Value::String(id) => Ok(SidebarNode::Doc {
            id: id.clone(),
            label: None,
        }),
        Value::Object(map) => {
            let node_type = match map.get("type") {
                Some(Value::String(t)) => t.as_str(),
                Some(_) => {
                    return Err(MalformedNodeError::new(
                        sidebar,
                        path,
                        "'type' must be a string",
                    ));
                }
                None => {
                    return Err(MalformedNodeError::new(sidebar, path, "missing 'type' field"));
                }
            };

            match node_type {
                "doc" => build_doc(sidebar, map, path),
                "category" => build_category(sidebar, map, &path, depth),
                "link" => build_external(sidebar, map, path),
                other => Err(MalformedNodeError::new(
                    sidebar,
                    path,
                    format!("unknown node type '{other}'"),
                )),
            }
        }
        _ => Err(MalformedNodeError::new(
            sidebar,
            path,
            "expected a string or a table",
        )),
    }
}

fn build_doc(
    sidebar: &str,
    map: &serde_json::Map<String, Value>,
    path: NodePath,
) -> Result<SidebarNode, MalformedNodeError> {
    let id = require_str(sidebar, map, "id", &path)?;
    let label = optional_str(sidebar, map, "label", &path)?;
    Ok(SidebarNode::Doc { id, label })
}

fn build_category(
    sidebar: &str,
    map: &serde_json::Map<String, Value>,
    path: &NodePath,
    depth: usize,
) -> Result<SidebarNode, MalformedNodeError> {
    if depth + 1 > MAX_DEPTH {
        return Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            format!("categories nested deeper than {MAX_DEPTH} levels"),
        ));
    }

    let label = require_str(sidebar, map, "label", path)?;

    let items = match map.get("items") {
        Some(Value::Array(raw)) => build_items(sidebar, raw, path, depth + 1)?,
        Some(_) => {
            return Err(MalformedNodeError::new(
                sidebar,
                path.clone(),
                "'items' must be an array",
            ));
        }
        // An empty category is permitted.
        None => Vec::new(),
    };

    match map.get("link") {
        None => Ok(SidebarNode::Category { label, items }),
        Some(link) => {
            let link = build_landing(sidebar, link, path)?;
            Ok(SidebarNode::CategoryLink { label, link, items })
        }
    }
}

fn build_landing(
    sidebar: &str,
    value: &Value,
    path: &NodePath,
) -> Result<CategoryLanding, MalformedNodeError> {
    let Value::Object(map) = value else {
        return Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            "'link' must be a table",
        ));
    };

    match map.get("type") {
        Some(Value::String(t)) if t == "doc" => {
            let id = require_str(sidebar, map, "id", path)?;
            Ok(CategoryLanding::Doc(id))
        }
        Some(Value::String(t)) if t == "generated-index" => Ok(CategoryLanding::GeneratedIndex),
        Some(Value::String(t)) => Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            format!("unknown link type '{t}'"),
        )),
        _ => Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            "'link' requires a string 'type' field",
        )),
    }
}

fn build_external(
    sidebar: &str,
    map: &serde_json::Map<String, Value>,
    path: NodePath,
) -> Result<SidebarNode, MalformedNodeError> {
    let label = require_str(sidebar, map, "label", &path)?;
    let href = require_str(sidebar, map, "href", &path)?;
    Ok(SidebarNode::External { label, href })
}

fn require_str(
    sidebar: &str,
    map: &serde_json::Map<String, Value>,
    field: &str,
    path: &NodePath,
) -> Result<String, MalformedNodeError> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            format!("'{field}' must be a string"),
        )),
        None => Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            format!("missing '{field}' field"),
        )),
    }
}

fn optional_str(
    sidebar: &str,
    map: &serde_json::Map<String, Value>,
    field: &str,
    path: &NodePath,
) -> Result<Option<String>, MalformedNodeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(MalformedNodeError::new(
            sidebar,
            path.clone(),
            format!("'{field}' must be a string"),
        )),
    }
}

/// Path segment for a raw value before its type is known.
fn raw_segment(value: &Value, index: usize) -> PathSegment {
    match value.get("label").and_then(Value::as_str) {
        Some(label) => PathSegment::Label(label.to_owned()),
        None => PathSegment::Index(index),
    }
}
