//! Reference validation against the document registry.
//!
//! Walks each built forest and classifies every doc reference and category
//! landing as valid, dangling, or ambiguous. External links are never
//! looked up. Each reference is validated independently against the
//! registry snapshot, so the result is deterministic and order-independent
//! across references; findings are accumulated rather than thrown so a
//! single pass reports every broken reference.

use std::fmt;

use sitenav_registry::{DocRegistry, Lookup};

use crate::ResolveOptions;
use crate::builder::BuiltSidebar;
use crate::node::{CategoryLanding, NodePath, SidebarNode};
use crate::policy::{Finding, FindingKind, FindingOrigin};
use crate::resolved::generated_index_url;

/// A reference target after registry lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CheckedTarget {
    /// Reference resolved to a concrete URL.
    Valid { url: String },
    /// Dangling or ambiguous; resolves to the sentinel under non-fatal policies.
    Broken,
}

/// A sidebar node with every reference classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CheckedNode {
    Doc {
        label: String,
        target: CheckedTarget,
    },
    Category {
        label: String,
        /// The category's own landing target, if it was declared navigable.
        landing: Option<CheckedTarget>,
        items: Vec<CheckedNode>,
    },
    External {
        label: String,
        href: String,
    },
}

/// An annotated sidebar forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CheckedSidebar {
    pub(crate) name: String,
    pub(crate) nodes: Vec<CheckedNode>,
}

/// Duplicate sibling menu entry: same display label and same target.
///
/// A validation warning, never a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub sidebar: String,
    pub path: NodePath,
    pub label: String,
}

impl fmt::Display for DuplicateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sidebar '{}', node {}: duplicate menu entry '{}'",
            self.sidebar, self.path, self.label
        )
    }
}

/// Output of a validation pass over all sidebars.
#[derive(Clone, Debug)]
pub(crate) struct ValidationReport {
    pub(crate) sidebars: Vec<CheckedSidebar>,
    /// Findings in sidebar-declaration order, then node-path (pre-order).
    pub(crate) findings: Vec<Finding>,
    pub(crate) duplicates: Vec<DuplicateEntry>,
}

struct Validator<'a> {
    registry: &'a dyn DocRegistry,
    options: &'a ResolveOptions,
    findings: Vec<Finding>,
    duplicates: Vec<DuplicateEntry>,
}

/// Classify every reference in every sidebar forest.
pub(crate) fn validate_forests(
    built: &[BuiltSidebar],
    registry: &dyn DocRegistry,
    options: &ResolveOptions,
) -> ValidationReport {
    let mut validator = Validator {
        registry,
        options,
        findings: Vec::new(),
        duplicates: Vec::new(),
    };

    let sidebars = built
        .iter()
        .map(|sidebar| CheckedSidebar {
            name: sidebar.name.clone(),
            nodes: validator.check_items(&sidebar.name, &sidebar.nodes, &NodePath::root()),
        })
        .collect();

    ValidationReport {
        sidebars,
        findings: validator.findings,
        duplicates: validator.duplicates,
    }
}

impl Validator<'_> {
    fn check_items(
        &mut self,
        sidebar: &str,
        items: &[SidebarNode],
        parent: &NodePath,
    ) -> Vec<CheckedNode> {
        let checked: Vec<(NodePath, CheckedNode)> = items
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let path = parent.child(node.segment(index));
                let node = self.check_node(sidebar, node, &path);
                (path, node)
            })
            .collect();

        // Duplicate detection runs on checked nodes, after labels pick up
        // registry titles, so a bare id and a labeled reference to the same
        // document compare equal.
        self.flag_duplicate_siblings(sidebar, &checked);

        checked.into_iter().map(|(_, node)| node).collect()
    }

    fn check_node(&mut self, sidebar: &str, node: &SidebarNode, path: &NodePath) -> CheckedNode {
        match node {
            SidebarNode::Doc { id, label } => {
                let (target, title) = self.check_reference(sidebar, id, path);
                let label = label
                    .clone()
                    .or(title)
                    .unwrap_or_else(|| id.clone());
                CheckedNode::Doc { label, target }
            }
            SidebarNode::Category { label, items } => CheckedNode::Category {
                label: label.clone(),
                landing: None,
                items: self.check_items(sidebar, items, path),
            },
            SidebarNode::CategoryLink { label, link, items } => {
                let landing = match link {
                    CategoryLanding::Doc(id) => self.check_reference(sidebar, id, path).0,
                    // Generated indexes always exist; their URL is derived
                    // from the category label.
                    CategoryLanding::GeneratedIndex => CheckedTarget::Valid {
                        url: generated_index_url(&self.options.base_url, label),
                    },
                };
                CheckedNode::Category {
                    label: label.clone(),
                    landing: Some(landing),
                    items: self.check_items(sidebar, items, path),
                }
            }
            SidebarNode::External { label, href } => CheckedNode::External {
                label: label.clone(),
                href: href.clone(),
            },
        }
    }

    /// Look up one reference; records a finding when it does not resolve.
    fn check_reference(
        &mut self,
        sidebar: &str,
        id: &str,
        path: &NodePath,
    ) -> (CheckedTarget, Option<String>) {
        let origin = || FindingOrigin::Sidebar {
            sidebar: sidebar.to_owned(),
            path: path.clone(),
        };

        match self.registry.lookup(id) {
            Lookup::Unique(entry) => (
                CheckedTarget::Valid { url: entry.url },
                Some(entry.title),
            ),
            Lookup::NotFound => {
                self.findings.push(Finding {
                    origin: origin(),
                    kind: FindingKind::Dangling { id: id.to_owned() },
                });
                (CheckedTarget::Broken, None)
            }
            Lookup::Ambiguous(candidates) => {
                self.findings.push(Finding {
                    origin: origin(),
                    kind: FindingKind::Ambiguous {
                        id: id.to_owned(),
                        candidates,
                    },
                });
                (CheckedTarget::Broken, None)
            }
        }
    }

    /// Warn about sibling nodes sharing both display label and target.
    fn flag_duplicate_siblings(&mut self, sidebar: &str, items: &[(NodePath, CheckedNode)]) {
        for (index, (path, node)) in items.iter().enumerate() {
            let Some(key) = entry_key(node) else {
                continue;
            };
            let duplicate = items[..index]
                .iter()
                .any(|(_, prev)| entry_key(prev) == Some(key.clone()));
            if duplicate {
                tracing::warn!(
                    sidebar,
                    %path,
                    label = key.0,
                    "Duplicate sibling menu entry"
                );
                self.duplicates.push(DuplicateEntry {
                    sidebar: sidebar.to_owned(),
                    path: path.clone(),
                    label: key.0,
                });
            }
        }
    }
}

/// (resolved display label, target URL) key used for duplicate detection.
///
/// Purely structural categories have no target, and broken references are
/// already reported as findings; neither is flagged.
fn entry_key(node: &CheckedNode) -> Option<(String, String)> {
    match node {
        CheckedNode::Doc {
            label,
            target: CheckedTarget::Valid { url },
        } => Some((label.clone(), url.clone())),
        CheckedNode::Category {
            label,
            landing: Some(CheckedTarget::Valid { url }),
            ..
        } => Some((label.clone(), url.clone())),
        CheckedNode::Doc { .. } | CheckedNode::Category { .. } => None,
        CheckedNode::External { label, href } => Some((label.clone(), href.clone())),
    }
}
