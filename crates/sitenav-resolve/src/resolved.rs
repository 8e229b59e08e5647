//! Resolved navigation model and URL helpers.
//!
//! [`ResolvedNavigation`] is the immutable output of a resolution pass:
//! the sidebar forests with every reference replaced by a concrete URL,
//! plus the composed navbar and footer. It serializes directly for the
//! rendering collaborator.

use serde::Serialize;

use crate::ResolveOptions;
use crate::policy::BROKEN_LINK_URL;
use crate::spec::NavbarPosition;
use crate::validate::{CheckedNode, CheckedSidebar, CheckedTarget};

/// Final navigation model, rebuilt fresh on every pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedNavigation {
    /// Resolved sidebars, in declaration order.
    pub sidebars: Vec<ResolvedSidebar>,
    /// Composed navbar, in author order.
    pub navbar: Vec<NavbarItem>,
    /// Composed footer columns, in author order.
    pub footer: Vec<FooterColumn>,
    /// Rendering hints, passed through unchanged.
    pub hints: RenderHints,
}

impl ResolvedNavigation {
    /// Look up a resolved sidebar by name.
    #[must_use]
    pub fn sidebar(&self, name: &str) -> Option<&ResolvedSidebar> {
        self.sidebars.iter().find(|s| s.name == name)
    }
}

/// One resolved sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedSidebar {
    /// Sidebar name.
    pub name: String,
    /// Resolved nodes, in author order.
    pub items: Vec<ResolvedNode>,
}

/// A resolved sidebar node; every reference is a concrete URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedNode {
    /// Document link.
    Doc {
        /// Display label.
        label: String,
        /// Concrete URL (the sentinel for broken references).
        url: String,
    },
    /// Category, navigable when `url` is set.
    Category {
        /// Display label.
        label: String,
        /// Landing URL for navigable categories.
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        /// Children, in author order.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        items: Vec<ResolvedNode>,
    },
    /// External link, passed through untouched.
    Link {
        /// Display label.
        label: String,
        /// External URL.
        href: String,
    },
}

/// Composed navbar item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Concrete URL.
    pub url: String,
    /// Placement hint, passed through unchanged.
    pub position: NavbarPosition,
}

/// Composed footer column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterColumn {
    /// Column title.
    pub title: String,
    /// Items, in author order.
    pub items: Vec<FooterItem>,
}

/// Composed footer item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FooterItem {
    /// Display label.
    pub label: String,
    /// Concrete URL.
    pub url: String,
}

/// Sidebar rendering hints, not interpreted by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderHints {
    /// Sidebar can be hidden by the reader.
    pub hideable: bool,
    /// Collapse sibling categories when one expands.
    pub auto_collapse_categories: bool,
}

/// Turn annotated forests into the final sidebar model.
///
/// Broken targets resolve to [`BROKEN_LINK_URL`]; valid internal URLs are
/// trailing-slash normalized per the options.
pub(crate) fn finalize_sidebars(
    checked: &[CheckedSidebar],
    options: &ResolveOptions,
) -> Vec<ResolvedSidebar> {
    checked
        .iter()
        .map(|sidebar| ResolvedSidebar {
            name: sidebar.name.clone(),
            items: finalize_nodes(&sidebar.nodes, options),
        })
        .collect()
}

fn finalize_nodes(nodes: &[CheckedNode], options: &ResolveOptions) -> Vec<ResolvedNode> {
    nodes
        .iter()
        .map(|node| match node {
            CheckedNode::Doc { label, target } => ResolvedNode::Doc {
                label: label.clone(),
                url: target_url(target, options),
            },
            CheckedNode::Category {
                label,
                landing,
                items,
            } => ResolvedNode::Category {
                label: label.clone(),
                url: landing.as_ref().map(|t| target_url(t, options)),
                items: finalize_nodes(items, options),
            },
            CheckedNode::External { label, href } => ResolvedNode::Link {
                label: label.clone(),
                href: href.clone(),
            },
        })
        .collect()
}

fn target_url(target: &CheckedTarget, options: &ResolveOptions) -> String {
    match target {
        CheckedTarget::Valid { url } => normalize_url(url, options),
        CheckedTarget::Broken => BROKEN_LINK_URL.to_owned(),
    }
}

/// Apply the trailing-slash convention to an internal URL.
///
/// Only site-absolute paths are touched; external URLs and the broken-link
/// sentinel pass through unchanged.
pub(crate) fn normalize_url(url: &str, options: &ResolveOptions) -> String {
    if !options.trailing_slash || !url.starts_with('/') || url.ends_with('/') {
        return url.to_owned();
    }
    format!("{url}/")
}

/// URL of an auto-generated category index page.
pub(crate) fn generated_index_url(base_url: &str, label: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}/docs/category/{}", slugify(label))
}

/// Lowercased, hyphen-separated slug of a display label.
fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_hyphen = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
