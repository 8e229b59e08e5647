//! Raw navigation specification as authored.
//!
//! Sidebars arrive as ordered lists of untyped JSON-like values; the
//! [builder](crate::builder) turns them into typed trees and reports
//! malformed shapes with full path context. Navbar and footer items are
//! already typed here because their shapes are flat.
//!
//! Sidebar declaration order and item order are significant throughout:
//! they determine render order and the order findings are reported in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete declarative navigation input for one resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationSpec {
    /// Named sidebars, in declaration order.
    pub sidebars: Vec<SidebarSpec>,
    /// Navbar items, in declaration order.
    pub navbar: Vec<NavbarItemSpec>,
    /// Footer link columns, in declaration order.
    pub footer: Vec<FooterColumnSpec>,
}

impl NavigationSpec {
    /// Look up a sidebar by name.
    #[must_use]
    pub fn sidebar(&self, name: &str) -> Option<&SidebarSpec> {
        self.sidebars.iter().find(|s| s.name == name)
    }
}

/// One named sidebar with its raw node forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarSpec {
    /// Unique sidebar name (e.g., "guidesSidebar").
    pub name: String,
    /// Raw nodes as authored, in order.
    pub nodes: Vec<Value>,
}

impl SidebarSpec {
    /// Create a sidebar spec from raw nodes.
    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }
}

/// Navbar item: a label plus either a fixed link or a sidebar entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavbarItemSpec {
    /// Display label.
    pub label: String,
    /// Link target.
    pub link: ItemLink,
    /// Navbar placement hint, passed through unchanged.
    pub position: NavbarPosition,
}

/// Footer column with a title and its items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterColumnSpec {
    /// Column title.
    pub title: String,
    /// Items in author order.
    pub items: Vec<FooterItemSpec>,
}

/// Footer item: a label plus either a fixed link or a sidebar entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterItemSpec {
    /// Display label.
    pub label: String,
    /// Link target.
    pub link: ItemLink,
}

/// Link target of a navbar or footer item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemLink {
    /// Fixed URL: external (`https://...`) or site-internal (`/blog`).
    Href(String),
    /// Reference to a sidebar, resolved at composition time.
    SidebarRef {
        /// Name of the referenced sidebar.
        sidebar: String,
        /// How to pick the concrete URL.
        target: EntryTarget,
    },
}

/// Entry-point rule for a sidebar reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EntryTarget {
    /// First valid document in pre-order traversal.
    #[default]
    FirstDoc,
    /// Landing URL of the first valid category link in pre-order.
    CategoryIndex,
    /// Explicit document identifier.
    Doc(String),
}

/// Navbar placement hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Right-aligned.
    Right,
}
