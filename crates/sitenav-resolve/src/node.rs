//! Typed sidebar node tree.
//!
//! The declarative sidebar specification is parsed into an explicit sum type
//! rather than inspected shape-by-shape downstream, so every consumer can
//! match exhaustively and malformed input is rejected in one place
//! (the [builder](crate::builder)).

use std::fmt;

/// A node in a sidebar forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarNode {
    /// Reference to a registry document.
    Doc {
        /// Document identifier.
        id: String,
        /// Display label override; falls back to the registry title.
        label: Option<String>,
    },
    /// Grouping node without its own navigation target.
    Category {
        /// Display label.
        label: String,
        /// Ordered children.
        items: Vec<SidebarNode>,
    },
    /// Category that is itself navigable via a landing reference.
    CategoryLink {
        /// Display label.
        label: String,
        /// The category's own navigation target.
        link: CategoryLanding,
        /// Ordered children.
        items: Vec<SidebarNode>,
    },
    /// External link, never validated against the registry.
    External {
        /// Display label.
        label: String,
        /// Absolute URL.
        href: String,
    },
}

/// Landing target of a [`SidebarNode::CategoryLink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryLanding {
    /// Landing on a registry document.
    Doc(String),
    /// Auto-generated index page listing the category's children.
    GeneratedIndex,
}

/// One step of a [`NodePath`].
///
/// Labeled nodes are addressed by label, unlabeled ones by their position
/// in the parent's child sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// Child position within the parent sequence.
    Index(usize),
    /// Display label of the node.
    Label(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Location of a node within a sidebar forest, from the root.
///
/// Displays as `[Guides, 1]`: the label of each labeled ancestor, the
/// child index for unlabeled steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// The empty path (forest root).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one step.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Path segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

impl SidebarNode {
    /// The path segment addressing this node at child position `index`.
    ///
    /// Labeled nodes (categories, external links, docs with an explicit
    /// label) are addressed by label; bare doc references by index.
    #[must_use]
    pub(crate) fn segment(&self, index: usize) -> PathSegment {
        match self {
            Self::Doc { label: Some(l), .. }
            | Self::Category { label: l, .. }
            | Self::CategoryLink { label: l, .. }
            | Self::External { label: l, .. } => PathSegment::Label(l.clone()),
            Self::Doc { label: None, .. } => PathSegment::Index(index),
        }
    }
}
