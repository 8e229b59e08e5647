//! Registry trait and lookup result types.
//!
//! # Identifier Convention
//!
//! Document identifiers are slash-separated logical ids, not file paths:
//! - `"intro"` - top-level document
//! - `"guides/installation/README"` - category landing document
//!
//! Registry implementations handle the mapping from ids to their internal
//! storage format. URLs returned in [`DocEntry`] are site-absolute paths
//! (e.g. `"/docs/intro"`).

use serde::{Deserialize, Serialize};

/// A document known to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Logical identifier (e.g., "intro", "guides/installation/README").
    pub id: String,
    /// Document title.
    pub title: String,
    /// Site-absolute URL path (e.g., "/docs/intro").
    pub url: String,
    /// True if this document is a category landing page.
    pub category_index: bool,
}

/// Result of a registry lookup.
///
/// A registry that spans multiple locales or versions may legitimately hold
/// several documents under one identifier; such lookups report [all
/// candidates](Lookup::Ambiguous) rather than picking one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// No document with this identifier.
    NotFound,
    /// Exactly one document matches.
    Unique(DocEntry),
    /// Multiple documents share this identifier.
    Ambiguous(Vec<DocEntry>),
}

/// Read-only document lookup for navigation resolution.
///
/// Implementations are snapshots: the answer for a given id must not change
/// for the lifetime of a resolution pass.
pub trait DocRegistry: Send + Sync {
    /// Look up a document by identifier.
    fn lookup(&self, id: &str) -> Lookup;

    /// List all known identifiers, in registration order.
    ///
    /// Used only for diagnostics and tooling, never by core resolution.
    fn list_all(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_variants_compare() {
        let entry = DocEntry {
            id: "intro".to_owned(),
            title: "Introduction".to_owned(),
            url: "/docs/intro".to_owned(),
            category_index: false,
        };

        assert_eq!(Lookup::NotFound, Lookup::NotFound);
        assert_eq!(
            Lookup::Unique(entry.clone()),
            Lookup::Unique(entry.clone())
        );
        assert_ne!(Lookup::NotFound, Lookup::Unique(entry));
    }

    #[test]
    fn test_doc_entry_serialization() {
        let entry = DocEntry {
            id: "guides/installation/README".to_owned(),
            title: "Installation".to_owned(),
            url: "/docs/guides/installation".to_owned(),
            category_index: true,
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "guides/installation/README");
        assert_eq!(json["title"], "Installation");
        assert_eq!(json["url"], "/docs/guides/installation");
        assert_eq!(json["category_index"], true);
    }
}
