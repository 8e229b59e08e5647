//! In-memory registry snapshot.
//!
//! Provides [`InMemoryRegistry`] for holding a scanned document corpus in
//! memory. Also used directly in tests via the builder methods.

use std::collections::HashMap;

use crate::registry::{DocEntry, DocRegistry, Lookup};

/// Registry snapshot backed by a `HashMap`.
///
/// Several entries may be registered under the same identifier (e.g. the
/// same document in multiple locales); lookups for such ids report all
/// candidates as [`Lookup::Ambiguous`].
///
/// # Example
///
/// ```
/// use sitenav_registry::{DocRegistry, InMemoryRegistry, Lookup};
///
/// let registry = InMemoryRegistry::new()
///     .with_doc("intro", "Introduction", "/docs/intro")
///     .with_doc("guides/README", "Guides", "/docs/guides");
///
/// assert!(matches!(registry.lookup("intro"), Lookup::Unique(_)));
/// assert!(matches!(registry.lookup("missing"), Lookup::NotFound));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: HashMap<String, Vec<DocEntry>>,
    /// Ids in first-registration order, for deterministic `list_all`.
    order: Vec<String>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, deriving `category_index` from the identifier.
    ///
    /// Identifiers ending in `/README` (or equal to `README`) are treated as
    /// category landing documents, matching the source corpus convention.
    #[must_use]
    pub fn with_doc(
        self,
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let id: String = id.into();
        let category_index = id == "README" || id.ends_with("/README");
        self.with_entry(DocEntry {
            id,
            title: title.into(),
            url: url.into(),
            category_index,
        })
    }

    /// Add a fully specified entry.
    #[must_use]
    pub fn with_entry(mut self, entry: DocEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Insert an entry into the snapshot.
    pub fn insert(&mut self, entry: DocEntry) {
        match self.entries.get_mut(&entry.id) {
            Some(existing) => {
                tracing::debug!(id = %entry.id, "Duplicate identifier registered");
                existing.push(entry);
            }
            None => {
                self.order.push(entry.id.clone());
                self.entries.insert(entry.id.clone(), vec![entry]);
            }
        }
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the registry holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocRegistry for InMemoryRegistry {
    fn lookup(&self, id: &str) -> Lookup {
        match self.entries.get(id).map(Vec::as_slice) {
            None | Some([]) => Lookup::NotFound,
            Some([entry]) => Lookup::Unique(entry.clone()),
            Some(candidates) => Lookup::Ambiguous(candidates.to_vec()),
        }
    }

    fn list_all(&self) -> Vec<String> {
        self.order.clone()
    }
}
