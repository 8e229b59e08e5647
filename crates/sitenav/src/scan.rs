//! Document discovery by filesystem walking.
//!
//! Walks the docs source directory and builds an [`InMemoryRegistry`]
//! snapshot: one entry per markdown file, identified by its
//! extension-stripped relative path (e.g., `guides/installation/README`).
//! Titles come from the first H1 heading, falling back to the file stem.
//!
//! `README.md` files collapse to their directory URL and become category
//! index documents.

use std::path::Path;

use ignore::WalkBuilder;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use sitenav_registry::InMemoryRegistry;

use crate::error::CliError;

/// Scan a docs directory into a registry snapshot.
///
/// Hidden files, underscore-prefixed partials, and anything matched by
/// `.gitignore` are skipped. Files are visited in path order so registry
/// insertion order is deterministic.
///
/// # Errors
///
/// Returns an error if the source directory doesn't exist or a file can't
/// be read.
pub(crate) fn scan_docs(source_dir: &Path, base_url: &str) -> Result<InMemoryRegistry, CliError> {
    if !source_dir.is_dir() {
        return Err(CliError::Scan(format!(
            "docs source directory not found: {}",
            source_dir.display()
        )));
    }

    let mut registry = InMemoryRegistry::new();
    let walker = WalkBuilder::new(source_dir)
        .sort_by_file_path(std::cmp::Ord::cmp)
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| CliError::Scan(e.to_string()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        // Underscore-prefixed files are partials, not documents.
        if path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('_'))
        {
            continue;
        }

        let Some(id) = doc_id(source_dir, path) else {
            continue;
        };
        let content = std::fs::read_to_string(path)?;
        let title = extract_title(&content).unwrap_or_else(|| fallback_title(&id));
        let url = doc_url(base_url, &id);
        registry = registry.with_doc(id, title, url);
    }

    tracing::debug!(count = registry.len(), "Scanned docs directory");
    Ok(registry)
}

/// Document identifier: relative path without the `.md` extension.
fn doc_id(source_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(source_dir).ok()?;
    let id = relative.to_string_lossy();
    let id = id.strip_suffix(".md").unwrap_or(&id);
    // Normalize separators so ids match sidebar references on any platform.
    Some(id.replace(std::path::MAIN_SEPARATOR, "/"))
}

/// Build the site URL for a document.
///
/// `README` segments collapse to the containing directory:
/// - `intro` -> `{base}/docs/intro`
/// - `guides/installation/README` -> `{base}/docs/guides/installation`
/// - `README` -> `{base}/docs`
fn doc_url(base_url: &str, id: &str) -> String {
    let path = id.strip_suffix("/README").unwrap_or(id);
    let path = if path == "README" { "" } else { path };
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        format!("{base}/docs")
    } else {
        format!("{base}/docs/{path}")
    }
}

/// Extract the first H1 heading text from markdown content.
fn extract_title(content: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();
    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = title.trim();
                if title.is_empty() {
                    return None;
                }
                return Some(title.to_owned());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }
    None
}

/// Fallback title from the last non-README path segment.
fn fallback_title(id: &str) -> String {
    let id = id.strip_suffix("/README").unwrap_or(id);
    id.rsplit('/').next().unwrap_or(id).to_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use sitenav_registry::{DocEntry, DocRegistry, Lookup};

    use super::*;

    fn unique(registry: &InMemoryRegistry, id: &str) -> DocEntry {
        match registry.lookup(id) {
            Lookup::Unique(entry) => entry,
            other => panic!("expected unique entry for {id}, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let err = scan_docs(Path::new("/nonexistent/docs"), "/").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_scan_builds_registry_from_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "# Introduction\n\nHello.\n").unwrap();
        fs::create_dir_all(dir.path().join("guides/installation")).unwrap();
        fs::write(
            dir.path().join("guides/installation/README.md"),
            "# Installation\n",
        )
        .unwrap();
        fs::write(dir.path().join("guides/upgrade.md"), "no heading here\n").unwrap();

        let registry = scan_docs(dir.path(), "/crs/").unwrap();

        assert_eq!(
            unique(&registry, "intro"),
            DocEntry {
                id: "intro".to_owned(),
                title: "Introduction".to_owned(),
                url: "/crs/docs/intro".to_owned(),
                category_index: false,
            }
        );
        let readme = unique(&registry, "guides/installation/README");
        assert_eq!(readme.url, "/crs/docs/guides/installation");
        assert!(readme.category_index);
        // No H1, so the title falls back to the file stem.
        assert_eq!(unique(&registry, "guides/upgrade").title, "upgrade");
    }

    #[test]
    fn test_scan_skips_non_markdown_and_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "# Intro\n").unwrap();
        fs::write(dir.path().join("diagram.png"), [0u8; 4]).unwrap();
        fs::write(dir.path().join(".draft.md"), "# Draft\n").unwrap();
        fs::write(dir.path().join("_partial.md"), "# Partial\n").unwrap();

        let registry = scan_docs(dir.path(), "/").unwrap();

        assert_eq!(registry.list_all(), vec!["intro".to_owned()]);
    }

    #[test]
    fn test_scan_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "# B\n").unwrap();
        fs::write(dir.path().join("a.md"), "# A\n").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();
        fs::write(dir.path().join("c/d.md"), "# D\n").unwrap();

        let registry = scan_docs(dir.path(), "/").unwrap();

        assert_eq!(
            registry.list_all(),
            vec!["a".to_owned(), "b".to_owned(), "c/d".to_owned()]
        );
    }

    #[test]
    fn test_doc_url_collapses_readme() {
        assert_eq!(doc_url("/", "intro"), "/docs/intro");
        assert_eq!(doc_url("/crs/", "guides/README"), "/crs/docs/guides");
        assert_eq!(doc_url("/crs/", "README"), "/crs/docs");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello World\n"), Some("Hello World".to_owned()));
        assert_eq!(
            extract_title("intro text\n\n# Later Heading\n"),
            Some("Later Heading".to_owned())
        );
        assert_eq!(extract_title("## Only H2\n"), None);
        assert_eq!(
            extract_title("# `code` title\n"),
            Some("code title".to_owned())
        );
        assert_eq!(extract_title(""), None);
    }
}
