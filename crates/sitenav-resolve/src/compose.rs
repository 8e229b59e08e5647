//! Navbar and footer composition.
//!
//! Merges static items with sidebar entry points resolved against the
//! annotated forests. Author order is preserved; items are never
//! deduplicated. Entry points that yield no candidate URL are recorded as
//! findings and fed to the enforcer together with the validation findings,
//! before composition completes.

use sitenav_registry::{DocRegistry, Lookup};

use crate::ResolveOptions;
use crate::policy::{BROKEN_LINK_URL, Finding, FindingKind, FindingOrigin};
use crate::resolved::{FooterColumn, FooterItem, NavbarItem, normalize_url};
use crate::spec::{EntryTarget, ItemLink, NavigationSpec};
use crate::validate::{CheckedNode, CheckedSidebar, CheckedTarget};

/// Compose navbar and footer from the spec and the annotated forests.
pub(crate) fn compose(
    spec: &NavigationSpec,
    checked: &[CheckedSidebar],
    registry: &dyn DocRegistry,
    options: &ResolveOptions,
    findings: &mut Vec<Finding>,
) -> (Vec<NavbarItem>, Vec<FooterColumn>) {
    let navbar = spec
        .navbar
        .iter()
        .map(|item| NavbarItem {
            label: item.label.clone(),
            url: resolve_link(
                &item.link,
                FindingOrigin::Navbar {
                    label: item.label.clone(),
                },
                checked,
                registry,
                options,
                findings,
            ),
            position: item.position,
        })
        .collect();

    let footer = spec
        .footer
        .iter()
        .map(|column| FooterColumn {
            title: column.title.clone(),
            items: column
                .items
                .iter()
                .map(|item| FooterItem {
                    label: item.label.clone(),
                    url: resolve_link(
                        &item.link,
                        FindingOrigin::Footer {
                            label: item.label.clone(),
                        },
                        checked,
                        registry,
                        options,
                        findings,
                    ),
                })
                .collect(),
        })
        .collect();

    (navbar, footer)
}

/// Resolve one navbar/footer link to a concrete URL.
///
/// Failures record a finding and fall back to the broken-link sentinel so
/// the composed model stays renderable under non-fatal policies.
fn resolve_link(
    link: &ItemLink,
    origin: FindingOrigin,
    checked: &[CheckedSidebar],
    registry: &dyn DocRegistry,
    options: &ResolveOptions,
    findings: &mut Vec<Finding>,
) -> String {
    match link {
        ItemLink::Href(href) => normalize_url(href, options),
        ItemLink::SidebarRef { sidebar, target } => {
            let entry = checked
                .iter()
                .find(|s| &s.name == sidebar)
                .and_then(|s| entry_point_url(&s.nodes, target, registry, origin.clone(), findings));

            match entry {
                Some(url) => normalize_url(&url, options),
                None => {
                    findings.push(Finding {
                        origin,
                        kind: FindingKind::EmptyEntryPoint {
                            sidebar: sidebar.clone(),
                        },
                    });
                    BROKEN_LINK_URL.to_owned()
                }
            }
        }
    }
}

/// Apply an entry-point rule to an annotated forest.
fn entry_point_url(
    nodes: &[CheckedNode],
    target: &EntryTarget,
    registry: &dyn DocRegistry,
    origin: FindingOrigin,
    findings: &mut Vec<Finding>,
) -> Option<String> {
    match target {
        EntryTarget::FirstDoc => first_doc_url(nodes).map(str::to_owned),
        EntryTarget::CategoryIndex => first_category_index_url(nodes).map(str::to_owned),
        EntryTarget::Doc(id) => match registry.lookup(id) {
            Lookup::Unique(entry) => Some(entry.url),
            Lookup::NotFound => {
                findings.push(Finding {
                    origin,
                    kind: FindingKind::Dangling { id: id.clone() },
                });
                // The dangling finding already covers this item; resolve to
                // the sentinel without an extra empty-entry-point finding.
                Some(BROKEN_LINK_URL.to_owned())
            }
            Lookup::Ambiguous(candidates) => {
                findings.push(Finding {
                    origin,
                    kind: FindingKind::Ambiguous {
                        id: id.clone(),
                        candidates,
                    },
                });
                Some(BROKEN_LINK_URL.to_owned())
            }
        },
    }
}

/// First valid document target in pre-order.
///
/// A navigable category's landing counts when the category is visited,
/// before its children.
fn first_doc_url(nodes: &[CheckedNode]) -> Option<&str> {
    for node in nodes {
        match node {
            CheckedNode::Doc {
                target: CheckedTarget::Valid { url },
                ..
            } => return Some(url),
            CheckedNode::Doc { .. } | CheckedNode::External { .. } => {}
            CheckedNode::Category { landing, items, .. } => {
                if let Some(CheckedTarget::Valid { url }) = landing {
                    return Some(url);
                }
                if let Some(url) = first_doc_url(items) {
                    return Some(url);
                }
            }
        }
    }
    None
}

/// Landing URL of the first navigable category in pre-order.
fn first_category_index_url(nodes: &[CheckedNode]) -> Option<&str> {
    for node in nodes {
        if let CheckedNode::Category { landing, items, .. } = node {
            if let Some(CheckedTarget::Valid { url }) = landing {
                return Some(url);
            }
            if let Some(url) = first_category_index_url(items) {
                return Some(url);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sitenav_registry::InMemoryRegistry;

    use crate::builder::build_forests;
    use crate::policy::LinkPolicy;
    use crate::spec::{FooterColumnSpec, FooterItemSpec, NavbarItemSpec, NavbarPosition, SidebarSpec};
    use crate::validate::validate_forests;

    use super::*;

    fn sidebar_ref(label: &str, sidebar: &str, target: EntryTarget) -> NavbarItemSpec {
        NavbarItemSpec {
            label: label.to_owned(),
            link: ItemLink::SidebarRef {
                sidebar: sidebar.to_owned(),
                target,
            },
            position: NavbarPosition::Left,
        }
    }

    fn run(
        spec: &NavigationSpec,
        registry: &InMemoryRegistry,
    ) -> (Vec<NavbarItem>, Vec<FooterColumn>, Vec<Finding>) {
        let options = ResolveOptions {
            policy: LinkPolicy::Warn,
            ..Default::default()
        };
        let built = build_forests(spec).unwrap();
        let report = validate_forests(&built, registry, &options);
        let mut findings = report.findings;
        let (navbar, footer) = compose(spec, &report.sidebars, registry, &options, &mut findings);
        (navbar, footer, findings)
    }

    #[test]
    fn test_first_doc_entry_point_resolves_first_valid_leaf() {
        let registry = InMemoryRegistry::new()
            .with_doc("doc1", "One", "/docs/doc1")
            .with_doc("doc2", "Two", "/docs/doc2");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "catA",
                vec![json!({"type": "category", "label": "catA", "items": ["doc1", "doc2"]})],
            )],
            navbar: vec![sidebar_ref("Docs", "catA", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert!(findings.is_empty());
        assert_eq!(navbar[0].url, "/docs/doc1");
    }

    #[test]
    fn test_first_doc_skips_dangling_leaves() {
        let registry = InMemoryRegistry::new().with_doc("doc2", "Two", "/docs/doc2");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("docs", vec![json!("missing"), json!("doc2")])],
            navbar: vec![sidebar_ref("Docs", "docs", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, _) = run(&spec, &registry);

        assert_eq!(navbar[0].url, "/docs/doc2");
    }

    #[test]
    fn test_category_landing_counts_before_children() {
        let registry = InMemoryRegistry::new()
            .with_doc("guides/README", "Guides", "/docs/guides")
            .with_doc("guides/setup", "Setup", "/docs/guides/setup");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "guides",
                vec![json!({
                    "type": "category",
                    "label": "Guides",
                    "link": {"type": "doc", "id": "guides/README"},
                    "items": ["guides/setup"],
                })],
            )],
            navbar: vec![sidebar_ref("Guides", "guides", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, _) = run(&spec, &registry);

        assert_eq!(navbar[0].url, "/docs/guides");
    }

    #[test]
    fn test_category_index_entry_point() {
        let registry = InMemoryRegistry::new().with_doc("intro", "Intro", "/docs/intro");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "docs",
                vec![
                    json!("intro"),
                    json!({
                        "type": "category",
                        "label": "CLI Reference",
                        "link": {"type": "generated-index"},
                        "items": [],
                    }),
                ],
            )],
            navbar: vec![sidebar_ref("Reference", "docs", EntryTarget::CategoryIndex)],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert!(findings.is_empty());
        assert_eq!(navbar[0].url, "/docs/category/cli-reference");
    }

    #[test]
    fn test_explicit_doc_entry_point() {
        let registry = InMemoryRegistry::new().with_doc("glossary", "Glossary", "/docs/glossary");
        let spec = NavigationSpec {
            footer: vec![FooterColumnSpec {
                title: "Docs".to_owned(),
                items: vec![FooterItemSpec {
                    label: "Glossary".to_owned(),
                    link: ItemLink::SidebarRef {
                        sidebar: "reference".to_owned(),
                        target: EntryTarget::Doc("glossary".to_owned()),
                    },
                }],
            }],
            sidebars: vec![SidebarSpec::new("reference", vec![json!("glossary")])],
            ..Default::default()
        };

        let (_, footer, findings) = run(&spec, &registry);

        assert!(findings.is_empty());
        assert_eq!(footer[0].items[0].url, "/docs/glossary");
    }

    #[test]
    fn test_empty_sidebar_records_empty_entry_point_finding() {
        let registry = InMemoryRegistry::new();
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("empty", vec![])],
            navbar: vec![sidebar_ref("Docs", "empty", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert_eq!(navbar[0].url, BROKEN_LINK_URL);
        assert_eq!(
            findings.last().unwrap().kind,
            FindingKind::EmptyEntryPoint {
                sidebar: "empty".to_owned()
            }
        );
    }

    #[test]
    fn test_entirely_dangling_sidebar_records_finding() {
        let registry = InMemoryRegistry::new();
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("docs", vec![json!("missing")])],
            navbar: vec![sidebar_ref("Docs", "docs", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert_eq!(navbar[0].url, BROKEN_LINK_URL);
        // Dangling from validation plus the empty entry point from composition.
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_unknown_sidebar_reference_records_finding() {
        let registry = InMemoryRegistry::new();
        let spec = NavigationSpec {
            navbar: vec![sidebar_ref("Docs", "no-such-sidebar", EntryTarget::FirstDoc)],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert_eq!(navbar[0].url, BROKEN_LINK_URL);
        assert_eq!(findings.len(), 1);
        let FindingOrigin::Navbar { label } = &findings[0].origin else {
            panic!("expected navbar origin");
        };
        assert_eq!(label, "Docs");
    }

    #[test]
    fn test_fixed_links_pass_through_in_order() {
        let registry = InMemoryRegistry::new();
        let spec = NavigationSpec {
            navbar: vec![
                NavbarItemSpec {
                    label: "Blog".to_owned(),
                    link: ItemLink::Href("/blog".to_owned()),
                    position: NavbarPosition::Right,
                },
                NavbarItemSpec {
                    label: "GitHub".to_owned(),
                    link: ItemLink::Href("https://github.com/example".to_owned()),
                    position: NavbarPosition::Right,
                },
            ],
            ..Default::default()
        };

        let (navbar, _, findings) = run(&spec, &registry);

        assert!(findings.is_empty());
        let labels: Vec<_> = navbar.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Blog", "GitHub"]);
        assert_eq!(navbar[0].position, NavbarPosition::Right);
        assert_eq!(navbar[1].url, "https://github.com/example");
    }
}
