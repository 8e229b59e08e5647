//! Navigation resolution for sitenav.
//!
//! This crate turns an authored [`NavigationSpec`] (sidebar forests, navbar
//! items, footer columns) into a fully resolved [`ResolvedNavigation`] by
//! checking every document reference against a [`DocRegistry`]. Broken and
//! ambiguous references become [`Finding`]s, and a [`LinkPolicy`] decides
//! whether findings fail the pass, warn, or pass silently.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use serde_json::json;
//! use sitenav_registry::InMemoryRegistry;
//! use sitenav_resolve::{NavigationSpec, ResolveOptions, SidebarSpec, resolve};
//!
//! let registry = InMemoryRegistry::new()
//!     .with_doc("intro", "Introduction", "/docs/intro");
//! let spec = NavigationSpec {
//!     sidebars: vec![SidebarSpec::new("docs", vec![json!("intro")])],
//!     ..Default::default()
//! };
//!
//! let navigation = resolve(&spec, &registry, &ResolveOptions::default())?;
//! assert_eq!(navigation.sidebars[0].name, "docs");
//! # Ok(())
//! # }
//! ```

pub(crate) mod builder;
pub(crate) mod compose;
pub(crate) mod navigator;
pub(crate) mod node;
pub(crate) mod policy;
pub(crate) mod resolved;
pub(crate) mod spec;
pub(crate) mod validate;

use sitenav_registry::DocRegistry;

pub use builder::MalformedNodeError;
pub use navigator::Navigator;
pub use node::{CategoryLanding, NodePath, PathSegment, SidebarNode};
pub use policy::{
    BROKEN_LINK_URL, Finding, FindingKind, FindingOrigin, LinkPolicy, ResolutionFailure, enforce,
};
pub use resolved::{
    FooterColumn, FooterItem, NavbarItem, RenderHints, ResolvedNavigation, ResolvedNode,
    ResolvedSidebar,
};
pub use spec::{
    EntryTarget, FooterColumnSpec, FooterItemSpec, ItemLink, NavbarItemSpec, NavbarPosition,
    NavigationSpec, SidebarSpec,
};
pub use validate::DuplicateEntry;

/// Options governing a resolution pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// How findings are enforced at the end of the pass.
    pub policy: LinkPolicy,
    /// Site base URL prefix for generated URLs (e.g. `/crs/`).
    pub base_url: String,
    /// Append a trailing slash to internal URLs.
    pub trailing_slash: bool,
    /// Presentation hints passed through to the resolved model.
    pub hints: RenderHints,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            policy: LinkPolicy::default(),
            base_url: "/".to_owned(),
            trailing_slash: false,
            hints: RenderHints::default(),
        }
    }
}

/// Error from a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A sidebar node did not have a recognizable shape.
    #[error(transparent)]
    Malformed(#[from] MalformedNodeError),
    /// The link policy was `throw` and the pass produced findings.
    #[error(transparent)]
    Broken(#[from] ResolutionFailure),
}

/// Outcome of a resolution pass that got past the policy gate, with the
/// diagnostics the pass accumulated along the way.
///
/// Under the `throw` policy `findings` is always empty; under `warn` and
/// `ignore` it carries every broken reference so callers can report them
/// through their own channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveReport {
    pub navigation: ResolvedNavigation,
    /// Findings in sidebar-declaration order, pre-order within each sidebar,
    /// then navbar and footer items in author order.
    pub findings: Vec<Finding>,
    /// Duplicate sibling menu entries. Warnings under every policy.
    pub duplicates: Vec<DuplicateEntry>,
}

/// Run one full resolution pass, keeping the diagnostics.
///
/// Builds the sidebar forests, validates every reference against the
/// registry, composes navbar and footer, enforces the link policy over the
/// accumulated findings, and finalizes URLs. All-or-nothing: on error no
/// partial model is returned.
pub fn resolve_report(
    spec: &NavigationSpec,
    registry: &dyn DocRegistry,
    options: &ResolveOptions,
) -> Result<ResolveReport, ResolveError> {
    let built = builder::build_forests(spec)?;
    let report = validate::validate_forests(&built, registry, options);

    let mut findings = report.findings;
    let (navbar, footer) = compose::compose(spec, &report.sidebars, registry, options, &mut findings);

    policy::enforce(options.policy, &findings)?;

    Ok(ResolveReport {
        navigation: ResolvedNavigation {
            sidebars: resolved::finalize_sidebars(&report.sidebars, options),
            navbar,
            footer,
            hints: options.hints,
        },
        findings,
        duplicates: report.duplicates,
    })
}

/// Run one full resolution pass.
///
/// Like [`resolve_report`], but returns just the resolved model.
pub fn resolve(
    spec: &NavigationSpec,
    registry: &dyn DocRegistry,
    options: &ResolveOptions,
) -> Result<ResolvedNavigation, ResolveError> {
    resolve_report(spec, registry, options).map(|report| report.navigation)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sitenav_registry::InMemoryRegistry;

    use super::*;

    fn guides_spec() -> NavigationSpec {
        NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "docsSidebar",
                vec![json!({
                    "type": "category",
                    "label": "Guides",
                    "items": ["guides/installation/README", "guides/upgrade"],
                })],
            )],
            ..Default::default()
        }
    }

    fn guides_registry() -> InMemoryRegistry {
        // "guides/upgrade" is deliberately absent.
        InMemoryRegistry::new().with_doc(
            "guides/installation/README",
            "Installation",
            "/docs/guides/installation",
        )
    }

    #[test]
    fn test_throw_policy_fails_on_dangling_reference() {
        let options = ResolveOptions {
            policy: LinkPolicy::Throw,
            ..Default::default()
        };

        let err = resolve(&guides_spec(), &guides_registry(), &options).unwrap_err();

        let ResolveError::Broken(failure) = err else {
            panic!("expected policy failure");
        };
        assert_eq!(failure.findings.len(), 1);
        let rendered = failure.findings[0].to_string();
        assert!(rendered.contains("Sidebar 'docsSidebar'"), "{rendered}");
        assert!(rendered.contains("[Guides, 1]"), "{rendered}");
        assert!(rendered.contains("guides/upgrade"), "{rendered}");
    }

    #[test]
    fn test_warn_policy_substitutes_sentinel_url() {
        let options = ResolveOptions {
            policy: LinkPolicy::Warn,
            ..Default::default()
        };

        let navigation = resolve(&guides_spec(), &guides_registry(), &options).unwrap();

        let ResolvedNode::Category { items, .. } = &navigation.sidebars[0].items[0] else {
            panic!("expected category");
        };
        assert_eq!(
            items[1],
            ResolvedNode::Doc {
                label: "guides/upgrade".to_owned(),
                url: BROKEN_LINK_URL.to_owned(),
            }
        );
    }

    #[test]
    fn test_warn_policy_report_names_every_broken_reference() {
        let options = ResolveOptions {
            policy: LinkPolicy::Warn,
            ..Default::default()
        };

        let report = resolve_report(&guides_spec(), &guides_registry(), &options).unwrap();

        assert_eq!(report.findings.len(), 1);
        let rendered = report.findings[0].to_string();
        assert!(rendered.contains("Sidebar 'docsSidebar'"), "{rendered}");
        assert!(rendered.contains("[Guides, 1]"), "{rendered}");
        assert!(rendered.contains("guides/upgrade"), "{rendered}");
    }

    #[test]
    fn test_throw_policy_report_has_no_findings_on_success() {
        let registry = InMemoryRegistry::new().with_doc("intro", "Introduction", "/docs/intro");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("docs", vec![json!("intro")])],
            ..Default::default()
        };

        let report = resolve_report(&spec, &registry, &ResolveOptions::default()).unwrap();

        assert!(report.findings.is_empty());
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn test_report_surfaces_duplicate_siblings() {
        let registry = InMemoryRegistry::new().with_doc("intro", "Introduction", "/docs/intro");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "docs",
                vec![json!("intro"), json!("intro")],
            )],
            ..Default::default()
        };

        let report = resolve_report(&spec, &registry, &ResolveOptions::default()).unwrap();

        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].label, "Introduction");
    }

    #[test]
    fn test_ignore_policy_returns_same_model_as_warn() {
        let warn = resolve(
            &guides_spec(),
            &guides_registry(),
            &ResolveOptions {
                policy: LinkPolicy::Warn,
                ..Default::default()
            },
        )
        .unwrap();
        let ignore = resolve(
            &guides_spec(),
            &guides_registry(),
            &ResolveOptions {
                policy: LinkPolicy::Ignore,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(warn, ignore);
    }

    #[test]
    fn test_malformed_node_fails_under_every_policy() {
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("docs", vec![json!(42)])],
            ..Default::default()
        };
        let registry = InMemoryRegistry::new();

        for policy in [LinkPolicy::Throw, LinkPolicy::Warn, LinkPolicy::Ignore] {
            let options = ResolveOptions {
                policy,
                ..Default::default()
            };
            let err = resolve(&spec, &registry, &options).unwrap_err();
            assert!(matches!(err, ResolveError::Malformed(_)));
        }
    }

    #[test]
    fn test_full_site_resolves_end_to_end() {
        let registry = InMemoryRegistry::new()
            .with_doc("intro", "Introduction", "/docs/intro")
            .with_doc("guides/README", "Guides", "/docs/guides")
            .with_doc("guides/setup", "Setup", "/docs/guides/setup");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new(
                "docs",
                vec![
                    json!("intro"),
                    json!({
                        "type": "category",
                        "label": "Guides",
                        "link": {"type": "doc", "id": "guides/README"},
                        "items": ["guides/setup"],
                    }),
                ],
            )],
            navbar: vec![
                NavbarItemSpec {
                    label: "Docs".to_owned(),
                    link: ItemLink::SidebarRef {
                        sidebar: "docs".to_owned(),
                        target: EntryTarget::FirstDoc,
                    },
                    position: NavbarPosition::Left,
                },
                NavbarItemSpec {
                    label: "GitHub".to_owned(),
                    link: ItemLink::Href("https://github.com/example/crs".to_owned()),
                    position: NavbarPosition::Right,
                },
            ],
            footer: vec![FooterColumnSpec {
                title: "Learn".to_owned(),
                items: vec![FooterItemSpec {
                    label: "Setup".to_owned(),
                    link: ItemLink::SidebarRef {
                        sidebar: "docs".to_owned(),
                        target: EntryTarget::Doc("guides/setup".to_owned()),
                    },
                }],
            }],
        };
        let options = ResolveOptions {
            policy: LinkPolicy::Throw,
            trailing_slash: true,
            hints: RenderHints {
                hideable: true,
                auto_collapse_categories: false,
            },
            ..Default::default()
        };

        let navigation = resolve(&spec, &registry, &options).unwrap();

        assert_eq!(
            navigation.sidebars[0].items[0],
            ResolvedNode::Doc {
                label: "Introduction".to_owned(),
                url: "/docs/intro/".to_owned(),
            }
        );
        let ResolvedNode::Category { url, items, .. } = &navigation.sidebars[0].items[1] else {
            panic!("expected category");
        };
        assert_eq!(url.as_deref(), Some("/docs/guides/"));
        assert_eq!(items.len(), 1);
        assert_eq!(navigation.navbar[0].url, "/docs/intro/");
        assert_eq!(navigation.navbar[1].url, "https://github.com/example/crs");
        assert_eq!(navigation.footer[0].items[0].url, "/docs/guides/setup/");
        assert!(navigation.hints.hideable);
    }

    #[test]
    fn test_resolved_model_serializes_with_tagged_nodes() {
        let registry = InMemoryRegistry::new().with_doc("intro", "Introduction", "/docs/intro");
        let spec = NavigationSpec {
            sidebars: vec![SidebarSpec::new("docs", vec![json!("intro")])],
            ..Default::default()
        };

        let navigation = resolve(&spec, &registry, &ResolveOptions::default()).unwrap();

        let value = serde_json::to_value(&navigation).unwrap();
        assert_eq!(
            value["sidebars"][0]["items"][0],
            json!({"type": "doc", "label": "Introduction", "url": "/docs/intro"})
        );
    }
}
