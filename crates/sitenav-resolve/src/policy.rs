//! Broken-link findings and policy enforcement.
//!
//! Findings are accumulated during validation and composition, never thrown
//! individually: one pass reports every broken reference at once. The single
//! [`enforce`] decision function turns an accumulated findings list into a
//! build outcome based on the configured [`LinkPolicy`]. It does not care
//! where findings originated, so the rendering collaborator can push
//! in-content cross-reference findings through the same function.

use std::fmt;

use serde::{Deserialize, Serialize};
use sitenav_registry::DocEntry;

use crate::node::NodePath;

/// Sentinel URL substituted for broken references under non-fatal policies.
///
/// A fragment-only href renders as an inert link, so it can never break
/// downstream rendering; renderers are expected to mark it visibly.
pub const BROKEN_LINK_URL: &str = "#broken-link";

/// Severity with which broken references are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Fail the pass if any finding was recorded.
    #[default]
    Throw,
    /// Succeed; emit each finding as a warning and substitute the sentinel.
    Warn,
    /// Succeed silently; substitute the sentinel.
    Ignore,
}

/// Where a finding was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindingOrigin {
    /// A sidebar node.
    Sidebar {
        /// Sidebar name.
        sidebar: String,
        /// Node path within the sidebar forest.
        path: NodePath,
    },
    /// A navbar item.
    Navbar {
        /// Item label.
        label: String,
    },
    /// A footer item.
    Footer {
        /// Item label.
        label: String,
    },
    /// An in-content cross-reference, reported by the rendering collaborator.
    Content {
        /// URL path of the referring page.
        page: String,
    },
}

impl fmt::Display for FindingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sidebar { sidebar, path } => write!(f, "Sidebar '{sidebar}', node {path}"),
            Self::Navbar { label } => write!(f, "Navbar item '{label}'"),
            Self::Footer { label } => write!(f, "Footer item '{label}'"),
            Self::Content { page } => write!(f, "Page '{page}'"),
        }
    }
}

/// What went wrong with a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindingKind {
    /// The target document does not exist in the registry.
    Dangling {
        /// Unresolved identifier.
        id: String,
    },
    /// The registry holds several documents under this identifier.
    ///
    /// No candidate is ever preferred silently; all of them are reported.
    Ambiguous {
        /// Ambiguous identifier.
        id: String,
        /// All matching documents.
        candidates: Vec<DocEntry>,
    },
    /// A navbar/footer entry point yielded no candidate URL.
    EmptyEntryPoint {
        /// Name of the referenced sidebar.
        sidebar: String,
    },
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { id } => write!(f, "unresolved document '{id}'"),
            Self::Ambiguous { id, candidates } => {
                write!(f, "ambiguous document '{id}' ({} candidates)", candidates.len())
            }
            Self::EmptyEntryPoint { sidebar } => {
                write!(f, "sidebar '{sidebar}' has no resolvable entry point")
            }
        }
    }
}

/// One broken-reference finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// Where the reference lives.
    pub origin: FindingOrigin,
    /// What is wrong with it.
    pub kind: FindingKind,
}

impl Finding {
    /// Finding for an in-content cross-reference to a missing document.
    ///
    /// Constructed by the rendering collaborator and fed through [`enforce`]
    /// together with navigation findings.
    #[must_use]
    pub fn content_dangling(page: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            origin: FindingOrigin::Content { page: page.into() },
            kind: FindingKind::Dangling { id: id.into() },
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.origin, self.kind)
    }
}

/// Hard failure produced by [`enforce`] under [`LinkPolicy::Throw`].
///
/// Carries the complete findings list; the first finding (in
/// sidebar-declaration order, then node-path order) is the representative
/// surfaced in the error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_failure(.findings))]
pub struct ResolutionFailure {
    /// All findings from the failed pass.
    pub findings: Vec<Finding>,
}

fn format_failure(findings: &[Finding]) -> String {
    match findings {
        [] => "navigation resolution failed".to_owned(),
        [single] => single.to_string(),
        [first, ..] => format!("{first} (and {} more findings)", findings.len() - 1),
    }
}

/// Decide the build outcome for an accumulated findings list.
///
/// The same function is applied to navigation findings and to in-content
/// cross-reference findings; policy is the only input besides the list.
pub fn enforce(policy: LinkPolicy, findings: &[Finding]) -> Result<(), ResolutionFailure> {
    match policy {
        LinkPolicy::Throw => {
            if findings.is_empty() {
                Ok(())
            } else {
                Err(ResolutionFailure {
                    findings: findings.to_vec(),
                })
            }
        }
        LinkPolicy::Warn => {
            for finding in findings {
                tracing::warn!("{finding}");
            }
            Ok(())
        }
        LinkPolicy::Ignore => Ok(()),
    }
}
