//! `sitenav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_resolve::{LinkPolicy, ResolveError, resolve_report};

use crate::error::CliError;
use crate::output::Output;
use crate::scan::scan_docs;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Broken-link policy: throw, warn, or ignore (overrides config).
    #[arg(long, value_parser = parse_policy)]
    on_broken_links: Option<LinkPolicy>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the docs tree can't be
    /// scanned, or the navigation has findings under a `throw` policy.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            on_broken_links: self.on_broken_links,
            base_url: None,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        output.info(&format!("Source directory: {}", source_dir.display()));

        let registry = scan_docs(source_dir, &config.site.base_url)?;
        let spec = config.navigation_spec()?;
        let options = config.resolve_options();

        match resolve_report(&spec, &registry, &options) {
            Ok(report) => {
                for duplicate in &report.duplicates {
                    output.warning(&duplicate.to_string());
                }
                // Under the warn policy the pass succeeds but still carries
                // every broken reference; print them before the summary.
                if options.policy == LinkPolicy::Warn {
                    for finding in &report.findings {
                        output.warning(&finding.to_string());
                    }
                }
                output.success(&format!(
                    "Navigation OK: {} sidebar(s), {} navbar item(s), {} document(s)",
                    report.navigation.sidebars.len(),
                    report.navigation.navbar.len(),
                    registry.len()
                ));
                Ok(())
            }
            Err(ResolveError::Broken(failure)) => {
                for finding in &failure.findings {
                    output.error(&finding.to_string());
                }
                Err(CliError::BrokenLinks(failure.findings.len()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Parse a policy mode from its config keyword.
fn parse_policy(value: &str) -> Result<LinkPolicy, String> {
    match value {
        "throw" => Ok(LinkPolicy::Throw),
        "warn" => Ok(LinkPolicy::Warn),
        "ignore" => Ok(LinkPolicy::Ignore),
        other => Err(format!(
            "invalid policy '{other}' (expected throw, warn, or ignore)"
        )),
    }
}
