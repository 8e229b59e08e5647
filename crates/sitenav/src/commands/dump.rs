//! `sitenav dump` command implementation.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_resolve::resolve;

use crate::error::CliError;
use crate::scan::scan_docs;

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl DumpArgs {
    /// Execute the dump command.
    ///
    /// Writes the resolved navigation model as JSON to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the docs tree can't be
    /// scanned, or resolution fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            on_broken_links: None,
            base_url: None,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let registry = scan_docs(&config.docs_resolved.source_dir, &config.site.base_url)?;
        let spec = config.navigation_spec()?;
        let navigation = resolve(&spec, &registry, &config.resolve_options())?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if self.compact {
            serde_json::to_writer(&mut handle, &navigation)?;
        } else {
            serde_json::to_writer_pretty(&mut handle, &navigation)?;
        }
        writeln!(handle)?;

        Ok(())
    }
}
