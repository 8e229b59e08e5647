//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The declarative navigation sections (`[[sidebars]]`, `[[navbar]]`,
//! `[[footer]]`) convert into a [`NavigationSpec`]; the `[site]` and
//! `[links]` sections convert into [`ResolveOptions`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sitenav_resolve::{
    EntryTarget, FooterColumnSpec, FooterItemSpec, ItemLink, LinkPolicy, NavbarItemSpec,
    NavbarPosition, NavigationSpec, RenderHints, ResolveOptions, SidebarSpec,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the broken-link policy.
    pub on_broken_links: Option<LinkPolicy>,
    /// Override the site base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Link checking policies.
    pub links: LinksConfig,
    /// Sidebar rendering hints (pass-through).
    pub hints: HintsConfig,
    /// Named sidebars with raw node forests.
    sidebars: Vec<SidebarConfig>,
    /// Navbar items.
    navbar: Vec<NavbarItemConfig>,
    /// Footer columns.
    footer: Vec<FooterColumnConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Production URL (optional, informational).
    pub url: Option<String>,
    /// Base URL prefix all internal URLs live under (e.g., `/crs/`).
    pub base_url: String,
    /// Append a trailing slash to internal URLs.
    pub trailing_slash: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            url: None,
            base_url: "/".to_owned(),
            trailing_slash: false,
        }
    }
}

/// Link checking policies.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Policy for broken navigation references.
    pub on_broken_links: LinkPolicy,
    /// Policy for broken in-content markdown links.
    ///
    /// Navigation resolution never reads this knob; it is configuration
    /// surface for the page renderer, which feeds its cross-reference
    /// findings through `sitenav_resolve::enforce` with this policy.
    pub on_broken_markdown_links: LinkPolicy,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            on_broken_links: LinkPolicy::Throw,
            on_broken_markdown_links: LinkPolicy::Warn,
        }
    }
}

/// Sidebar rendering hints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HintsConfig {
    /// Sidebar can be hidden by the reader.
    pub hideable: bool,
    /// Opening a category collapses its siblings.
    pub auto_collapse_categories: bool,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// One named sidebar as authored in TOML.
#[derive(Debug, Deserialize)]
struct SidebarConfig {
    name: String,
    #[serde(default)]
    nodes: Vec<toml::Value>,
}

/// Entry-point rule keyword for sidebar references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum EntryRule {
    #[default]
    FirstDoc,
    CategoryIndex,
}

/// One navbar item as authored in TOML.
///
/// Exactly one of `href` or `sidebar` must be set; `doc` and `entry` refine
/// a sidebar reference and are mutually exclusive.
#[derive(Debug, Deserialize)]
struct NavbarItemConfig {
    label: String,
    #[serde(default)]
    position: NavbarPosition,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    sidebar: Option<String>,
    #[serde(default)]
    entry: Option<EntryRule>,
    #[serde(default)]
    doc: Option<String>,
}

/// One footer column as authored in TOML.
#[derive(Debug, Deserialize)]
struct FooterColumnConfig {
    title: String,
    #[serde(default)]
    items: Vec<FooterItemConfig>,
}

/// One footer link as authored in TOML. Same link shape as navbar items.
#[derive(Debug, Deserialize)]
struct FooterItemConfig {
    label: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    sidebar: Option<String>,
    #[serde(default)]
    entry: Option<EntryRule>,
    #[serde(default)]
    doc: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(policy) = settings.on_broken_links {
            self.links.on_broken_links = policy;
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url.clone_from(base_url);
        }
    }

    /// Convert the declarative navigation sections into a [`NavigationSpec`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a navbar or footer item has an
    /// invalid link shape.
    pub fn navigation_spec(&self) -> Result<NavigationSpec, ConfigError> {
        let sidebars = self
            .sidebars
            .iter()
            .map(|sidebar| {
                SidebarSpec::new(
                    sidebar.name.clone(),
                    sidebar.nodes.iter().cloned().map(toml_to_json).collect(),
                )
            })
            .collect();

        let navbar = self
            .navbar
            .iter()
            .map(|item| {
                Ok(NavbarItemSpec {
                    label: item.label.clone(),
                    link: item_link(
                        item.href.as_deref(),
                        item.sidebar.as_deref(),
                        item.entry,
                        item.doc.as_deref(),
                        &format!("navbar item '{}'", item.label),
                    )?,
                    position: item.position,
                })
            })
            .collect::<Result<_, ConfigError>>()?;

        let footer = self
            .footer
            .iter()
            .map(|column| {
                let items = column
                    .items
                    .iter()
                    .map(|item| {
                        Ok(FooterItemSpec {
                            label: item.label.clone(),
                            link: item_link(
                                item.href.as_deref(),
                                item.sidebar.as_deref(),
                                item.entry,
                                item.doc.as_deref(),
                                &format!("footer item '{}'", item.label),
                            )?,
                        })
                    })
                    .collect::<Result<_, ConfigError>>()?;
                Ok(FooterColumnSpec {
                    title: column.title.clone(),
                    items,
                })
            })
            .collect::<Result<_, ConfigError>>()?;

        Ok(NavigationSpec {
            sidebars,
            navbar,
            footer,
        })
    }

    /// Resolution options derived from `[site]`, `[links]` and `[hints]`.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            policy: self.links.on_broken_links,
            base_url: self.site.base_url.clone(),
            trailing_slash: self.site.trailing_slash,
            hints: RenderHints {
                hideable: self.hints.hideable,
                auto_collapse_categories: self.hints.auto_collapse_categories,
            },
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            links: LinksConfig::default(),
            hints: HintsConfig::default(),
            sidebars: Vec::new(),
            navbar: Vec::new(),
            footer: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.base_url, "site.base_url")?;
        if !self.site.base_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start with '/'".to_owned(),
            ));
        }
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }
        for sidebar in &self.sidebars {
            require_non_empty(&sidebar.name, "sidebars.name")?;
        }
        // Surfaces link-shape errors at load time.
        self.navigation_spec()?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}

/// Convert one navbar/footer link shape into an [`ItemLink`].
fn item_link(
    href: Option<&str>,
    sidebar: Option<&str>,
    entry: Option<EntryRule>,
    doc: Option<&str>,
    context: &str,
) -> Result<ItemLink, ConfigError> {
    match (href, sidebar) {
        (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
            "{context}: 'href' and 'sidebar' are mutually exclusive"
        ))),
        (None, None) => Err(ConfigError::Validation(format!(
            "{context}: either 'href' or 'sidebar' is required"
        ))),
        (Some(href), None) => {
            if entry.is_some() || doc.is_some() {
                return Err(ConfigError::Validation(format!(
                    "{context}: 'entry' and 'doc' require 'sidebar'"
                )));
            }
            Ok(ItemLink::Href(href.to_owned()))
        }
        (None, Some(sidebar)) => {
            let target = match (entry, doc) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "{context}: 'entry' and 'doc' are mutually exclusive"
                    )));
                }
                (_, Some(doc)) => EntryTarget::Doc(doc.to_owned()),
                (Some(EntryRule::CategoryIndex), None) => EntryTarget::CategoryIndex,
                (Some(EntryRule::FirstDoc) | None, None) => EntryTarget::FirstDoc,
            };
            Ok(ItemLink::SidebarRef {
                sidebar: sidebar.to_owned(),
                target,
            })
        }
    }
}

/// Transcode a TOML value into the JSON value model sidebar nodes use.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(datetime) => serde_json::Value::String(datetime.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
