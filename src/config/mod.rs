//! Configuration for Glossa.
//!
//! The configuration follows the XDG base directory layout and supports:
//! - User config: `~/.config/glossa/config.yaml`
//! - Project config: `.glossa.yaml` in current directory
//! - Environment variables: `GLOSSA_*`
//! - Command-line flags (highest precedence)
//!
//! A typical project file:
//!
//! ```yaml
//! locale: ru
//! fallback_locale: en
//! directory: app/locale
//! domains:
//!   spiral:
//!     - spiral-*
//!   messages:
//!     - "*"
//! ```

mod domains;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::{FileDumper, FormatRegistry, dumper_for_format};
use crate::matcher::Matcher;

/// Ordered domain → bundle patterns table.
///
/// Domains are tried in order; the first one with a matching pattern wins.
pub type DomainRules = Vec<(String, Vec<String>)>;

/// Environment variable overriding the default locale.
pub const LOCALE_ENV: &str = "GLOSSA_LOCALE";

/// Environment variable overriding the locales directory.
pub const DIRECTORY_ENV: &str = "GLOSSA_DIRECTORY";

/// Name of the project config file looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = ".glossa.yaml";

/// Translator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, bon::Builder)]
pub struct TranslatorConfig {
    /// Default (and initially active) locale.
    #[serde(default = "default_locale")]
    #[builder(default = default_locale(), into)]
    pub locale: String,

    /// Locale consulted when the active one lacks a message.
    ///
    /// Defaults to [`TranslatorConfig::locale`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub fallback_locale: Option<String>,

    /// Root directory holding one subdirectory per locale.
    #[serde(default = "default_directory", alias = "locales_directory")]
    #[builder(default = default_directory(), into)]
    pub directory: PathBuf,

    /// Read discovered locales and catalogues back from the cache.
    #[serde(default = "default_true")]
    #[builder(default = true)]
    pub cache_locales: bool,

    /// Register missing messages into the fallback catalogue.
    #[serde(default = "default_true", alias = "register_messages")]
    #[builder(default = true)]
    pub auto_register: bool,

    /// Domain used when none is given.
    #[serde(default = "default_domain")]
    #[builder(default = default_domain(), into)]
    pub default_domain: String,

    /// Bundle patterns per domain, in resolution order.
    #[serde(default, with = "domains")]
    #[builder(default)]
    pub domains: DomainRules,

    /// File extension → format name used by the directory loader.
    #[serde(default = "default_loaders")]
    #[builder(default = default_loaders())]
    pub loaders: BTreeMap<String, String>,

    /// Format names available for export.
    #[serde(default = "default_dumpers")]
    #[builder(default = default_dumpers())]
    pub dumpers: Vec<String>,

    /// Directory of the on-disk catalogue cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub cache_directory: Option<PathBuf>,

    #[serde(skip)]
    #[builder(skip)]
    matcher: Matcher,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("locale")
}

fn default_true() -> bool {
    true
}

fn default_domain() -> String {
    "messages".to_string()
}

fn default_loaders() -> BTreeMap<String, String> {
    [("yaml", "yaml"), ("yml", "yaml"), ("json", "json"), ("po", "po")]
        .into_iter()
        .map(|(ext, format)| (ext.to_string(), format.to_string()))
        .collect()
}

fn default_dumpers() -> Vec<String> {
    vec!["yaml".to_string(), "json".to_string(), "po".to_string()]
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TranslatorConfig {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Resolution order (highest to lowest):
    /// 1. CLI flags (handled separately)
    /// 2. Environment variables
    /// 3. `explicit` file, if given
    /// 4. Project config (`.glossa.yaml`)
    /// 5. User config (`~/.config/glossa/config.yaml`)
    /// 6. Defaults
    ///
    /// Files are merged key by key, so a project file only needs to name the
    /// settings it changes.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(path) = Self::user_config_path()
            && path.exists()
        {
            layers.push(path);
        }

        let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            layers.push(project_path);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            layers.push(path.to_path_buf());
        }

        let mut merged = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        for path in &layers {
            tracing::debug!(path = %path.display(), "Reading config file");
            merge_values(&mut merged, read_value(path)?);
        }

        let mut config: Self = serde_yaml::from_value(merged)
            .map_err(|e| Error::config(format!("Invalid configuration: {e}")))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config: Self = serde_yaml::from_value(read_value(path)?).map_err(|e| {
            Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as YAML.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Check that required values are present.
    pub fn validate(&self) -> Result<()> {
        if self.locale.trim().is_empty() {
            return Err(Error::config("Default locale must not be empty"));
        }
        if self.default_domain.trim().is_empty() {
            return Err(Error::config("Default domain must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(locale) = std::env::var(LOCALE_ENV)
            && !locale.is_empty()
        {
            self.locale = locale;
        }

        if let Ok(directory) = std::env::var(DIRECTORY_ENV)
            && !directory.is_empty()
        {
            self.directory = PathBuf::from(directory);
        }
    }

    /// Get the path to the user config file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.yaml"))
    }

    /// Get the path to the user config directory.
    ///
    /// Cross-platform behavior:
    /// - If `XDG_CONFIG_HOME` is set, uses `$XDG_CONFIG_HOME/glossa`
    /// - Linux/macOS: Falls back to `~/.config/glossa`
    /// - Windows: Falls back to `%APPDATA%\glossa`
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("glossa"));
        }

        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join("glossa"))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(".config").join("glossa"))
        }
    }

    /// Default locale.
    pub fn default_locale(&self) -> &str {
        &self.locale
    }

    /// Fallback locale, defaulting to the default locale.
    pub fn fallback_locale(&self) -> &str {
        self.fallback_locale.as_deref().unwrap_or(&self.locale)
    }

    /// Directory holding the files of one locale.
    pub fn locale_directory(&self, locale: &str) -> PathBuf {
        self.directory.join(locale)
    }

    /// Map a bundle name to its translation domain.
    ///
    /// The bundle is normalized first (`/`, `\` and `::` become `-`, then
    /// lowercased). The first domain with a matching pattern wins; if none
    /// matches the normalized bundle itself is the domain.
    pub fn resolve_domain(&self, bundle: &str) -> String {
        let bundle = normalize_bundle(bundle);
        self.domains
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| self.matcher.matches(&bundle, p)))
            .map_or(bundle, |(domain, _)| domain.clone())
    }

    /// Build the loader registry described by [`TranslatorConfig::loaders`].
    pub fn format_registry(&self) -> Result<FormatRegistry> {
        FormatRegistry::from_config(&self.loaders)
    }

    /// Get the dumper for a format, if it is enabled.
    pub fn dumper(&self, format: &str) -> Result<Box<dyn FileDumper>> {
        if !self.dumpers.iter().any(|d| d.eq_ignore_ascii_case(format)) {
            return Err(Error::config(format!(
                "Dumper '{}' is not enabled. Available: {}",
                format,
                self.dumpers.join(", ")
            )));
        }
        dumper_for_format(format)
    }
}

/// Normalize a bundle name into domain form.
pub fn normalize_bundle(bundle: &str) -> String {
    bundle.replace("::", "-").replace(['/', '\\'], "-").to_lowercase()
}

fn read_value(path: &Path) -> Result<serde_yaml::Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    if contents.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }
    serde_yaml::from_str(&contents).map_err(|e| {
        Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Merge `other` into `base`; mappings merge recursively, anything else is
/// replaced.
fn merge_values(base: &mut serde_yaml::Value, other: serde_yaml::Value) {
    match (base, other) {
        (serde_yaml::Value::Mapping(base), serde_yaml::Value::Mapping(other)) => {
            for (key, value) in other {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    },
                }
            }
        },
        (base, other) => *base = other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spiral_config() -> TranslatorConfig {
        TranslatorConfig::builder()
            .domains(vec![
                ("spiral".to_string(), vec!["spiral-*".to_string()]),
                ("messages".to_string(), vec!["*".to_string()]),
            ])
            .build()
    }

    #[test]
    fn test_default_config() {
        let config = TranslatorConfig::default();
        assert_eq!(config.default_locale(), "en");
        assert_eq!(config.fallback_locale(), "en");
        assert_eq!(config.default_domain, "messages");
        assert!(config.cache_locales);
        assert!(config.auto_register);
        let registry = config.format_registry().unwrap();
        assert!(registry.loader("yaml").is_some());
        assert!(registry.loader("PO").is_some());
        assert!(registry.loader("txt").is_none());
        assert!(config.domains.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = TranslatorConfig::builder()
            .locale("ru")
            .fallback_locale("en")
            .directory("/app/locale")
            .auto_register(false)
            .build();
        assert_eq!(config.default_locale(), "ru");
        assert_eq!(config.fallback_locale(), "en");
        assert_eq!(config.locale_directory("ru"), PathBuf::from("/app/locale/ru"));
        assert!(!config.auto_register);
    }

    #[test]
    fn test_resolve_domain() {
        let config = spiral_config();
        assert_eq!(config.resolve_domain("spiral-views"), "spiral");
        assert_eq!(config.resolve_domain("vendor-views"), "messages");
        assert_eq!(config.resolve_domain("Spiral/Views"), "spiral");
    }

    #[test]
    fn test_resolve_domain_without_match() {
        let config = TranslatorConfig::builder()
            .domains(vec![("spiral".to_string(), vec!["spiral-*".to_string()])])
            .build();
        assert_eq!(config.resolve_domain("App\\Controllers"), "app-controllers");
        assert_eq!(config.resolve_domain("app::views::Home"), "app-views-home");
    }

    #[test]
    fn test_load_from_file_keeps_domain_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "locale: ru\nlocales_directory: app/locale\nregister_messages: false\n\
             domains:\n  zeta: [\"zeta-*\"]\n  alpha: [\"*\"]\n",
        )
        .unwrap();

        let config = TranslatorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.locale, "ru");
        assert_eq!(config.directory, PathBuf::from("app/locale"));
        assert!(!config.auto_register);
        let names: Vec<&str> = config.domains.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(config.resolve_domain("zeta-views"), "zeta");
        assert_eq!(config.resolve_domain("other"), "alpha");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");
        spiral_config().save(&path).unwrap();

        let config = TranslatorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.domains, spiral_config().domains);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "locale: \"\"\n").unwrap();
        assert!(matches!(TranslatorConfig::load_from_file(&path), Err(Error::Config(_))));

        std::fs::write(&path, "locale: [").unwrap();
        assert!(matches!(TranslatorConfig::load_from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_merge_values() {
        let mut base: serde_yaml::Value =
            serde_yaml::from_str("locale: en\nloaders:\n  yaml: yaml\n").unwrap();
        let other: serde_yaml::Value =
            serde_yaml::from_str("locale: ru\nloaders:\n  po: po\n").unwrap();
        merge_values(&mut base, other);

        let config: TranslatorConfig = serde_yaml::from_value(base).unwrap();
        assert_eq!(config.locale, "ru");
        assert_eq!(config.loaders.len(), 2);
    }

    #[test]
    fn test_dumper_must_be_enabled() {
        let config = TranslatorConfig::builder().dumpers(vec!["json".to_string()]).build();
        assert_eq!(config.dumper("json").unwrap().extension(), "json");
        assert!(matches!(config.dumper("po"), Err(Error::Config(_))));
    }
}
