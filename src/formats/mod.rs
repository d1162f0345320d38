//! Translation file formats.
//!
//! Each file in a locale directory is parsed by the [`FileLoader`] registered
//! for its extension. [`FileDumper`]s write a catalogue domain back out in the
//! same formats.
//!
//! | Format | Loader extensions | Notes                                   |
//! |--------|-------------------|-----------------------------------------|
//! | `yaml` | `yaml`, `yml`     | nested keys are flattened with `.`      |
//! | `json` | `json`            | flat or nested object of strings        |
//! | `po`   | `po`              | gettext; plural forms are joined by `\|` |

mod json;
mod po;
mod yaml;

pub use json::{JsonFileDumper, JsonFileLoader};
pub use po::{PoFileDumper, PoFileLoader, parse_po};
pub use yaml::{YamlFileDumper, YamlFileLoader};

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::catalogue::{Catalogue, CatalogueData};
use crate::error::{Error, Result};

/// Parses one translation file into domain-keyed messages.
pub trait FileLoader {
    /// Load `path`, placing its messages under `domain`.
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<CatalogueData>;
}

/// Serializes one catalogue domain into file contents.
pub trait FileDumper {
    /// File extension written by this dumper.
    fn extension(&self) -> &'static str;

    /// Render the messages of `domain`.
    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String>;
}

/// Create the loader for a format name.
pub fn loader_for_format(format: &str) -> Result<Box<dyn FileLoader>> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(Box::new(YamlFileLoader)),
        "json" => Ok(Box::new(JsonFileLoader)),
        "po" => Ok(Box::new(PoFileLoader)),
        other => Err(Error::config(format!(
            "Unknown loader format '{other}'. Use: yaml, json, po"
        ))),
    }
}

/// Create the dumper for a format name.
pub fn dumper_for_format(format: &str) -> Result<Box<dyn FileDumper>> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(Box::new(YamlFileDumper)),
        "json" => Ok(Box::new(JsonFileDumper)),
        "po" => Ok(Box::new(PoFileDumper)),
        other => Err(Error::config(format!(
            "Unknown dumper format '{other}'. Use: yaml, json, po"
        ))),
    }
}

/// Registry mapping file extensions to loaders.
#[derive(Default)]
pub struct FormatRegistry {
    loaders: HashMap<String, Box<dyn FileLoader>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an extension → format name table.
    pub fn from_config(loaders: &BTreeMap<String, String>) -> Result<Self> {
        let mut registry = Self::new();
        for (extension, format) in loaders {
            registry.register(extension, loader_for_format(format)?);
        }
        Ok(registry)
    }

    /// Register a loader for an extension, replacing any previous one.
    pub fn register(&mut self, extension: &str, loader: Box<dyn FileLoader>) {
        self.loaders.insert(extension.to_lowercase(), loader);
    }

    /// Get the loader for an extension.
    pub fn loader(&self, extension: &str) -> Option<&dyn FileLoader> {
        self.loaders.get(&extension.to_lowercase()).map(Box::as_ref)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry").field("extensions", &self.extensions()).finish()
    }
}

/// Wrap flat messages into single-domain catalogue data.
fn single_domain(domain: &str, messages: BTreeMap<String, String>) -> CatalogueData {
    let mut data = CatalogueData::new();
    if !messages.is_empty() {
        data.insert(domain.to_string(), messages);
    }
    data
}

/// Read a file, mapping IO failures to a format error naming the file.
fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::format(path, e.to_string()))
}
