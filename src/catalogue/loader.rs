//! Locale discovery and catalogue loading.

use std::collections::BTreeMap;
use std::path::PathBuf;

use walkdir::WalkDir;

use super::{Catalogue, CatalogueData};
use crate::error::{Error, Result};
use crate::formats::FormatRegistry;

/// Source of locale catalogues.
pub trait LocaleLoader {
    /// Check if the locale can be loaded.
    fn has_locale(&self, locale: &str) -> bool;

    /// List every locale this loader knows about.
    fn locales(&self) -> Result<Vec<String>>;

    /// Build the catalogue of a locale from scratch.
    fn load_catalogue(&self, locale: &str) -> Result<Catalogue>;
}

/// Normalize a locale name: keep `[a-zA-Z_]` and lowercase the rest.
///
/// ```
/// assert_eq!(glossa::catalogue::normalize_locale("pt_BR"), "pt_br");
/// assert_eq!(glossa::catalogue::normalize_locale("../en"), "en");
/// ```
pub fn normalize_locale(locale: &str) -> String {
    locale
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

/// Loads catalogues from a `<root>/<locale>/**/<domain>.<ext>` tree.
///
/// Every file below a locale directory contributes to the domain named by
/// its file name up to the first `.`, so `views.po` and `views.extra.yaml`
/// both feed `views`. Files are visited in path order and later files win on
/// colliding ids.
#[derive(Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
    formats: FormatRegistry,
}

impl DirectoryLoader {
    /// Create a loader over `root` using the given format registry.
    pub fn new(root: impl Into<PathBuf>, formats: FormatRegistry) -> Self {
        Self { root: root.into(), formats }
    }

    fn locale_dir(&self, locale: &str) -> PathBuf {
        self.root.join(normalize_locale(locale))
    }
}

impl LocaleLoader for DirectoryLoader {
    fn has_locale(&self, locale: &str) -> bool {
        !normalize_locale(locale).is_empty() && self.locale_dir(locale).is_dir()
    }

    fn locales(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "Locales directory does not exist");
            return Ok(Vec::new());
        }

        let mut locales = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.is_empty() || normalize_locale(&name) != name {
                tracing::warn!(
                    directory = %entry.path().display(),
                    "Skipping locale directory with a non-normalized name"
                );
                continue;
            }
            locales.push(name);
        }
        locales.sort();

        tracing::debug!(root = %self.root.display(), count = locales.len(), "Discovered locales");
        Ok(locales)
    }

    fn load_catalogue(&self, locale: &str) -> Result<Catalogue> {
        let locale = normalize_locale(locale);
        if !self.has_locale(&locale) {
            return Err(Error::UnknownLocale(locale));
        }

        let dir = self.locale_dir(&locale);
        let mut catalogue = Catalogue::new(locale.clone());

        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry
                .map_err(|e| Error::other(format!("Failed to walk {}: {e}", dir.display())))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();
            let Some(domain) = file_name.split('.').next().filter(|d| !d.is_empty()) else {
                continue;
            };
            let extension = path.extension().map(|e| e.to_string_lossy()).unwrap_or_default();

            let Some(loader) = self.formats.loader(&extension) else {
                tracing::warn!(
                    path = %path.display(),
                    extension = %extension,
                    "No loader registered for file extension, skipping"
                );
                continue;
            };

            let data = loader.load(path, &locale, domain)?;
            tracing::debug!(path = %path.display(), domain = domain, "Loaded translation file");
            catalogue.merge_from(&data, true);
        }

        Ok(catalogue)
    }
}

/// In-memory loader for catalogues compiled into the application.
#[derive(Debug, Default, Clone)]
pub struct StaticLoader {
    catalogues: BTreeMap<String, CatalogueData>,
}

impl StaticLoader {
    /// Create a loader with no locales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or merge into) the catalogue of a locale.
    pub fn add_catalogue(&mut self, locale: &str, data: CatalogueData) -> &mut Self {
        let resident = self.catalogues.entry(normalize_locale(locale)).or_default();
        for (domain, messages) in data {
            resident.entry(domain).or_default().extend(messages);
        }
        self
    }

    /// Builder-style variant of [`StaticLoader::add_catalogue`].
    #[must_use]
    pub fn with_catalogue(mut self, locale: &str, data: CatalogueData) -> Self {
        self.add_catalogue(locale, data);
        self
    }
}

impl LocaleLoader for StaticLoader {
    fn has_locale(&self, locale: &str) -> bool {
        self.catalogues.contains_key(&normalize_locale(locale))
    }

    fn locales(&self) -> Result<Vec<String>> {
        Ok(self.catalogues.keys().cloned().collect())
    }

    fn load_catalogue(&self, locale: &str) -> Result<Catalogue> {
        let locale = normalize_locale(locale);
        self.catalogues
            .get(&locale)
            .map(|data| Catalogue::from_data(locale.clone(), data.clone()))
            .ok_or(Error::UnknownLocale(locale))
    }
}
