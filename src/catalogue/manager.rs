//! Locale catalogue lifecycle.
//!
//! Each locale moves through three states:
//!
//! ```text
//! Unknown --locales()--> Discovered --load()--> Loaded
//!    ^                                             |
//!    +------------------- reset() -----------------+
//! ```
//!
//! Discovery and loading read from the [`CatalogueCache`] first and fall
//! back to the [`LocaleLoader`] when the cached entry is absent or empty.
//! Mutations made through a loaded handle are only persisted by an explicit
//! [`CatalogueManager::save`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{Catalogue, CatalogueData, LocaleLoader, SharedCatalogue, normalize_locale};
use crate::cache::CatalogueCache;
use crate::error::{Error, Result};

/// Cache key holding the list of known locales.
pub const LOCALES_KEY: &str = "locales";

/// Cache key holding the data of one locale.
fn locale_key(locale: &str) -> String {
    format!("{LOCALES_KEY}/{locale}")
}

/// Loads, caches and hands out per-locale catalogues.
///
/// The manager holds at most one catalogue per locale; every call to
/// [`CatalogueManager::load`] for the same locale returns the same handle
/// until [`CatalogueManager::reset`].
pub struct CatalogueManager {
    loader: Box<dyn LocaleLoader>,
    cache: Rc<dyn CatalogueCache>,
    cache_locales: bool,
    locales: RefCell<Option<Vec<String>>>,
    loaded: RefCell<HashMap<String, SharedCatalogue>>,
}

impl CatalogueManager {
    /// Create a manager reading from `loader` and persisting into `cache`.
    pub fn new(loader: Box<dyn LocaleLoader>, cache: Rc<dyn CatalogueCache>) -> Self {
        Self {
            loader,
            cache,
            cache_locales: true,
            locales: RefCell::new(None),
            loaded: RefCell::new(HashMap::new()),
        }
    }

    /// Control whether cached locale data is read back.
    ///
    /// When disabled the cache is still written, but discovery and loading
    /// always go through the loader.
    #[must_use]
    pub fn with_cache_locales(mut self, enabled: bool) -> Self {
        self.cache_locales = enabled;
        self
    }

    /// Known locales, discovered once and remembered until reset.
    pub fn locales(&self) -> Result<Vec<String>> {
        if let Some(locales) = self.locales.borrow().as_ref() {
            return Ok(locales.clone());
        }

        let locales = match self.cached_locales()? {
            Some(locales) => locales,
            None => {
                let locales = self.loader.locales()?;
                self.cache.save(LOCALES_KEY, Some(serde_json::to_value(&locales)?))?;
                locales
            },
        };

        *self.locales.borrow_mut() = Some(locales.clone());
        Ok(locales)
    }

    /// Check if a locale is loaded or discoverable.
    pub fn has(&self, locale: &str) -> Result<bool> {
        let locale = normalize_locale(locale);
        if self.loaded.borrow().contains_key(&locale) {
            return Ok(true);
        }
        Ok(self.locales()?.iter().any(|known| normalize_locale(known) == locale))
    }

    /// Get the catalogue of a locale, loading it on first access.
    ///
    /// Fails with [`Error::UnknownLocale`] if the locale is not known.
    pub fn load(&self, locale: &str) -> Result<SharedCatalogue> {
        let locale = normalize_locale(locale);
        if let Some(catalogue) = self.loaded.borrow().get(&locale) {
            return Ok(Rc::clone(catalogue));
        }

        if !self.has(&locale)? {
            return Err(Error::UnknownLocale(locale));
        }

        let catalogue = match self.cached_catalogue(&locale)? {
            Some(data) => {
                tracing::debug!(locale = %locale, "Loaded catalogue from cache");
                Catalogue::from_data(locale.clone(), data)
            },
            None => {
                tracing::debug!(locale = %locale, "Loading catalogue from source");
                self.loader.load_catalogue(&locale)?
            },
        };

        let shared = catalogue.into_shared();
        self.loaded.borrow_mut().insert(locale, Rc::clone(&shared));
        Ok(shared)
    }

    /// Alias of [`CatalogueManager::load`].
    pub fn get(&self, locale: &str) -> Result<SharedCatalogue> {
        self.load(locale)
    }

    /// Persist the current data of a locale into the cache.
    pub fn save(&self, locale: &str) -> Result<()> {
        let catalogue = self.load(locale)?;
        let catalogue = catalogue.borrow();
        let value = serde_json::to_value(catalogue.data())?;
        self.cache.save(&locale_key(catalogue.locale()), Some(value))?;
        tracing::debug!(locale = %catalogue.locale(), "Saved catalogue");
        Ok(())
    }

    /// Drop every cached and in-memory catalogue.
    ///
    /// Cache entries are cleared for all currently known locales before the
    /// in-memory state is forgotten.
    pub fn reset(&self) -> Result<()> {
        let mut known = self.locales()?;
        for locale in self.loaded.borrow().keys() {
            if !known.contains(locale) {
                known.push(locale.clone());
            }
        }

        self.cache.save(LOCALES_KEY, None)?;
        for locale in &known {
            self.cache.save(&locale_key(&normalize_locale(locale)), None)?;
        }

        *self.locales.borrow_mut() = None;
        self.loaded.borrow_mut().clear();
        tracing::debug!(count = known.len(), "Reset locale catalogues");
        Ok(())
    }

    fn cached_locales(&self) -> Result<Option<Vec<String>>> {
        if !self.cache_locales {
            return Ok(None);
        }
        match self.cache.load(LOCALES_KEY)? {
            Some(value) => match serde_json::from_value::<Vec<String>>(value) {
                Ok(locales) => Ok(Some(locales).filter(|locales| !locales.is_empty())),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed cached locale list");
                    Ok(None)
                },
            },
            None => Ok(None),
        }
    }

    fn cached_catalogue(&self, locale: &str) -> Result<Option<CatalogueData>> {
        if !self.cache_locales {
            return Ok(None);
        }
        match self.cache.load(&locale_key(locale))? {
            Some(value) => match serde_json::from_value::<CatalogueData>(value) {
                Ok(data) => Ok(Some(data).filter(|data| !data.is_empty())),
                Err(e) => {
                    tracing::warn!(
                        locale = %locale,
                        error = %e,
                        "Ignoring malformed cached catalogue"
                    );
                    Ok(None)
                },
            },
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for CatalogueManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogueManager")
            .field("cache_locales", &self.cache_locales)
            .field("locales", &self.locales.borrow())
            .field("loaded", &self.loaded.borrow().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::catalogue::StaticLoader;
    use serde_json::json;
    use std::cell::Cell;

    fn data(entries: &[(&str, &str, &str)]) -> CatalogueData {
        let mut data = CatalogueData::new();
        for (domain, id, value) in entries {
            data.entry((*domain).to_string())
                .or_default()
                .insert((*id).to_string(), (*value).to_string());
        }
        data
    }

    fn static_loader() -> StaticLoader {
        StaticLoader::new()
            .with_catalogue("en", data(&[("messages", "message", "message")]))
            .with_catalogue("ru", data(&[("messages", "message", "translation")]))
    }

    /// Loader wrapper counting how often it is asked for locales.
    struct CountingLoader {
        inner: StaticLoader,
        discoveries: Rc<Cell<usize>>,
    }

    impl LocaleLoader for CountingLoader {
        fn has_locale(&self, locale: &str) -> bool {
            self.inner.has_locale(locale)
        }

        fn locales(&self) -> Result<Vec<String>> {
            self.discoveries.set(self.discoveries.get() + 1);
            self.inner.locales()
        }

        fn load_catalogue(&self, locale: &str) -> Result<Catalogue> {
            self.inner.load_catalogue(locale)
        }
    }

    fn new_manager(cache: Rc<MemoryCache>) -> CatalogueManager {
        CatalogueManager::new(Box::new(static_loader()), cache)
    }

    #[test]
    fn test_locales_are_cached() {
        let cache = Rc::new(MemoryCache::new());
        let manager = new_manager(Rc::clone(&cache));

        assert_eq!(manager.locales().unwrap(), vec!["en", "ru"]);
        assert_eq!(cache.load(LOCALES_KEY).unwrap(), Some(json!(["en", "ru"])));
    }

    #[test]
    fn test_has_from_loader_and_cache() {
        let manager = new_manager(Rc::new(MemoryCache::new()));
        assert!(manager.has("ru").unwrap());
        assert!(manager.has("EN").unwrap());
        assert!(!manager.has("de").unwrap());

        let cache = Rc::new(MemoryCache::new());
        cache.save(LOCALES_KEY, Some(json!(["de"]))).unwrap();
        let manager = CatalogueManager::new(Box::new(StaticLoader::new()), cache);
        assert!(manager.has("de").unwrap());
        assert!(!manager.has("ru").unwrap());
    }

    #[test]
    fn test_load_returns_same_handle() {
        let manager = new_manager(Rc::new(MemoryCache::new()));
        let first = manager.load("ru").unwrap();
        let second = manager.get("ru").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.borrow().get("messages", "message").unwrap(), "translation");
    }

    #[test]
    fn test_load_unknown_locale() {
        let manager = new_manager(Rc::new(MemoryCache::new()));
        let err = manager.load("de").unwrap_err();
        assert!(matches!(err, Error::UnknownLocale(ref l) if l == "de"));
    }

    #[test]
    fn test_load_prefers_cache() {
        let cache = Rc::new(MemoryCache::new());
        cache.save(&locale_key("ru"), Some(json!({"messages": {"message": "cached"}}))).unwrap();

        let manager = new_manager(cache);
        let catalogue = manager.load("ru").unwrap();
        assert_eq!(catalogue.borrow().get("messages", "message").unwrap(), "cached");
    }

    #[test]
    fn test_empty_cached_locales_rediscover() {
        let cache = Rc::new(MemoryCache::new());
        cache.save(LOCALES_KEY, Some(json!([]))).unwrap();
        let discoveries = Rc::new(Cell::new(0));
        let loader =
            CountingLoader { inner: static_loader(), discoveries: Rc::clone(&discoveries) };
        let shared: Rc<dyn CatalogueCache> = cache.clone();
        let manager = CatalogueManager::new(Box::new(loader), shared);

        assert_eq!(manager.locales().unwrap(), vec!["en", "ru"]);
        assert_eq!(discoveries.get(), 1);
        assert_eq!(cache.load(LOCALES_KEY).unwrap(), Some(json!(["en", "ru"])));
    }

    #[test]
    fn test_empty_cached_catalogue_loads_from_source() {
        let cache = Rc::new(MemoryCache::new());
        cache.save(&locale_key("en"), Some(json!({}))).unwrap();

        let manager = new_manager(cache);
        let catalogue = manager.load("en").unwrap();
        assert!(catalogue.borrow().has("messages", "message"));
    }

    #[test]
    fn test_cache_locales_disabled_skips_reads() {
        let cache = Rc::new(MemoryCache::new());
        cache.save(LOCALES_KEY, Some(json!(["de"]))).unwrap();
        cache.save(&locale_key("ru"), Some(json!({"messages": {"message": "cached"}}))).unwrap();

        let manager = new_manager(Rc::clone(&cache)).with_cache_locales(false);
        assert!(!manager.has("de").unwrap());
        let catalogue = manager.load("ru").unwrap();
        assert_eq!(catalogue.borrow().get("messages", "message").unwrap(), "translation");
        assert_eq!(cache.load(LOCALES_KEY).unwrap(), Some(json!(["en", "ru"])));
    }

    #[test]
    fn test_save_persists_mutations() {
        let cache = Rc::new(MemoryCache::new());
        let manager = new_manager(Rc::clone(&cache));

        let catalogue = manager.load("en").unwrap();
        catalogue.borrow_mut().set("messages", "new", "new");
        assert!(cache.load(&locale_key("en")).unwrap().is_none());

        manager.save("en").unwrap();
        assert_eq!(
            cache.load(&locale_key("en")).unwrap(),
            Some(json!({"messages": {"message": "message", "new": "new"}}))
        );

        let reloaded = new_manager(Rc::clone(&cache)).load("en").unwrap();
        assert!(reloaded.borrow().has("messages", "new"));
    }

    #[test]
    fn test_reset_clears_cache_and_rediscovers() {
        let cache = Rc::new(MemoryCache::new());
        let discoveries = Rc::new(Cell::new(0));
        let loader =
            CountingLoader { inner: static_loader(), discoveries: Rc::clone(&discoveries) };
        let shared: Rc<dyn CatalogueCache> = cache.clone();
        let manager = CatalogueManager::new(Box::new(loader), shared);

        let before = manager.load("ru").unwrap();
        manager.load("en").unwrap();
        manager.save("ru").unwrap();
        manager.save("en").unwrap();
        assert_eq!(discoveries.get(), 1);
        assert_eq!(cache.len(), 3);

        manager.reset().unwrap();
        assert!(cache.load(LOCALES_KEY).unwrap().is_none());
        assert!(cache.load(&locale_key("ru")).unwrap().is_none());
        assert!(cache.load(&locale_key("en")).unwrap().is_none());

        let after = manager.load("ru").unwrap();
        assert_eq!(discoveries.get(), 2);
        assert!(!Rc::ptr_eq(&before, &after));
    }
}
