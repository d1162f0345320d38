//! In-memory message catalogues.
//!
//! A [`Catalogue`] holds every translated message of one locale, grouped by
//! domain:
//!
//! ```text
//! messages:
//!   hello: Hola
//! views:
//!   Welcome: Bienvenido
//! ```
//!
//! Catalogues are produced by a [`LocaleLoader`], cached and handed out by
//! the [`CatalogueManager`], and filled offline by the indexer.

mod loader;
mod manager;

pub use loader::{DirectoryLoader, LocaleLoader, StaticLoader, normalize_locale};
pub use manager::{CatalogueManager, LOCALES_KEY};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Domain → (message id → translation).
///
/// This is the persisted representation of a catalogue and the unit stored
/// in a [`CatalogueCache`](crate::cache::CatalogueCache).
pub type CatalogueData = BTreeMap<String, BTreeMap<String, String>>;

/// Catalogue handle shared between the manager and its consumers.
///
/// Every holder observes mutations made through any other handle.
pub type SharedCatalogue = Rc<RefCell<Catalogue>>;

/// Translations of a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    locale: String,
    data: CatalogueData,
    order: Vec<String>,
}

impl Catalogue {
    /// Create an empty catalogue for the given locale.
    pub fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into(), data: CatalogueData::new(), order: Vec::new() }
    }

    /// Create a catalogue from previously persisted data.
    pub fn from_data(locale: impl Into<String>, data: CatalogueData) -> Self {
        let order = data.keys().cloned().collect();
        Self { locale: locale.into(), data, order }
    }

    /// Wrap the catalogue into a shared handle.
    pub fn into_shared(self) -> SharedCatalogue {
        Rc::new(RefCell::new(self))
    }

    /// Locale this catalogue belongs to.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Check if a message exists in the domain.
    pub fn has(&self, domain: &str, id: &str) -> bool {
        self.data.get(domain).is_some_and(|messages| messages.contains_key(id))
    }

    /// Get a translated message.
    ///
    /// Fails with [`Error::UndefinedMessage`] when [`Catalogue::has`] is false.
    pub fn get(&self, domain: &str, id: &str) -> Result<&str> {
        self.data
            .get(domain)
            .and_then(|messages| messages.get(id))
            .map(String::as_str)
            .ok_or_else(|| Error::UndefinedMessage {
                domain: domain.to_string(),
                id: id.to_string(),
            })
    }

    /// Insert or overwrite a message.
    pub fn set(&mut self, domain: &str, id: impl Into<String>, value: impl Into<String>) {
        self.domain_mut(domain).insert(id.into(), value.into());
    }

    /// Insert a message only when the domain does not define it yet.
    ///
    /// Returns `true` if the message was inserted.
    pub fn set_if_absent(
        &mut self,
        domain: &str,
        id: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let messages = self.domain_mut(domain);
        let id = id.into();
        if messages.contains_key(&id) {
            return false;
        }
        messages.insert(id, value.into());
        true
    }

    /// Merge domain data into this catalogue.
    ///
    /// With `follow` set, incoming messages overwrite resident ones on
    /// collision. Without it, resident messages are kept and incoming data
    /// only fills the gaps.
    pub fn merge_from(&mut self, other: &CatalogueData, follow: bool) {
        for (domain, messages) in other {
            let resident = self.domain_mut(domain);
            for (id, value) in messages {
                if follow || !resident.contains_key(id) {
                    resident.insert(id.clone(), value.clone());
                }
            }
        }
    }

    /// Domain names in order of first insertion.
    pub fn domains(&self) -> &[String] {
        &self.order
    }

    /// Messages of a single domain.
    pub fn messages(&self, domain: &str) -> Option<&BTreeMap<String, String>> {
        self.data.get(domain)
    }

    /// Full catalogue data, used as the cached representation.
    pub fn data(&self) -> &CatalogueData {
        &self.data
    }

    /// Total number of messages across all domains.
    pub fn len(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    /// Check if the catalogue holds no messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn domain_mut(&mut self, domain: &str) -> &mut BTreeMap<String, String> {
        if !self.data.contains_key(domain) {
            self.order.push(domain.to_string());
        }
        self.data.entry(domain.to_string()).or_default()
    }
}
