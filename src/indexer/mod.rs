//! Extraction of translatable messages from source descriptions.
//!
//! Two kinds of messages are indexed:
//! - `[[...]]` literals found in property defaults and constants of classes
//!   with the translation capability
//! - literal first arguments of `l(message, options?, domain?)`,
//!   `p(message, number, options?, domain?)` and
//!   `say(message, options?, domain?)` calls
//!
//! Every message is registered as its own translation. Messages that are
//! already present are left alone, so re-indexing never overwrites
//! translated text.

mod manifest;
mod source;

pub use manifest::SourceManifest;
pub use source::{Argument, ClassInfo, ClassLocator, Invocation, InvocationLocator, PropertyInfo};

use std::collections::HashSet;

use crate::catalogue::Catalogue;
use crate::config::TranslatorConfig;
use crate::translator::{is_message, strip_message};

/// Functions and methods whose call-sites are indexed.
const INDEXED_CALLS: [&str; 3] = ["l", "p", "say"];

/// Counters collected while indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IndexStats {
    /// Messages encountered.
    pub found: usize,
    /// Messages that were not in the catalogue before.
    pub registered: usize,
}

/// Collects messages into a catalogue.
#[derive(Debug)]
pub struct Indexer<'a> {
    config: &'a TranslatorConfig,
    catalogue: Catalogue,
    stats: IndexStats,
}

impl<'a> Indexer<'a> {
    /// Create an indexer filling `catalogue`.
    pub fn new(config: &'a TranslatorConfig, catalogue: Catalogue) -> Self {
        Self { config, catalogue, stats: IndexStats::default() }
    }

    /// Register a message as its own translation.
    ///
    /// With `resolve_domain` set, `domain` is treated as a bundle name and
    /// mapped through the configured domain patterns. Returns `true` if the
    /// message was new.
    pub fn register_message(&mut self, domain: &str, message: &str, resolve_domain: bool) -> bool {
        let domain =
            if resolve_domain { self.config.resolve_domain(domain) } else { domain.to_string() };

        self.stats.found += 1;
        let inserted = self.catalogue.set_if_absent(&domain, message, message);
        if inserted {
            self.stats.registered += 1;
        }

        tracing::debug!(domain = %domain, message = message, new = inserted, "Indexed message");
        inserted
    }

    /// Index `[[...]]` literals declared by translatable classes.
    pub fn index_classes(&mut self, locator: &dyn ClassLocator) {
        for class in locator.translatable_classes() {
            let mut visited = HashSet::new();
            let mut messages = Vec::new();
            collect_class_messages(locator, class, &mut visited, &mut messages);

            for message in messages {
                self.register_message(&class.name, &message, true);
            }
        }
    }

    /// Index literal messages passed to `l`, `p` and `say`.
    pub fn index_invocations(&mut self, locator: &dyn InvocationLocator) {
        for name in INDEXED_CALLS {
            for invocation in locator.invocations(name) {
                let Some(message) = invocation.argument(0).and_then(Argument::as_literal) else {
                    tracing::debug!(call = %invocation.name, "Skipping non-literal message");
                    continue;
                };

                let domain = self.invocation_domain(invocation);
                self.register_message(&domain, strip_message(message), false);
            }
        }
    }

    /// Populated catalogue.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Consume the indexer, returning the catalogue.
    pub fn into_catalogue(self) -> Catalogue {
        self.catalogue
    }

    /// Counters so far.
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    fn invocation_domain(&self, invocation: &Invocation) -> String {
        let name = invocation.name.to_lowercase();

        let domain_index = match name.as_str() {
            "l" | "say" => 2,
            "p" => 3,
            _ => return self.config.default_domain.clone(),
        };

        if let Some(domain) = invocation.argument(domain_index).and_then(Argument::as_literal) {
            return self.config.resolve_domain(domain);
        }

        match (&*name, invocation.class.as_deref()) {
            ("say", Some(class)) => self.config.resolve_domain(class),
            _ => self.config.default_domain.clone(),
        }
    }
}

/// Collect messages of a class, then of its parents when inheritance is on.
fn collect_class_messages(
    locator: &dyn ClassLocator,
    class: &ClassInfo,
    visited: &mut HashSet<String>,
    messages: &mut Vec<String>,
) {
    if !visited.insert(class.name.clone()) {
        return;
    }

    for property in class.properties.iter().filter(|p| !p.do_not_index) {
        collect_value_messages(&property.value, messages);
    }
    for value in class.constants.values() {
        collect_value_messages(value, messages);
    }

    if class.inherit_translations
        && let Some(parent) = class.parent.as_deref().and_then(|name| locator.class(name))
    {
        collect_class_messages(locator, parent, visited, messages);
    }
}

fn collect_value_messages(value: &serde_json::Value, messages: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) if is_message(s) => {
            messages.push(strip_message(s).to_string());
        },
        serde_json::Value::Array(values) => {
            for value in values {
                collect_value_messages(value, messages);
            }
        },
        serde_json::Value::Object(map) => {
            for value in map.values() {
                collect_value_messages(value, messages);
            }
        },
        _ => {},
    }
}
