//! JSON translation files.

use std::collections::BTreeMap;
use std::path::Path;

use super::{FileDumper, FileLoader, read_file, single_domain};
use crate::catalogue::{Catalogue, CatalogueData};
use crate::error::{Error, Result};

/// Loads a JSON object of message id → translation.
///
/// Nested objects are flattened with `.` the same way YAML files are.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileLoader;

impl FileLoader for JsonFileLoader {
    fn load(&self, path: &Path, _locale: &str, domain: &str) -> Result<CatalogueData> {
        let contents = read_file(path)?;
        if contents.trim().is_empty() {
            return Ok(CatalogueData::new());
        }

        let doc: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| Error::format(path, format!("Failed to parse JSON: {e}")))?;
        if !doc.is_object() {
            return Err(Error::format(path, "Expected an object of message ids"));
        }

        let mut messages = BTreeMap::new();
        flatten_json_value(&doc, "", &mut messages);
        Ok(single_domain(domain, messages))
    }
}

fn flatten_json_value(
    value: &serde_json::Value,
    prefix: &str,
    messages: &mut BTreeMap<String, String>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                let new_prefix =
                    if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                flatten_json_value(val, &new_prefix, messages);
            }
        },
        serde_json::Value::String(s) => {
            messages.insert(prefix.to_string(), s.clone());
        },
        serde_json::Value::Number(n) => {
            messages.insert(prefix.to_string(), n.to_string());
        },
        serde_json::Value::Bool(b) => {
            messages.insert(prefix.to_string(), b.to_string());
        },
        serde_json::Value::Null | serde_json::Value::Array(_) => {},
    }
}

/// Writes a domain as a pretty-printed JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileDumper;

impl FileDumper for JsonFileDumper {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String> {
        let empty = BTreeMap::new();
        let messages = catalogue.messages(domain).unwrap_or(&empty);
        let mut out = serde_json::to_string_pretty(messages)?;
        out.push('\n');
        Ok(out)
    }
}
