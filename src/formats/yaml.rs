//! YAML translation files.

use std::collections::BTreeMap;
use std::path::Path;

use super::{FileDumper, FileLoader, read_file, single_domain};
use crate::catalogue::{Catalogue, CatalogueData};
use crate::error::{Error, Result};

/// Loads YAML mappings of message id → translation.
///
/// Nested mappings are flattened into dot-notation ids, so
///
/// ```yaml
/// app:
///   title: "Search"
/// ```
///
/// registers the id `app.title`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileLoader;

impl FileLoader for YamlFileLoader {
    fn load(&self, path: &Path, _locale: &str, domain: &str) -> Result<CatalogueData> {
        let contents = read_file(path)?;
        let messages = parse_yaml(&contents).map_err(|e| Error::format(path, e))?;
        Ok(single_domain(domain, messages))
    }
}

fn parse_yaml(contents: &str) -> std::result::Result<BTreeMap<String, String>, String> {
    let mut messages = BTreeMap::new();
    if contents.trim().is_empty() {
        return Ok(messages);
    }

    let doc: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse YAML: {e}"))?;

    match doc {
        serde_yaml::Value::Mapping(_) => flatten_yaml_value(&doc, "", &mut messages),
        serde_yaml::Value::Null => {},
        _ => return Err("Expected a mapping of message ids at the top level".to_string()),
    }

    Ok(messages)
}

/// Recursively flatten YAML structure into dot-notation keys.
fn flatten_yaml_value(
    value: &serde_yaml::Value,
    prefix: &str,
    messages: &mut BTreeMap<String, String>,
) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, val) in map {
                let Some(key_str) = scalar_to_string(key) else {
                    continue;
                };
                let new_prefix =
                    if prefix.is_empty() { key_str } else { format!("{prefix}.{key_str}") };
                flatten_yaml_value(val, &new_prefix, messages);
            }
        },
        serde_yaml::Value::Tagged(tagged) => flatten_yaml_value(&tagged.value, prefix, messages),
        other => {
            if let Some(text) = scalar_to_string(other) {
                messages.insert(prefix.to_string(), text);
            }
        },
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Writes a domain as a flat YAML mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileDumper;

impl FileDumper for YamlFileDumper {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String> {
        let empty = BTreeMap::new();
        let messages = catalogue.messages(domain).unwrap_or(&empty);
        Ok(serde_yaml::to_string(messages)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flat() {
        let result = parse_yaml("hello: Hola\n\"Twig Version\": \"Twig версия\"\n").unwrap();
        assert_eq!(result.get("hello"), Some(&"Hola".to_string()));
        assert_eq!(result.get("Twig Version"), Some(&"Twig версия".to_string()));
    }

    #[test]
    fn test_parse_nested() {
        let yaml = r#"
app:
  titles:
    search: "Suche"
    count: 3
"#;
        let result = parse_yaml(yaml).unwrap();
        assert_eq!(result.get("app.titles.search"), Some(&"Suche".to_string()));
        assert_eq!(result.get("app.titles.count"), Some(&"3".to_string()));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_yaml("invalid: yaml: content: [").is_err());
        assert!(parse_yaml("- a\n- b\n").is_err());
        assert!(parse_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_load_file_into_domain() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("views.yaml");
        fs::write(&path, "Welcome: Bienvenido\n").unwrap();

        let data = YamlFileLoader.load(&path, "es", "views").unwrap();
        assert_eq!(data["views"]["Welcome"], "Bienvenido");
    }

    #[test]
    fn test_load_invalid_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "a: [").unwrap();

        let err = YamlFileLoader.load(&path, "es", "broken").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_dump() {
        let mut catalogue = Catalogue::new("en");
        catalogue.set("messages", "hello", "Hi");
        let out = YamlFileDumper.dump(&catalogue, "messages").unwrap();
        assert_eq!(parse_yaml(&out).unwrap().get("hello"), Some(&"Hi".to_string()));
    }
}
