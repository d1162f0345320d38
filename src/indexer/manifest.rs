//! File-based source descriptions.
//!
//! A manifest lists classes and call-sites so that indexing can run against
//! the output of any external scanner:
//!
//! ```yaml
//! classes:
//!   - name: App\Controllers\Home
//!     translatable: true
//!     properties:
//!       - name: labels
//!         value: ["[[Welcome]]", "plain"]
//! invocations:
//!   - name: l
//!     arguments: ["hello"]
//!   - name: p
//!     arguments: ["{n} dog|{n} dogs", 1]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::source::{ClassInfo, ClassLocator, Invocation, InvocationLocator};
use crate::error::{Error, Result};

/// Classes and call-sites read from a JSON or YAML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceManifest {
    /// Described classes.
    #[serde(default)]
    pub classes: Vec<ClassInfo>,

    /// Described call-sites.
    #[serde(default)]
    pub invocations: Vec<Invocation>,
}

impl SourceManifest {
    /// Read a manifest; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::format(path, format!("Failed to read manifest: {e}")))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest = if is_json {
            serde_json::from_str(&contents).map_err(|e| Error::format(path, e.to_string()))?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| Error::format(path, e.to_string()))?
        };

        tracing::debug!(path = %path.display(), "Loaded source manifest");
        Ok(manifest)
    }

    fn is_translatable(&self, class: &str) -> bool {
        self.class(class).is_some_and(|info| info.translatable)
    }
}

impl ClassLocator for SourceManifest {
    fn translatable_classes(&self) -> Vec<&ClassInfo> {
        self.classes.iter().filter(|class| class.translatable).collect()
    }

    fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|class| class.name == name)
    }
}

impl InvocationLocator for SourceManifest {
    fn invocations(&self, name: &str) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|call| call.name.eq_ignore_ascii_case(name))
            .filter(|call| {
                // Method calls only count inside classes that can translate.
                !call.name.eq_ignore_ascii_case("say")
                    || call.class.as_deref().is_some_and(|class| self.is_translatable(class))
            })
            .collect()
    }
}
