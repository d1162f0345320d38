//! Abstract view of scanned source code.
//!
//! The indexer does not parse source files itself. A scanner describes the
//! classes and call-sites it found through these types and the two locator
//! traits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A field with a default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Property name.
    pub name: String,

    /// Default value; nested lists and maps are searched recursively.
    #[serde(default)]
    pub value: serde_json::Value,

    /// Excludes the property from indexing.
    #[serde(default, alias = "do-not-index")]
    pub do_not_index: bool,
}

/// A class (or type) description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Fully qualified name, used as the bundle for domain resolution.
    pub name: String,

    /// Parent class name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Whether the class has the translation capability.
    #[serde(default)]
    pub translatable: bool,

    /// Include messages declared by parent classes.
    #[serde(default)]
    pub inherit_translations: bool,

    /// Properties with default values.
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,

    /// Constant values.
    #[serde(default)]
    pub constants: BTreeMap<String, serde_json::Value>,
}

/// A call-site argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    /// A string literal.
    Literal(String),
    /// An expression that is only known at runtime.
    Expression {
        /// Source text of the expression.
        expr: String,
    },
    /// Any other constant (numbers, arrays, ...).
    Value(serde_json::Value),
}

impl Argument {
    /// The literal string value, if the argument is a string literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Argument::Literal(value) => Some(value),
            Argument::Expression { .. } | Argument::Value(_) => None,
        }
    }
}

/// A call of a translation function or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Called function or method name (`l`, `p`, `say`).
    #[serde(alias = "function")]
    pub name: String,

    /// Class the call appears in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Arguments in call order.
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Invocation {
    /// Argument at `index`, if present.
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }
}

/// Provides class descriptions.
pub trait ClassLocator {
    /// Every class with the translation capability.
    fn translatable_classes(&self) -> Vec<&ClassInfo>;

    /// Look up any class by name, used to follow parents.
    fn class(&self, name: &str) -> Option<&ClassInfo>;
}

/// Provides call-site descriptions.
pub trait InvocationLocator {
    /// Every call of the named function or method.
    fn invocations(&self, name: &str) -> Vec<&Invocation>;
}
