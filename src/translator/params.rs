//! Placeholder parameters and interpolation.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::rc::Rc;

/// A value substituted into a `{name}` placeholder.
#[derive(Clone)]
pub enum Param {
    /// Plain text.
    Text(String),
    /// Integer, rendered in decimal.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean, rendered as `true`/`false`.
    Bool(bool),
    /// Composite list; renders as an empty string.
    List(Vec<Param>),
    /// Composite map; renders as an empty string.
    Map(BTreeMap<String, Param>),
    /// Lazily computed value; renders as an empty string.
    Deferred(Rc<dyn Fn() -> String>),
    /// Any value with a [`fmt::Display`] implementation.
    ///
    /// A formatting error renders as an empty string.
    Display(Rc<dyn fmt::Display>),
}

impl Param {
    /// Wrap a displayable value.
    pub fn display(value: impl fmt::Display + 'static) -> Self {
        Param::Display(Rc::new(value))
    }

    /// Wrap a lazily computed value.
    pub fn deferred(f: impl Fn() -> String + 'static) -> Self {
        Param::Deferred(Rc::new(f))
    }

    /// Text substituted for this value.
    pub fn render(&self) -> String {
        match self {
            Param::Text(text) => text.clone(),
            Param::Int(value) => value.to_string(),
            Param::Float(value) => value.to_string(),
            Param::Bool(value) => value.to_string(),
            Param::List(_) | Param::Map(_) | Param::Deferred(_) => String::new(),
            Param::Display(value) => {
                let mut out = String::new();
                match write!(out, "{value}") {
                    Ok(()) => out,
                    Err(_) => String::new(),
                }
            },
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Param::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Param::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Param::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Param::List(values) => f.debug_tuple("List").field(values).finish(),
            Param::Map(values) => f.debug_tuple("Map").field(values).finish(),
            Param::Deferred(_) => f.write_str("Deferred(..)"),
            Param::Display(_) => f.write_str("Display(..)"),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(values: Vec<T>) -> Self {
        Param::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Param>> for Param {
    fn from(values: BTreeMap<String, Param>) -> Self {
        Param::Map(values)
    }
}

/// Ordered placeholder values.
///
/// Keys keep their insertion order; inserting an existing key replaces its
/// value in place.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, Param)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters keyed by position (`{0}`, `{1}`, ...).
    pub fn positional<T: Into<Param>>(values: impl IntoIterator<Item = T>) -> Self {
        values.into_iter().enumerate().map(|(i, v)| (i.to_string(), v.into())).collect()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value of a key.
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Replace `{key}` placeholders with parameter values.
///
/// Substitution happens in one pass over `template`: inserted values are
/// never scanned again, and the longest placeholder wins where several
/// match at the same position. Unknown placeholders are left untouched.
pub fn interpolate(template: &str, params: &Params) -> String {
    interpolate_with(template, params, "{", "}")
}

/// [`interpolate`] with custom placeholder delimiters.
pub fn interpolate_with(template: &str, params: &Params, prefix: &str, postfix: &str) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut replacements: Vec<(String, String)> =
        params.iter().map(|(k, v)| (format!("{prefix}{k}{postfix}"), v.render())).collect();
    replacements.retain(|(placeholder, _)| !placeholder.is_empty());
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(c) = rest.chars().next() {
        for (placeholder, value) in &replacements {
            if rest.starts_with(placeholder.as_str()) {
                out.push_str(value);
                rest = &rest[placeholder.len()..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}
