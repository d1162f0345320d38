//! Serde support for the ordered `domains` table.
//!
//! The table is a YAML mapping, but resolution depends on the order in which
//! domains are written, so it is kept as a list of pairs in memory.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};

use super::DomainRules;

pub fn serialize<S>(domains: &DomainRules, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(domains.len()))?;
    for (domain, patterns) in domains {
        map.serialize_entry(domain, patterns)?;
    }
    map.end()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DomainRules, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(DomainsVisitor)
}

struct DomainsVisitor;

impl<'de> Visitor<'de> for DomainsVisitor {
    type Value = DomainRules;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of domain names to pattern lists")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut domains = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((domain, patterns)) = access.next_entry::<String, Patterns>()? {
            domains.push((domain, patterns.into_vec()));
        }
        Ok(domains)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Vec::new())
    }
}

/// A single pattern or a list of patterns.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    fn into_vec(self) -> Vec<String> {
        match self {
            Patterns::One(pattern) => vec![pattern],
            Patterns::Many(patterns) => patterns,
        }
    }
}
