//! Layered value resolution.
//!
//! A template placeholder may be defined by several value sources at once: the
//! scheme, the variant, the base palette and the defaults. [`ValueSources`]
//! holds them most-specific first and resolves every key to the value of the
//! first source that defines it. Later sources only fill keys that earlier
//! ones leave out; values are never merged partially.
//!
//! ```rust
//! use schemegen::{ValueMap, ValueSources};
//!
//! let scheme = ValueMap::from([("Accent".to_string(), "#FF0078D7".to_string())]);
//! let defaults = ValueMap::from([
//!     ("Accent".to_string(), "#FF000000".to_string()),
//!     ("Font".to_string(), "Segoe UI".to_string()),
//! ]);
//!
//! let sources = ValueSources::from_slice(&[&scheme, &defaults]);
//! assert_eq!(sources.get("Accent"), Some("#FF0078D7"));
//! assert_eq!(sources.get("Font"), Some("Segoe UI"));
//! assert_eq!(sources.get("Missing"), None);
//! ```

use crate::params::ValueMap;

/// Ordered list of value sources, highest precedence first.
#[derive(Debug, Clone, Default)]
pub struct ValueSources<'a> {
    sources: Vec<&'a ValueMap>,
}

impl<'a> ValueSources<'a> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn from_slice(sources: &[&'a ValueMap]) -> Self {
        Self {
            sources: sources.to_vec(),
        }
    }

    /// Appends a source with lower precedence than every existing one.
    pub fn push(&mut self, source: &'a ValueMap) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterates the sources, highest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = &'a ValueMap> + '_ {
        self.sources.iter().copied()
    }

    /// Looks up `key` in the first source that defines it.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.sources
            .iter()
            .copied()
            .find_map(|source| source.get(key))
            .map(String::as_str)
    }

    /// Collapses the sources into one effective mapping.
    pub fn resolve(&self) -> ValueMap {
        let mut resolved = ValueMap::new();
        for source in &self.sources {
            for (key, value) in source.iter() {
                resolved
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        resolved
    }
}

impl<'a> FromIterator<&'a ValueMap> for ValueSources<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ValueMap>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

/// Resolves `sources` (highest precedence first) into one mapping.
pub fn resolve(sources: &[&ValueMap]) -> ValueMap {
    ValueSources::from_slice(sources).resolve()
}
