//! Tag library — the curated tag vocabulary, keyed by category.
//!
//! Used to describe and sanity-check tags appearing in signatures; the
//! mapping rules do not depend on it for correctness.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The curated tag vocabulary, keyed by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TagLibrary {
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl TagLibrary {
    /// All tags across every category.
    pub fn all_tags(&self) -> BTreeSet<&str> {
        self.categories
            .values()
            .flat_map(|tags| tags.iter().map(String::as_str))
            .collect()
    }

    /// Whether the library knows the tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.categories
            .values()
            .any(|tags| tags.iter().any(|t| t == tag))
    }

    /// Category a tag belongs to, if any.
    pub fn category_of(&self, tag: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, tags)| tags.iter().any(|t| t == tag))
            .map(|(category, _)| category.as_str())
    }
}
