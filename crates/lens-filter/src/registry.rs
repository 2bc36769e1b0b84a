//! Attribute registry: descriptor lookup by name.
//!
//! The registry is passed explicitly to every operation that needs descriptor
//! metadata. Insertion order is kept so pickers list attributes the way the
//! backend declared them.

use std::collections::HashMap;

use lens_api::models::{AttributeDescriptor, LensConfig};
use strsim::levenshtein;

use crate::error::{FilterError, FilterResult};

/// Maximum Levenshtein distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Finds the closest candidate to `query`, ignoring case.
///
/// Exact matches and candidates further than [`MAX_SUGGESTION_DISTANCE`]
/// yield `None`.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, distance)| *distance)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}

/// Attribute descriptors keyed by name.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    descriptors: HashMap<String, AttributeDescriptor>,
    order: Vec<String>,
}

impl AttributeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from the backend's configuration response.
    pub fn from_config(config: &LensConfig) -> Self {
        config.attributes.iter().cloned().collect()
    }

    /// Adds a descriptor. A later descriptor with the same name replaces the
    /// earlier one but keeps its position.
    pub fn insert(&mut self, descriptor: AttributeDescriptor) {
        if !self.descriptors.contains_key(&descriptor.name) {
            self.order.push(descriptor.name.clone());
        }
        self.descriptors.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.descriptors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Looks up a descriptor, failing with a suggestion if none is registered.
    pub fn require(&self, name: &str) -> FilterResult<&AttributeDescriptor> {
        self.get(name)
            .ok_or_else(|| FilterError::unknown_attribute(name, self.suggest(name)))
    }

    /// Returns the closest registered name to `name`, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<String> {
        find_similar_name(name, self.order.iter().map(String::as_str))
    }

    /// Iterates descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.order.iter().filter_map(|name| self.descriptors.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the attributes that declare `parent` in their `parentFilters`.
    pub fn dependents_of(&self, parent: &str) -> Vec<&AttributeDescriptor> {
        self.iter()
            .filter(|descriptor| descriptor.depends_on(parent))
            .collect()
    }
}

impl FromIterator<AttributeDescriptor> for AttributeRegistry {
    fn from_iter<I: IntoIterator<Item = AttributeDescriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.insert(descriptor);
        }
        registry
    }
}
