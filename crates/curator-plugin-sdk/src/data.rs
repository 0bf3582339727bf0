use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Set of trait identifiers describing what data is requested or held.
pub type TraitSet = BTreeSet<String>;

/// Opaque string identifying an entity to a manager.
///
/// The manager recognizes references by prefix; beyond that the contents
/// are meaningful only to the manager's backend. Equality is string
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityReference(String);

impl EntityReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityReference {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl From<String> for EntityReference {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// Structured bag of trait → property → value data returned for an entity.
///
/// Built fresh per response; a populated instance is handed to the host and
/// never mutated afterwards. Property values are dynamically typed scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitsData {
    traits: BTreeMap<String, BTreeMap<String, Value>>,
}

impl TraitsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imbues the trait with no properties; a no-op if already present.
    pub fn add_trait(&mut self, trait_id: &str) {
        self.traits.entry(trait_id.to_string()).or_default();
    }

    /// Sets a property, imbuing the trait first if absent.
    pub fn set_property(&mut self, trait_id: &str, property: &str, value: Value) {
        self.traits
            .entry(trait_id.to_string())
            .or_default()
            .insert(property.to_string(), value);
    }

    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits.contains_key(trait_id)
    }

    pub fn property(&self, trait_id: &str, property: &str) -> Option<&Value> {
        self.traits.get(trait_id)?.get(property)
    }

    /// The identifiers of all imbued traits.
    pub fn trait_set(&self) -> TraitSet {
        self.traits.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_property_imbues_missing_trait() {
        let mut data = TraitsData::new();
        data.set_property("a.trait", "size", json!(42));
        assert!(data.has_trait("a.trait"));
        assert_eq!(data.property("a.trait", "size"), Some(&json!(42)));
    }

    #[test]
    fn trait_set_lists_imbued_traits_only() {
        let mut data = TraitsData::new();
        data.add_trait("b.trait");
        data.add_trait("a.trait");
        let expected: TraitSet = ["a.trait".to_string(), "b.trait".to_string()].into();
        assert_eq!(data.trait_set(), expected);
        assert_eq!(data.property("b.trait", "anything"), None);
    }

    #[test]
    fn entity_reference_equality_is_string_equality() {
        let a = EntityReference::from("scheme:///x");
        let b = EntityReference::new(String::from("scheme:///x"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "scheme:///x");
    }
}
