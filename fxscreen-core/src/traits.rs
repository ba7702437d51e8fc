//! Precomputed per-broker trait flags.
//!
//! An offline build step classifies every broker into a set of boolean
//! traits (`isNDD`, `isECN`, `isHFT`, ...) and emits them as a JSON
//! document keyed by broker id. At runtime the table is read-only; the
//! resolver consults it alongside the derivation predicates.
//!
//! Trait names are producer-defined constants and are matched exactly,
//! never normalized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat mapping `broker id -> { trait name -> flag }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TraitTable(HashMap<String, HashMap<String, bool>>);

impl TraitTable {
    /// Empty table: every trait lookup answers false.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: HashMap<String, HashMap<String, bool>>) -> Self {
        Self(map)
    }

    /// Parse the generated flags document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `broker_id` carries `trait_name` set to true.
    ///
    /// False when the broker is unknown or the trait is absent/false.
    /// Never fails.
    pub fn has(&self, broker_id: &str, trait_name: &str) -> bool {
        self.0
            .get(broker_id)
            .and_then(|traits| traits.get(trait_name))
            .copied()
            .unwrap_or(false)
    }

    /// All flags recorded for one broker, if any.
    pub fn get(&self, broker_id: &str) -> Option<&HashMap<String, bool>> {
        self.0.get(broker_id)
    }

    /// Set a flag. Used by the offline producer and by test fixtures.
    pub fn insert(&mut self, broker_id: impl Into<String>, trait_name: impl Into<String>, value: bool) {
        self.0
            .entry(broker_id.into())
            .or_default()
            .insert(trait_name.into(), value);
    }

    /// Number of brokers with at least one recorded flag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TraitTable {
        let mut t = TraitTable::new();
        t.insert("pepperstone", "isECN", true);
        t.insert("pepperstone", "isNDD", true);
        t.insert("pepperstone", "isHFT", false);
        t
    }

    #[test]
    fn present_trait_answers_true() {
        assert!(table().has("pepperstone", "isECN"));
    }

    #[test]
    fn false_trait_answers_false() {
        assert!(!table().has("pepperstone", "isHFT"));
    }

    #[test]
    fn absent_trait_answers_false() {
        assert!(!table().has("pepperstone", "isDMA"));
    }

    #[test]
    fn unknown_broker_answers_false() {
        assert!(!table().has("nobody", "isECN"));
    }

    #[test]
    fn trait_names_are_exact_not_normalized() {
        // "isecn" is a different name from "isECN".
        assert!(!table().has("pepperstone", "isecn"));
    }

    #[test]
    fn parses_generated_flags_document() {
        let json = r#"{"xm": {"isECN": true, "isBeginnerFriendly": true}, "ig": {}}"#;
        let t = TraitTable::from_json_str(json).unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.has("xm", "isECN"));
        assert!(!t.has("ig", "isECN"));
        assert!(t.get("ig").is_some());
        assert!(t.get("missing").is_none());
    }
}
