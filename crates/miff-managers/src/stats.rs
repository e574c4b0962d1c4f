//! Stat blocks keyed by entity id.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single named stat with its base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub key: String,
    pub base: f64,
}

impl Stat {
    pub fn new<S: Into<String>>(key: S, base: f64) -> Self {
        Self {
            key: key.into(),
            base,
        }
    }
}

/// Stores stat blocks per entity; setting an existing key overwrites it.
#[derive(Debug, Default)]
pub struct StatsManager {
    stats: BTreeMap<String, Vec<Stat>>,
}

impl StatsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stat<I: Into<String>, K: Into<String>>(&mut self, id: I, key: K, base: f64) {
        let key = key.into();
        let block = self.stats.entry(id.into()).or_default();
        match block.iter_mut().find(|stat| stat.key == key) {
            Some(stat) => stat.base = base,
            None => block.push(Stat { key, base }),
        }
    }

    pub fn get(&self, id: &str) -> BridgeResult<&[Stat]> {
        self.stats
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| BridgeError::not_found("Stats", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut manager = StatsManager::new();
        manager.set_stat("npc_001", "health", 100.0);
        manager.set_stat("npc_001", "health", 80.0);
        manager.set_stat("npc_001", "mana", 50.0);

        let block = manager.get("npc_001").unwrap();
        assert_eq!(block.len(), 2);
        assert_eq!(block[0], Stat::new("health", 80.0));
    }

    #[test]
    fn missing_entity_is_an_error() {
        let manager = StatsManager::new();
        let err = manager.get("ghost").unwrap_err();
        assert_eq!(err.to_string(), "Stats with ID ghost not found");
    }
}
