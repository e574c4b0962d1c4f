//! Level-gated loot tables.
//!
//! Rolls are deterministic: every entry whose minimum level is met drops.
//! Golden tests depend on stable output, so there is no RNG here.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "minLevel")]
    pub min_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub id: String,
    pub entries: Vec<LootEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootRoll {
    #[serde(rename = "tableId")]
    pub table_id: String,
    pub level: u32,
    pub items: Vec<String>,
}

#[derive(Debug)]
pub struct LootManager {
    tables: BTreeMap<String, LootTable>,
}

impl LootManager {
    pub fn new() -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(
            "goblin_common".to_string(),
            LootTable {
                id: "goblin_common".to_string(),
                entries: vec![
                    LootEntry {
                        item_id: "copper_coin".to_string(),
                        min_level: 1,
                    },
                    LootEntry {
                        item_id: "rusty_dagger".to_string(),
                        min_level: 3,
                    },
                    LootEntry {
                        item_id: "goblin_totem".to_string(),
                        min_level: 8,
                    },
                ],
            },
        );
        Self { tables }
    }

    pub fn roll_loot(&self, table_id: &str, level: u32) -> BridgeResult<LootRoll> {
        let table = self
            .tables
            .get(table_id)
            .ok_or_else(|| BridgeError::not_found("Loot table", table_id))?;
        Ok(LootRoll {
            table_id: table.id.clone(),
            level,
            items: table
                .entries
                .iter()
                .filter(|entry| entry.min_level <= level)
                .map(|entry| entry.item_id.clone())
                .collect(),
        })
    }
}

impl Default for LootManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_level_rolls_skip_gated_entries() {
        let manager = LootManager::new();
        let roll = manager.roll_loot("goblin_common", 2).unwrap();
        assert_eq!(roll.items, vec!["copper_coin".to_string()]);
    }

    #[test]
    fn high_level_rolls_drop_everything() {
        let manager = LootManager::new();
        let roll = manager.roll_loot("goblin_common", 10).unwrap();
        assert_eq!(roll.items.len(), 3);
    }

    #[test]
    fn unknown_table_is_an_error() {
        let manager = LootManager::new();
        let err = manager.roll_loot("dragon_hoard", 50).unwrap_err();
        assert_eq!(err.to_string(), "Loot table with ID dragon_hoard not found");
    }
}
