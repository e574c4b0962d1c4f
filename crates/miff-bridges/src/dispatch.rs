//! Module dispatch shared by the three bridges
//!
//! Every bridge owns a `ManagerSet`; the per-module argument shapes and the
//! unknown-module error are identical across engines, so the dispatch lives
//! here and the bridges only differ in how they shape the result.

use miff_managers::{
    CombatManager, Combatant, CraftingManager, EconomyManager, LootManager, NpcManager, NpcUpdate,
    QuestManager, QuestUpdate, StatsManager,
};
use miff_schema::{BridgeError, BridgeResult, RenderData};
use serde_json::Value;

/// The domain managers behind one bridge, created fresh per bridge.
pub struct ManagerSet {
    pub npcs: NpcManager,
    pub quests: QuestManager,
    pub combat: CombatManager,
    pub stats: StatsManager,
    pub crafting: CraftingManager,
    pub loot: LootManager,
    pub economy: EconomyManager,
}

impl ManagerSet {
    pub fn new() -> Self {
        Self {
            npcs: NpcManager::new(),
            quests: QuestManager::new(),
            combat: CombatManager::new(),
            stats: StatsManager::new(),
            crafting: CraftingManager::new(),
            loot: LootManager::new(),
            economy: EconomyManager::new(),
        }
    }

    /// Run a module's simulate-style operation and return the raw result.
    pub fn simulate(&mut self, module: &str, data: &Value) -> BridgeResult<Value> {
        log::debug!("simulating module {module}");
        let result = match module {
            "npcs" => {
                let npc_id = str_field(data, "npcId");
                let duration = data.get("duration").and_then(Value::as_u64).unwrap_or(0);
                serde_json::to_value(self.npcs.simulate(&npc_id, duration)?)?
            }
            "combat" => {
                let attacker: Combatant = field(data, "attacker")?;
                let defender: Combatant = field(data, "defender")?;
                serde_json::to_value(self.combat.simulate(&attacker, &defender)?)?
            }
            "crafting" => {
                let recipe_id = str_field(data, "recipeId");
                let ingredients: Vec<String> = data
                    .get("ingredients")
                    .cloned()
                    .map(serde_json::from_value)
                    .transpose()?
                    .unwrap_or_default();
                serde_json::to_value(self.crafting.simulate_craft(&recipe_id, &ingredients)?)?
            }
            "loot" => {
                let table_id = str_field(data, "tableId");
                let level = data.get("level").and_then(Value::as_u64).unwrap_or(1) as u32;
                serde_json::to_value(self.loot.roll_loot(&table_id, level)?)?
            }
            "economy" => {
                let item_id = str_field(data, "itemId");
                let quantity = data.get("quantity").and_then(Value::as_u64).unwrap_or(1) as u32;
                serde_json::to_value(self.economy.calculate_price(&item_id, quantity)?)?
            }
            _ => return Err(BridgeError::unknown_module(module)),
        };
        Ok(result)
    }

    /// Apply inbound (already canonicalized) engine data to a module's state
    /// and return the updated entity.
    pub fn interop(&mut self, module: &str, canonical: &RenderData) -> BridgeResult<Value> {
        let props = Value::Object(canonical.props.clone());
        let result = match module {
            "npcs" => {
                let mut update: NpcUpdate = serde_json::from_value(props)?;
                if update.name.is_none() {
                    update.name = canonical.name.clone();
                }
                serde_json::to_value(self.npcs.update(&canonical.id, update)?)?
            }
            "quests" => {
                let update: QuestUpdate = serde_json::from_value(props)?;
                serde_json::to_value(self.quests.update(&canonical.id, update)?)?
            }
            "stats" => {
                let key = canonical
                    .props
                    .get("key")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let base = canonical
                    .props
                    .get("base")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                self.stats.set_stat(&canonical.id, key, base);
                serde_json::to_value(self.stats.get(&canonical.id)?)?
            }
            _ => return Err(BridgeError::unknown_module(module)),
        };
        Ok(result)
    }
}

impl Default for ManagerSet {
    fn default() -> Self {
        Self::new()
    }
}

fn str_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn field<T: serde::de::DeserializeOwned>(data: &Value, key: &str) -> BridgeResult<T> {
    let value = data
        .get(key)
        .cloned()
        .ok_or_else(|| BridgeError::manager(format!("Missing field: {key}")))?;
    Ok(serde_json::from_value(value)?)
}
