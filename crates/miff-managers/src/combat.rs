//! One-shot combat exchange simulation.

use miff_schema::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    #[serde(default = "default_health")]
    pub health: f64,
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defense: f64,
}

fn default_health() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    #[serde(rename = "attackerId")]
    pub attacker_id: String,
    #[serde(rename = "defenderId")]
    pub defender_id: String,
    pub damage: f64,
    #[serde(rename = "defenderHpAfter")]
    pub defender_hp_after: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victor: Option<String>,
}

/// Stateless damage resolution; attack minus defense, at least one point.
#[derive(Debug, Default)]
pub struct CombatManager;

impl CombatManager {
    pub fn new() -> Self {
        Self
    }

    pub fn simulate(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
    ) -> BridgeResult<CombatResult> {
        if attacker.id.is_empty() || defender.id.is_empty() {
            return Err(BridgeError::manager("Combatants must have ids"));
        }
        let damage = (attacker.attack - defender.defense).max(1.0);
        let defender_hp_after = defender.health - damage;
        Ok(CombatResult {
            attacker_id: attacker.id.clone(),
            defender_id: defender.id.clone(),
            damage,
            defender_hp_after,
            victor: (defender_hp_after <= 0.0).then(|| attacker.id.clone()),
        })
    }
}
