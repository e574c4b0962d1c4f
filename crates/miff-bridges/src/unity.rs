//! Unity bridge facade
//!
//! Unity consumes entity lists rather than a node tree; rendered canonical
//! trees go through the Unity adapter and land in the `entities` array next
//! to the component/prefab/scene manifests.

use crate::builders::{combat_nodes, npc_node, result_node, world_nodes, BuildOptions};
use crate::dispatch::ManagerSet;
use crate::output::BridgeOutput;
use miff_engines::adapter_for;
use miff_schema::{
    BridgeError, BridgeResult, Engine, PayloadMetadata, RenderData, UnityBridgeConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A component manifest entry attached alongside the rendered entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnityComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnityRenderData {
    pub entities: Vec<Value>,
    pub components: Vec<UnityComponent>,
    pub prefabs: Vec<String>,
    pub scenes: Vec<String>,
    pub scripts: Vec<String>,
}

pub struct UnityBridge {
    managers: ManagerSet,
}

impl UnityBridge {
    pub fn new() -> Self {
        Self {
            managers: ManagerSet::new(),
        }
    }

    pub fn simulate(&mut self, module: &str, data: &Value, config: &UnityBridgeConfig) -> BridgeOutput {
        finish("simulate", module, self.simulate_inner(module, data, config))
    }

    pub fn render(&mut self, module: &str, data: &Value, config: &UnityBridgeConfig) -> BridgeOutput {
        finish("render", module, self.render_inner(module, data, config))
    }

    pub fn interop(&mut self, module: &str, data: &Value, config: &UnityBridgeConfig) -> BridgeOutput {
        finish("interop", module, self.interop_inner(module, data, config))
    }

    pub fn dump(&self, module: &str) -> BridgeOutput {
        finish("dump", module, Ok(UnityRenderData::default()))
    }

    fn simulate_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &UnityBridgeConfig,
    ) -> BridgeResult<UnityRenderData> {
        let result = self.managers.simulate(module, data)?;
        let mut render = UnityRenderData::default();
        render.entities.push(to_unity(&result_node(module, &result))?);
        Ok(render)
    }

    fn render_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &UnityBridgeConfig,
    ) -> BridgeResult<UnityRenderData> {
        let opts = BuildOptions::unity();
        let mut render = UnityRenderData {
            scenes: strings(&["MainScene", "CombatScene", "WorldScene"]),
            ..UnityRenderData::default()
        };

        match module {
            "npcs" => {
                for npc in self.managers.npcs.list(None) {
                    render.entities.push(to_unity(&npc_node(npc, &opts))?);
                    render.components.push(UnityComponent {
                        kind: "NPCController".to_string(),
                        data: serde_json::json!({
                            "npcId": npc.id,
                            "behavior": npc.behavior,
                            "movementPattern": npc.movement_pattern,
                            "questIds": npc.quest_ids,
                        }),
                        enabled: true,
                    });
                }
                render.prefabs = strings(&["NPCPrefab", "QuestGiverPrefab", "MerchantPrefab"]);
                render.scripts = strings(&["NPCController", "QuestGiver", "MerchantBehavior"]);
            }
            "combat" => {
                for node in combat_nodes(data, &opts) {
                    render.entities.push(to_unity(&node)?);
                }
                render.components.push(UnityComponent {
                    kind: "CombatController".to_string(),
                    data: serde_json::json!({ "combatData": data }),
                    enabled: true,
                });
                render.prefabs = strings(&["CombatantPrefab", "WeaponPrefab", "EffectPrefab"]);
                render.scripts = strings(&["CombatController", "WeaponSystem", "EffectManager"]);
            }
            "world" => {
                for node in world_nodes(data) {
                    render.entities.push(to_unity(&node)?);
                }
                render.components.push(UnityComponent {
                    kind: "ZoneController".to_string(),
                    data: serde_json::json!({ "worldData": data }),
                    enabled: true,
                });
                render.prefabs = strings(&["ZonePrefab", "ItemPrefab", "InteractablePrefab"]);
                render.scripts = strings(&["ZoneController", "ItemSystem", "InteractionManager"]);
            }
            _ => return Err(BridgeError::unknown_module(module)),
        }

        Ok(render)
    }

    fn interop_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &UnityBridgeConfig,
    ) -> BridgeResult<UnityRenderData> {
        let canonical = adapter_for(Engine::Unity).from_native(data);
        let result = self.managers.interop(module, &canonical)?;

        let mut render = UnityRenderData::default();
        render.entities.push(to_unity(&result_node(module, &result))?);
        Ok(render)
    }
}

impl Default for UnityBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(op: &str, module: &str, result: BridgeResult<UnityRenderData>) -> BridgeOutput {
    match result.and_then(|render| Ok(serde_json::to_value(render)?)) {
        Ok(render) => BridgeOutput::ok(op, render)
            .with_metadata(PayloadMetadata::now(Engine::Unity, module)),
        Err(err) => BridgeOutput::from_error(op, &err),
    }
}

fn to_unity(node: &RenderData) -> BridgeResult<Value> {
    adapter_for(Engine::Unity).to_native(node)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
