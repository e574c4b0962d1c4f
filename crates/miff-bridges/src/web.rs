//! Web bridge facade
//!
//! DOM/canvas consumers take flat entity lists with asset manifests split by
//! kind (sprites, sounds, scripts, stylesheets).

use crate::builders::{combat_nodes, npc_node, result_node, ui_nodes, BuildOptions};
use crate::dispatch::ManagerSet;
use crate::output::BridgeOutput;
use miff_engines::adapter_for;
use miff_schema::{
    BridgeError, BridgeResult, Engine, PayloadMetadata, RenderData, WebBridgeConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebRenderData {
    pub entities: Vec<Value>,
    pub components: Vec<WebComponent>,
    pub sprites: Vec<String>,
    pub sounds: Vec<String>,
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
}

pub struct WebBridge {
    managers: ManagerSet,
}

impl WebBridge {
    pub fn new() -> Self {
        Self {
            managers: ManagerSet::new(),
        }
    }

    pub fn simulate(&mut self, module: &str, data: &Value, config: &WebBridgeConfig) -> BridgeOutput {
        finish("simulate", module, self.simulate_inner(module, data, config))
    }

    pub fn render(&mut self, module: &str, data: &Value, config: &WebBridgeConfig) -> BridgeOutput {
        finish("render", module, self.render_inner(module, data, config))
    }

    pub fn interop(&mut self, module: &str, data: &Value, config: &WebBridgeConfig) -> BridgeOutput {
        finish("interop", module, self.interop_inner(module, data, config))
    }

    pub fn dump(&self, module: &str) -> BridgeOutput {
        finish("dump", module, Ok(WebRenderData::default()))
    }

    fn simulate_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &WebBridgeConfig,
    ) -> BridgeResult<WebRenderData> {
        let result = self.managers.simulate(module, data)?;
        let mut render = WebRenderData::default();
        render.entities.push(to_web(&result_node(module, &result))?);
        Ok(render)
    }

    fn render_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &WebBridgeConfig,
    ) -> BridgeResult<WebRenderData> {
        let opts = BuildOptions::web();
        let mut render = WebRenderData::default();

        match module {
            "npcs" => {
                for npc in self.managers.npcs.list(None) {
                    render.entities.push(to_web(&npc_node(npc, &opts))?);
                    render.components.push(WebComponent {
                        kind: "NPCController".to_string(),
                        data: serde_json::json!({
                            "npcId": npc.id,
                            "behavior": npc.behavior,
                            "questIds": npc.quest_ids,
                        }),
                    });
                }
                render.sprites =
                    strings(&["npc_sprite.png", "quest_icon.png", "merchant_icon.png"]);
                render.sounds = strings(&["npc_greeting.mp3", "quest_accept.mp3"]);
                render.scripts =
                    strings(&["NPCController.js", "QuestSystem.js", "MerchantUI.js"]);
                render.styles = strings(&["npc-styles.css", "quest-ui.css"]);
            }
            "combat" => {
                for node in combat_nodes(data, &opts) {
                    render.entities.push(to_web(&node)?);
                }
                render.components.push(WebComponent {
                    kind: "CombatController".to_string(),
                    data: serde_json::json!({ "combatData": data }),
                });
                render.sprites = strings(&[
                    "sword_sprite.png",
                    "shield_sprite.png",
                    "effect_particles.png",
                ]);
                render.sounds =
                    strings(&["sword_swing.mp3", "hit_sound.mp3", "victory_fanfare.mp3"]);
                render.scripts =
                    strings(&["CombatController.js", "WeaponSystem.js", "EffectManager.js"]);
                render.styles = strings(&["combat-ui.css", "effects.css"]);
            }
            "ui" => {
                for node in ui_nodes(&opts) {
                    render.entities.push(to_web(&node)?);
                }
                render.sprites = strings(&[
                    "button_normal.png",
                    "button_hover.png",
                    "inventory_bg.png",
                ]);
                render.sounds = strings(&["button_click.mp3", "menu_open.mp3"]);
                render.scripts =
                    strings(&["UIController.js", "InventoryUI.js", "MenuSystem.js"]);
                render.styles = strings(&["ui-styles.css", "inventory.css", "menu.css"]);
            }
            _ => return Err(BridgeError::unknown_module(module)),
        }

        Ok(render)
    }

    fn interop_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &WebBridgeConfig,
    ) -> BridgeResult<WebRenderData> {
        let canonical = adapter_for(Engine::Web).from_native(data);
        let result = self.managers.interop(module, &canonical)?;

        let mut render = WebRenderData::default();
        render.entities.push(to_web(&result_node(module, &result))?);
        Ok(render)
    }
}

impl Default for WebBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(op: &str, module: &str, result: BridgeResult<WebRenderData>) -> BridgeOutput {
    match result.and_then(|render| Ok(serde_json::to_value(render)?)) {
        Ok(render) => BridgeOutput::ok(op, render)
            .with_metadata(PayloadMetadata::now(Engine::Web, module)),
        Err(err) => BridgeOutput::from_error(op, &err),
    }
}

fn to_web(node: &RenderData) -> BridgeResult<Value> {
    adapter_for(Engine::Web).to_native(node)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn npc_render_scales_to_pixels() {
        let mut bridge = WebBridge::new();
        let output = bridge.render("npcs", &json!({}), &WebBridgeConfig::default());
        assert!(output.is_ok());
        let render: WebRenderData =
            serde_json::from_value(output.render_data.unwrap()).unwrap();
        assert_eq!(render.entities.len(), 2);
        assert_eq!(render.entities[0]["x"], 320.0);
        assert_eq!(render.sprites[0], "npc_sprite.png");
    }

    #[test]
    fn simulate_crafting_reports_missing_ingredients() {
        let mut bridge = WebBridge::new();
        let data = json!({ "recipeId": "recipe_iron_sword", "ingredients": ["wood"] });
        let output = bridge.simulate("crafting", &data, &WebBridgeConfig::default());
        assert!(output.is_ok());
        let render: WebRenderData =
            serde_json::from_value(output.render_data.unwrap()).unwrap();
        assert_eq!(render.entities[0]["id"], "crafting_result");
    }

    #[test]
    fn interop_routes_stats_updates() {
        let mut bridge = WebBridge::new();
        let native = json!({
            "id": "player_1",
            "type": "container",
            "properties": { "key": "strength", "base": 12.0 }
        });
        let output = bridge.interop("stats", &native, &WebBridgeConfig::default());
        assert!(output.is_ok());
    }
}
