//! Godot bridge facade
//!
//! Renders canonical trees through the Godot adapter and wraps them in the
//! Godot-side manifest (node tree plus resource/script/scene/animation/input
//! lists).

use crate::builders::{combat_nodes, npc_node, result_node, ui_nodes, BuildOptions};
use crate::dispatch::ManagerSet;
use crate::output::BridgeOutput;
use miff_engines::adapter_for;
use miff_schema::{
    BridgeError, BridgeResult, Engine, GodotBridgeConfig, PayloadMetadata, RenderData,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Godot-side resource declaration (script, animation library, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GodotResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    pub data: Value,
}

/// Everything a Godot project needs to materialize one bridge call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GodotRenderData {
    pub nodes: Vec<Value>,
    pub resources: Vec<GodotResource>,
    pub scripts: Vec<String>,
    pub scenes: Vec<String>,
    pub animations: Vec<String>,
    pub inputs: Vec<String>,
}

pub struct GodotBridge {
    managers: ManagerSet,
}

impl GodotBridge {
    pub fn new() -> Self {
        Self {
            managers: ManagerSet::new(),
        }
    }

    pub fn simulate(&mut self, module: &str, data: &Value, config: &GodotBridgeConfig) -> BridgeOutput {
        finish("simulate", module, self.simulate_inner(module, data, config))
    }

    pub fn render(&mut self, module: &str, data: &Value, config: &GodotBridgeConfig) -> BridgeOutput {
        finish("render", module, self.render_inner(module, data, config))
    }

    pub fn interop(&mut self, module: &str, data: &Value, config: &GodotBridgeConfig) -> BridgeOutput {
        finish("interop", module, self.interop_inner(module, data, config))
    }

    pub fn dump(&self, module: &str) -> BridgeOutput {
        finish("dump", module, Ok(GodotRenderData::default()))
    }

    fn simulate_inner(
        &mut self,
        module: &str,
        data: &Value,
        config: &GodotBridgeConfig,
    ) -> BridgeResult<GodotRenderData> {
        let result = self.managers.simulate(module, data)?;
        let node = result_node(module, &result);

        let mut render = GodotRenderData::default();
        render.nodes.push(to_godot(&node)?);
        if module == "combat" {
            render.scenes.push("CombatScene.tscn".to_string());
            render
                .scripts
                .push(script_path("CombatController", config));
        }
        Ok(render)
    }

    fn render_inner(
        &mut self,
        module: &str,
        data: &Value,
        config: &GodotBridgeConfig,
    ) -> BridgeResult<GodotRenderData> {
        let opts = BuildOptions::godot(config.use_signals, config.use_animations);
        let mut render = GodotRenderData::default();

        match module {
            "npcs" => {
                for npc in self.managers.npcs.list(None) {
                    render.nodes.push(to_godot(&npc_node(npc, &opts))?);
                }
                render.resources = npc_resources(config);
                render.scripts = scripted(
                    &["NPCController", "QuestSystem", "MerchantBehavior"],
                    config,
                );
                render.scenes = strings(&[
                    "NPCScene.tscn",
                    "QuestGiverScene.tscn",
                    "MerchantScene.tscn",
                ]);
                render.animations =
                    strings(&["npc_idle.anim", "npc_walk.anim", "quest_indicator.anim"]);
                render.inputs = strings(&["npc_interact", "quest_accept", "quest_decline"]);
            }
            "combat" => {
                for node in combat_nodes(data, &opts) {
                    render.nodes.push(to_godot(&node)?);
                }
                render.scripts = scripted(
                    &["CombatController", "WeaponSystem", "EffectManager"],
                    config,
                );
                render.scenes = strings(&["CombatScene.tscn"]);
            }
            "ui" => {
                for node in ui_nodes(&opts) {
                    render.nodes.push(to_godot(&node)?);
                }
                render.resources = ui_resources(config);
                render.scripts = scripted(&["UIController", "InventoryUI", "MenuSystem"], config);
                render.scenes = strings(&[
                    "InventoryScene.tscn",
                    "MenuScene.tscn",
                    "DialogScene.tscn",
                ]);
                render.animations = strings(&[
                    "menu_open.anim",
                    "inventory_slide.anim",
                    "dialog_fade.anim",
                ]);
                render.inputs = strings(&["inventory_toggle", "menu_navigate", "dialog_next"]);
            }
            _ => return Err(BridgeError::unknown_module(module)),
        }

        Ok(render)
    }

    fn interop_inner(
        &mut self,
        module: &str,
        data: &Value,
        _config: &GodotBridgeConfig,
    ) -> BridgeResult<GodotRenderData> {
        let canonical = adapter_for(Engine::Godot).from_native(data);
        let result = self.managers.interop(module, &canonical)?;

        let mut render = GodotRenderData::default();
        render.nodes.push(to_godot(&result_node(module, &result))?);
        Ok(render)
    }
}

impl Default for GodotBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(op: &str, module: &str, result: BridgeResult<GodotRenderData>) -> BridgeOutput {
    match result.and_then(|render| Ok(serde_json::to_value(render)?)) {
        Ok(render) => BridgeOutput::ok(op, render)
            .with_metadata(PayloadMetadata::now(Engine::Godot, module)),
        Err(err) => BridgeOutput::from_error(op, &err),
    }
}

fn to_godot(node: &RenderData) -> BridgeResult<Value> {
    adapter_for(Engine::Godot).to_native(node)
}

fn script_path(name: &str, config: &GodotBridgeConfig) -> String {
    format!("res://scripts/{name}{}", config.language.extension())
}

fn scripted(names: &[&str], config: &GodotBridgeConfig) -> Vec<String> {
    names.iter().map(|n| script_path(n, config)).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn npc_resources(config: &GodotBridgeConfig) -> Vec<GodotResource> {
    vec![
        GodotResource {
            kind: "Script".to_string(),
            path: format!(
                "res://scripts/NPCController{}",
                config.language.extension()
            ),
            data: serde_json::json!({
                "language": config.language,
                "extends": "Node2D",
                "variables": ["npc_id", "behavior_type", "faction"],
                "functions": ["_ready", "_process", "interact_with_player"],
            }),
        },
        GodotResource {
            kind: "AnimationLibrary".to_string(),
            path: "res://animations/npc_animations.tres".to_string(),
            data: serde_json::json!({
                "animations": ["idle", "walk", "talk", "quest_indicator"],
            }),
        },
    ]
}

fn ui_resources(config: &GodotBridgeConfig) -> Vec<GodotResource> {
    vec![GodotResource {
        kind: "Script".to_string(),
        path: format!("res://scripts/UIController{}", config.language.extension()),
        data: serde_json::json!({
            "language": config.language,
            "extends": "Control",
            "variables": ["ui_type", "is_visible"],
            "functions": ["_ready", "show_ui", "hide_ui", "update_content"],
        }),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_module_maps_to_error_envelope() {
        let mut bridge = GodotBridge::new();
        let output = bridge.render("physics", &json!({}), &GodotBridgeConfig::default());
        assert!(!output.is_ok());
        assert_eq!(output.issues, vec!["Unknown module: physics"]);
    }

    #[test]
    fn npc_render_lists_default_npcs() {
        let mut bridge = GodotBridge::new();
        let output = bridge.render("npcs", &json!({}), &GodotBridgeConfig::default());
        assert!(output.is_ok());
        let render: GodotRenderData =
            serde_json::from_value(output.render_data.unwrap()).unwrap();
        assert_eq!(render.nodes.len(), 2);
        assert_eq!(render.scenes[0], "NPCScene.tscn");
        assert!(render.scripts[0].ends_with(".gd"));
    }

    #[test]
    fn csharp_config_switches_script_extension() {
        let mut bridge = GodotBridge::new();
        let config = GodotBridgeConfig {
            language: miff_schema::ScriptLanguage::Csharp,
            ..GodotBridgeConfig::default()
        };
        let output = bridge.render("ui", &json!({}), &config);
        let render: GodotRenderData =
            serde_json::from_value(output.render_data.unwrap()).unwrap();
        assert!(render.scripts.iter().all(|s| s.ends_with(".cs")));
        assert!(render.resources[0].path.ends_with(".cs"));
    }

    #[test]
    fn combat_simulation_flows_through_the_adapter() {
        let mut bridge = GodotBridge::new();
        let data = json!({
            "attacker": { "id": "hero", "health": 100, "attack": 15, "defense": 5 },
            "defender": { "id": "goblin", "health": 10, "attack": 5, "defense": 2 },
        });
        let output = bridge.simulate("combat", &data, &GodotBridgeConfig::default());
        assert!(output.is_ok());
        let render: GodotRenderData =
            serde_json::from_value(output.render_data.unwrap()).unwrap();
        assert_eq!(render.nodes[0]["id"], "combat_result");
        assert_eq!(render.scenes, vec!["CombatScene.tscn"]);
    }
}
