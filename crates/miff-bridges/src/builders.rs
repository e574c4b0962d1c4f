//! Canonical render-tree builders shared by every bridge
//!
//! Builders emit engine-agnostic `RenderData`; each bridge then asks its
//! adapter for the native shape. Signals declared here are untagged
//! (universal) so the adapter's filter carries them to whichever engine is
//! rendering.

use miff_managers::Npc;
use miff_schema::{RenderData, RenderKind, Signal, Vec3};
use serde_json::{json, Value};

/// Engine-dependent knobs for tree construction.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// World-unit to engine-coordinate multiplier (Godot tiles are 64px,
    /// Web sprites 32px, Unity uses world units directly).
    pub coord_scale: f64,
    pub use_signals: bool,
    pub use_animations: bool,
}

impl BuildOptions {
    pub fn godot(use_signals: bool, use_animations: bool) -> Self {
        Self {
            coord_scale: 64.0,
            use_signals,
            use_animations,
        }
    }

    pub fn web() -> Self {
        Self {
            coord_scale: 32.0,
            use_signals: false,
            use_animations: false,
        }
    }

    pub fn unity() -> Self {
        Self {
            coord_scale: 1.0,
            use_signals: false,
            use_animations: false,
        }
    }
}

/// An NPC as a render tree: root node, sprite child, quest indicator when the
/// NPC offers quests, and an animation player when animations are enabled.
pub fn npc_node(npc: &Npc, opts: &BuildOptions) -> RenderData {
    let behavior = serde_json::to_value(npc.behavior.kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    let mut node = RenderData::new(npc.id.clone(), RenderKind::Node)
        .named(npc.name.clone())
        .at(Vec3::xy(
            npc.location.x * opts.coord_scale,
            npc.location.y * opts.coord_scale,
        ))
        .scaled(Vec3::xy(1.0, 1.0))
        .with_prop("npc_id", json!(npc.id))
        .with_prop("behavior_type", json!(behavior))
        .with_prop(
            "faction",
            json!(npc.faction.clone().unwrap_or_else(|| "neutral".to_string())),
        )
        .with_prop("has_quests", json!(npc.has_quests()))
        .with_prop("quest_count", json!(npc.quest_ids.len()))
        .with_child(
            RenderData::new(format!("{}_sprite", npc.id), RenderKind::Sprite)
                .named("Sprite")
                .at(Vec3::xy(0.0, 0.0))
                .with_asset("res://assets/npcs/npc_sprite.png"),
        );

    if npc.has_quests() {
        node = node.with_child(
            RenderData::new(format!("{}_quest_indicator", npc.id), RenderKind::Sprite)
                .named("QuestIndicator")
                .at(Vec3::xy(24.0, -24.0))
                .with_asset("res://assets/ui/quest_icon.png")
                .with_prop("quest_count", json!(npc.quest_ids.len()))
                .with_prop("quest_ids", json!(npc.quest_ids)),
        );
    }

    if opts.use_animations {
        node = node.with_child(
            RenderData::new(format!("{}_animations", npc.id), RenderKind::Animation)
                .named("AnimationPlayer")
                .at(Vec3::xy(0.0, 0.0))
                .with_prop("autoplay", json!("idle"))
                .with_prop("libraries", json!(["npc_animations"])),
        );
    }

    if opts.use_signals {
        node = node.with_signal(
            Signal::new("npc_interacted")
                .with_parameters(vec!["player_id".into(), "interaction_type".into()])
                .connected_to(vec!["QuestSystem".into(), "DialogSystem".into()]),
        );
    }

    node
}

/// Minimal attacker/defender pair for combat rendering. Ids come from the
/// request (`attacker.id`, `attackerId`) with stable fallbacks.
pub fn combat_nodes(data: &Value, opts: &BuildOptions) -> Vec<RenderData> {
    let attacker_id = combatant_id(data, "attacker", "attackerId", "attacker");
    let defender_id = combatant_id(data, "defender", "defenderId", "defender");

    let mut attacker = RenderData::new(attacker_id.clone(), RenderKind::Node)
        .named("Combatant")
        .at(Vec3::xy(0.0, 0.0))
        .with_prop("combatant_id", json!(attacker_id))
        .with_prop("is_attacker", json!(true));
    let defender = RenderData::new(defender_id.clone(), RenderKind::Node)
        .named("Combatant")
        .at(Vec3::xy(100.0, 0.0))
        .with_prop("combatant_id", json!(defender_id))
        .with_prop("is_attacker", json!(false));

    if opts.use_signals {
        attacker = attacker.with_signal(
            Signal::new("combat_action")
                .with_parameters(vec!["action_type".into(), "target_id".into()])
                .connected_to(vec!["CombatSystem".into(), "EffectSystem".into()]),
        );
    }

    vec![attacker, defender]
}

fn combatant_id(data: &Value, nested: &str, flat: &str, fallback: &str) -> String {
    data.get(nested)
        .and_then(|c| c.get("id"))
        .and_then(Value::as_str)
        .or_else(|| data.get(flat).and_then(Value::as_str))
        .unwrap_or(fallback)
        .to_string()
}

/// Inventory panel with its title label.
pub fn ui_nodes(opts: &BuildOptions) -> Vec<RenderData> {
    let mut panel = RenderData::new("inventory_panel", RenderKind::Node)
        .named("InventoryPanel")
        .at(Vec3::xy(10.0, 10.0))
        .with_prop("ui_type", json!("inventory"))
        .with_prop("visible", json!(true))
        .with_child(
            RenderData::new("inventory_title", RenderKind::Text)
                .named("Title")
                .at(Vec3::xy(0.0, 0.0))
                .with_prop("text", json!("Inventory"))
                .with_prop("font_size", json!(18)),
        );

    if opts.use_signals {
        panel = panel.with_signal(
            Signal::new("inventory_opened")
                .with_parameters(vec!["player_id".into()])
                .connected_to(vec!["UISystem".into(), "InventorySystem".into()]),
        );
    }

    vec![panel]
}

/// One node per zone in a world snapshot (`{ "zones": [{id, x, y}, ...] }`).
pub fn world_nodes(data: &Value) -> Vec<RenderData> {
    let zones = match data.get("zones").and_then(Value::as_array) {
        Some(zones) => zones,
        None => return Vec::new(),
    };

    zones
        .iter()
        .filter_map(|zone| {
            let id = zone.get("id").and_then(Value::as_str)?;
            let x = zone.get("x").and_then(Value::as_f64).unwrap_or(0.0);
            let y = zone.get("y").and_then(Value::as_f64).unwrap_or(0.0);
            Some(
                RenderData::new(id, RenderKind::Node)
                    .named(format!("Zone_{id}"))
                    .at(Vec3::xy(x, y))
                    .with_prop("zone_id", json!(id))
                    .with_prop("zone_data", zone.clone()),
            )
        })
        .collect()
}

/// Wrap a manager result as a single component node so simulate/interop
/// outputs flow through the same adapter path as rendered trees.
pub fn result_node(module: &str, result: &Value) -> RenderData {
    let mut node =
        RenderData::new(format!("{module}_result"), RenderKind::Component).named(module.to_string());
    if let Value::Object(fields) = result {
        node.props = fields.clone();
    } else {
        node = node.with_prop("result", result.clone());
    }
    node
}
