//! Cross-adapter conversion contracts
//!
//! Locks the signal-filtering rule (tagged signals reach only their engine,
//! untagged signals reach every engine) and the round-trip fidelity of id and
//! position through each adapter.

use miff_engines::adapter_for;
use miff_schema::{Engine, RenderData, RenderKind, Signal, Vec3};
use serde_json::json;

fn node_with_all_signal_kinds() -> RenderData {
    RenderData::new("test", RenderKind::Sprite)
        .with_signal(Signal::new("unity_signal").tagged(Engine::Unity))
        .with_signal(Signal::new("web_signal").tagged(Engine::Web))
        .with_signal(Signal::new("godot_signal").tagged(Engine::Godot))
        .with_signal(Signal::new("universal_signal"))
}

fn names(value: &serde_json::Value) -> Vec<String> {
    match value.as_array() {
        Some(entries) => entries
            .iter()
            .map(|entry| entry["name"].as_str().unwrap().to_string())
            .collect(),
        None => Vec::new(),
    }
}

#[test]
fn each_engine_keeps_its_own_signal_plus_universal() {
    let data = node_with_all_signal_kinds();

    let unity = adapter_for(Engine::Unity).to_native(&data).unwrap();
    assert_eq!(names(&unity["signals"]), vec!["unity_signal", "universal_signal"]);

    let web = adapter_for(Engine::Web).to_native(&data).unwrap();
    assert_eq!(names(&web["events"]), vec!["web_signal", "universal_signal"]);

    let godot = adapter_for(Engine::Godot).to_native(&data).unwrap();
    assert_eq!(names(&godot["signals"]), vec!["godot_signal", "universal_signal"]);
}

#[test]
fn unity_round_trip_preserves_id_and_position() {
    let adapter = adapter_for(Engine::Unity);
    let native = json!({
        "id": "npc_001",
        "componentType": "SpriteRenderer",
        "transform": { "position": { "x": 640, "y": 960, "z": 0 } }
    });
    let back = adapter.to_native(&adapter.from_native(&native)).unwrap();
    assert_eq!(back["id"], "npc_001");
    assert_eq!(back["transform"]["position"]["x"], 640.0);
    assert_eq!(back["transform"]["position"]["y"], 960.0);
}

#[test]
fn godot_round_trip_preserves_id_and_position() {
    let adapter = adapter_for(Engine::Godot);
    let native = json!({
        "id": "npc_001",
        "type": "Sprite",
        "position": { "x": 640, "y": 960 }
    });
    let back = adapter.to_native(&adapter.from_native(&native)).unwrap();
    assert_eq!(back["id"], "npc_001");
    assert_eq!(back["position"]["x"], 640.0);
    assert_eq!(back["type"], "Sprite");
}

#[test]
fn web_round_trip_preserves_id_and_coordinates() {
    let adapter = adapter_for(Engine::Web);
    let native = json!({
        "id": "npc_001",
        "type": "sprite",
        "x": 640, "y": 960,
        "width": 32, "height": 32
    });
    let back = adapter.to_native(&adapter.from_native(&native)).unwrap();
    assert_eq!(back["id"], "npc_001");
    assert_eq!(back["x"], 640.0);
    assert_eq!(back["y"], 960.0);
}

#[test]
fn imported_trees_validate_clean() {
    let unity = adapter_for(Engine::Unity).from_native(&json!({
        "id": "npc_001",
        "gameObject": "GameObject_npc_001",
        "componentType": "NPCController",
        "transform": { "position": { "x": 640, "y": 960, "z": 0 } },
        "prefab": "NPCPrefab"
    }));
    assert!(miff_schema::validate_render_data(&unity).is_empty());

    let godot = adapter_for(Engine::Godot).from_native(&json!({
        "id": "npc_001",
        "type": "Node2D",
        "name": "Guard Captain Marcus",
        "position": { "x": 640, "y": 960 },
        "children": [
            { "id": "npc_001_sprite", "type": "Sprite", "position": { "x": 0, "y": 0 } }
        ]
    }));
    assert!(miff_schema::validate_render_data(&godot).is_empty());
    assert_eq!(godot.children.len(), 1);
}

#[test]
fn unknown_native_types_never_error() {
    let data = adapter_for(Engine::Godot).from_native(&json!({
        "id": "mystery",
        "type": "VehicleBody3D"
    }));
    assert_eq!(data.kind, RenderKind::Component);

    // And a fully malformed payload still yields a tree instead of a panic.
    let empty = adapter_for(Engine::Unity).from_native(&json!("not an object"));
    assert_eq!(empty.id, "");
    assert_eq!(empty.kind, RenderKind::Component);
}

#[test]
fn godot_rotation_survives_the_scalar_form() {
    let adapter = adapter_for(Engine::Godot);
    let data = RenderData::new("npc_001", RenderKind::Sprite)
        .at(Vec3::xy(640.0, 960.0))
        .rotated(Vec3::xyz(0.0, 0.0, 45.0));
    let native = adapter.to_native(&data).unwrap();
    assert_eq!(native["rotation"], 45.0);
}
