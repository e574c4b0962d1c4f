//! Core schema types shared by every engine bridge
//!
//! `RenderData` is the canonical, engine-agnostic scene-node description.
//! Bridges convert it to and from native Unity, Web, and Godot shapes; the
//! wire names here (`type`, `engineHints`, `connectedTo`, ...) are schema v1
//! and must stay stable.

use crate::config::ScriptLanguage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Schema version stamped into payload metadata.
pub const SCHEMA_VERSION: &str = "v1";

/// Target engines a bridge can convert for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Unity,
    Web,
    Godot,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Unity => write!(f, "unity"),
            Engine::Web => write!(f, "web"),
            Engine::Godot => write!(f, "godot"),
        }
    }
}

/// The closed set of canonical render node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Node,
    Sprite,
    Text,
    Sound,
    Animation,
    Component,
    Resource,
    Scene,
    Input,
}

impl RenderKind {
    /// All wire names accepted for `type`, in schema order.
    pub const WIRE_NAMES: [&'static str; 9] = [
        "sprite",
        "text",
        "sound",
        "animation",
        "node",
        "component",
        "resource",
        "scene",
        "input",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderKind::Node => "node",
            RenderKind::Sprite => "sprite",
            RenderKind::Text => "text",
            RenderKind::Sound => "sound",
            RenderKind::Animation => "animation",
            RenderKind::Component => "component",
            RenderKind::Resource => "resource",
            RenderKind::Scene => "scene",
            RenderKind::Input => "input",
        }
    }
}

/// A 2D/3D vector used for position, scale, and rotation.
///
/// `z` is optional on the wire; 2D engines simply omit it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Vec3 {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

/// A declared event wiring, optionally tagged to one engine.
///
/// A signal without an `engine` tag is universal and survives conversion to
/// every target; a tagged signal only reaches its own engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(
        rename = "connectedTo",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub connected_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
}

impl Signal {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            connected_to: Vec::new(),
            engine: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn connected_to(mut self, targets: Vec<String>) -> Self {
        self.connected_to = targets;
        self
    }

    pub fn tagged(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Whether this signal should survive conversion to `target`.
    pub fn applies_to(&self, target: Engine) -> bool {
        match self.engine {
            Some(engine) => engine == target,
            None => true,
        }
    }
}

/// Unity-specific leftovers carried through canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnityHints {
    #[serde(rename = "gameObject", skip_serializing_if = "Option::is_none")]
    pub game_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefab: Option<String>,
    #[serde(rename = "useECS", skip_serializing_if = "Option::is_none")]
    pub use_ecs: Option<bool>,
}

/// Web-specific leftovers carried through canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<String>,
    #[serde(rename = "useWebGL", skip_serializing_if = "Option::is_none")]
    pub use_webgl: Option<bool>,
}

/// Godot-specific leftovers carried through canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GodotHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<ScriptLanguage>,
}

/// Per-engine side channel for fields the canonical schema cannot express.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unity: Option<UnityHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub godot: Option<GodotHints>,
}

impl EngineHints {
    pub fn is_empty(&self) -> bool {
        self.unity.is_none() && self.web.is_none() && self.godot.is_none()
    }
}

/// A node in the canonical scene-description tree.
///
/// Trees are values constructed fresh per conversion; the parent exclusively
/// owns its children and `id` is the only identity a node carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RenderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    #[serde(
        rename = "engineHints",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub engine_hints: Option<EngineHints>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl RenderData {
    pub fn new<S: Into<String>>(id: S, kind: RenderKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            position: None,
            scale: None,
            rotation: None,
            asset: None,
            props: Map::new(),
            engine_hints: None,
            children: Vec::new(),
            signals: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_asset<S: Into<String>>(mut self, asset: S) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn with_prop<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn with_child(mut self, child: RenderData) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// The signals that survive conversion to `target`: tagged matches plus
    /// every untagged (universal) signal.
    pub fn signals_for(&self, target: Engine) -> Vec<&Signal> {
        self.signals.iter().filter(|s| s.applies_to(target)).collect()
    }
}

/// Outcome tag on payloads and bridge outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Provenance block stamped onto produced payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    pub engine: String,
    pub timestamp: String,
    pub module: String,
}

impl PayloadMetadata {
    pub fn now(engine: Engine, module: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            engine: engine.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            module: module.to_string(),
        }
    }
}

/// A flat, ordered collection of top-level render trees plus an outcome tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub op: String,
    pub status: Status,
    #[serde(rename = "renderData", default)]
    pub render_data: Vec<RenderData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PayloadMetadata>,
}

impl RenderPayload {
    pub fn ok<S: Into<String>>(op: S, render_data: Vec<RenderData>) -> Self {
        Self {
            op: op.into(),
            status: Status::Ok,
            render_data,
            issues: Vec::new(),
            metadata: None,
        }
    }

    pub fn error<S: Into<String>>(op: S, issues: Vec<String>) -> Self {
        Self {
            op: op.into(),
            status: Status::Error,
            render_data: Vec::new(),
            issues,
            metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_data_wire_names_are_schema_v1() {
        let data = RenderData::new("test_sprite", RenderKind::Sprite)
            .at(Vec3::xyz(100.0, 200.0, 0.0))
            .with_asset("test.png")
            .with_signal(
                Signal::new("npc_interacted")
                    .with_parameters(vec!["player_id".into()])
                    .connected_to(vec!["QuestSystem".into()])
                    .tagged(Engine::Unity),
            );

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["type"], "sprite");
        assert_eq!(value["position"]["z"], 0.0);
        assert_eq!(value["signals"][0]["connectedTo"][0], "QuestSystem");
        assert_eq!(value["signals"][0]["engine"], "unity");
    }

    #[test]
    fn untagged_signal_applies_to_every_engine() {
        let signal = Signal::new("universal_signal");
        assert!(signal.applies_to(Engine::Unity));
        assert!(signal.applies_to(Engine::Web));
        assert!(signal.applies_to(Engine::Godot));

        let tagged = Signal::new("web_signal").tagged(Engine::Web);
        assert!(tagged.applies_to(Engine::Web));
        assert!(!tagged.applies_to(Engine::Godot));
    }

    #[test]
    fn payload_round_trips_through_json() {
        let payload = RenderPayload::ok(
            "render",
            vec![RenderData::new("n1", RenderKind::Node)
                .with_child(RenderData::new("n1_sprite", RenderKind::Sprite))],
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["renderData"][0]["children"][0]["id"], "n1_sprite");

        let back: RenderPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn unknown_props_survive_deserialization() {
        let data: RenderData = serde_json::from_value(json!({
            "id": "npc_001",
            "type": "component",
            "props": { "npc_id": "npc_001", "behavior_type": "quest_giver" }
        }))
        .unwrap();
        assert_eq!(data.props["behavior_type"], "quest_giver");
    }
}
