//! Godot adapter
//!
//! Native shape: Node JSON with Godot class names (`Sprite`, `Label`,
//! `AudioStreamPlayer`, ...) and a scalar z-axis rotation. Import lifts the
//! scalar to a canonical rotation vector; export takes the vector's z back
//! out.

use crate::adapter::{exported_signals, EngineAdapter, NativeSignal};
use log::warn;
use miff_schema::{
    BridgeResult, Engine, EngineHints, GodotHints, RenderData, RenderKind, ScriptLanguage, Vec3,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Godot node JSON as exchanged with the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GodotNative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    /// Z-axis rotation in degrees; Godot 2D nodes have no other axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<ScriptLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GodotNative>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<NativeSignal>,
}

fn kind_from_godot(kind: Option<&str>) -> RenderKind {
    match kind {
        Some("Sprite") => RenderKind::Sprite,
        Some("Label") => RenderKind::Text,
        Some("AudioStreamPlayer") => RenderKind::Sound,
        Some("AnimationPlayer") => RenderKind::Animation,
        Some("Node2D") | Some("Control") => RenderKind::Node,
        _ => RenderKind::Component,
    }
}

fn godot_from_kind(kind: RenderKind) -> &'static str {
    match kind {
        RenderKind::Sprite => "Sprite",
        RenderKind::Text => "Label",
        RenderKind::Sound => "AudioStreamPlayer",
        RenderKind::Animation => "AnimationPlayer",
        RenderKind::Node => "Node2D",
        _ => "Node",
    }
}

pub struct GodotAdapter;

impl GodotAdapter {
    fn import(&self, native: GodotNative) -> RenderData {
        let mut data = RenderData::new(
            native.id.clone().unwrap_or_default(),
            kind_from_godot(native.kind.as_deref()),
        );
        data.name = native.name.clone();
        data.position = native.position;
        data.scale = native.scale;
        data.rotation = native.rotation.map(|z| Vec3::xyz(0.0, 0.0, z));
        data.asset = native.texture.clone().or_else(|| native.script.clone());
        data.props = native.properties.clone().unwrap_or_default();
        data.engine_hints = Some(EngineHints {
            godot: Some(GodotHints {
                node: native.kind,
                script: native.script,
                scene: native.scene,
                language: native.language,
            }),
            ..EngineHints::default()
        });
        data.children = native
            .children
            .into_iter()
            .map(|child| self.import(child))
            .collect();
        data.signals = native
            .signals
            .into_iter()
            .map(|signal| signal.into_signal(Engine::Godot))
            .collect();
        data
    }

    fn export(&self, data: &RenderData) -> BridgeResult<GodotNative> {
        let children = data
            .children
            .iter()
            .map(|child| self.export(child))
            .collect::<BridgeResult<Vec<_>>>()?;

        Ok(GodotNative {
            id: Some(data.id.clone()),
            kind: Some(godot_from_kind(data.kind).to_string()),
            name: data.name.clone(),
            position: data.position,
            scale: data.scale,
            rotation: data.rotation.and_then(|r| r.z),
            texture: data.asset.clone(),
            script: None,
            scene: None,
            language: None,
            properties: if data.props.is_empty() {
                None
            } else {
                Some(data.props.clone())
            },
            children,
            signals: exported_signals(data, Engine::Godot),
        })
    }
}

impl EngineAdapter for GodotAdapter {
    fn from_native(&self, native: &Value) -> RenderData {
        let parsed = match serde_json::from_value::<GodotNative>(native.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("malformed Godot native data, importing id only: {err}");
                GodotNative {
                    id: native
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    ..GodotNative::default()
                }
            }
        };
        self.import(parsed)
    }

    fn to_native(&self, data: &RenderData) -> BridgeResult<Value> {
        Ok(serde_json::to_value(self.export(data)?)?)
    }
}
