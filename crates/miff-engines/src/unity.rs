//! Unity adapter
//!
//! Native shape: GameObject JSON with a `transform` block, a `componentType`
//! discriminator, and a `components` property bag. The component type drives
//! the canonical kind both ways; anything unrecognized degrades to
//! `component` inbound and `MonoBehaviour` outbound.

use crate::adapter::{exported_signals, EngineAdapter, NativeSignal};
use log::warn;
use miff_schema::{
    BridgeResult, Engine, EngineHints, RenderData, RenderKind, UnityHints, Vec3,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transform block on a Unity native node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnityTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
}

/// Unity GameObject JSON as exchanged with the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnityNative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "gameObject", skip_serializing_if = "Option::is_none")]
    pub game_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<UnityTransform>,
    #[serde(rename = "componentType", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Map<String, Value>>,
    #[serde(rename = "useECS", skip_serializing_if = "Option::is_none")]
    pub use_ecs: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UnityNative>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<NativeSignal>,
}

/// Canonical-kind mapping for Unity component types.
fn kind_from_component(component_type: Option<&str>) -> RenderKind {
    match component_type {
        Some("Transform") => RenderKind::Node,
        Some("SpriteRenderer") => RenderKind::Sprite,
        Some("TextMesh") => RenderKind::Text,
        Some("AudioSource") => RenderKind::Sound,
        Some("Animator") => RenderKind::Animation,
        _ => RenderKind::Component,
    }
}

fn component_from_kind(kind: RenderKind) -> &'static str {
    match kind {
        RenderKind::Sprite => "SpriteRenderer",
        RenderKind::Text => "TextMesh",
        RenderKind::Sound => "AudioSource",
        RenderKind::Animation => "Animator",
        RenderKind::Node => "Transform",
        _ => "MonoBehaviour",
    }
}

pub struct UnityAdapter;

impl UnityAdapter {
    fn import(&self, native: UnityNative) -> RenderData {
        let transform = native.transform.clone().unwrap_or_default();
        let id = native
            .id
            .clone()
            .or_else(|| native.game_object.clone())
            .unwrap_or_default();

        let mut data = RenderData::new(id, kind_from_component(native.component_type.as_deref()));
        data.name = native.name.clone();
        data.position = transform.position;
        data.scale = transform.scale;
        data.rotation = transform.rotation;
        data.asset = native.prefab.clone();
        data.props = native.components.clone().unwrap_or_default();
        data.engine_hints = Some(EngineHints {
            unity: Some(UnityHints {
                game_object: native.game_object,
                component: native.component_type,
                prefab: native.prefab,
                use_ecs: native.use_ecs,
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
            .map(|signal| signal.into_signal(Engine::Unity))
            .collect();
        data
    }

    fn export(&self, data: &RenderData) -> BridgeResult<UnityNative> {
        let children = data
            .children
            .iter()
            .map(|child| self.export(child))
            .collect::<BridgeResult<Vec<_>>>()?;

        Ok(UnityNative {
            id: Some(data.id.clone()),
            game_object: Some(data.name.clone().unwrap_or_else(|| data.id.clone())),
            name: data.name.clone(),
            transform: Some(UnityTransform {
                position: data.position,
                scale: data.scale,
                rotation: data.rotation,
            }),
            component_type: Some(component_from_kind(data.kind).to_string()),
            prefab: data.asset.clone(),
            components: if data.props.is_empty() {
                None
            } else {
                Some(data.props.clone())
            },
            use_ecs: None,
            children,
            signals: exported_signals(data, Engine::Unity),
        })
    }
}

impl EngineAdapter for UnityAdapter {
    fn from_native(&self, native: &Value) -> RenderData {
        let parsed = match serde_json::from_value::<UnityNative>(native.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("malformed Unity native data, importing ids only: {err}");
                UnityNative {
                    id: native
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    game_object: native
                        .get("gameObject")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    ..UnityNative::default()
                }
            }
        };
        self.import(parsed)
    }

    fn to_native(&self, data: &RenderData) -> BridgeResult<Value> {
        Ok(serde_json::to_value(self.export(data)?)?)
    }
}
