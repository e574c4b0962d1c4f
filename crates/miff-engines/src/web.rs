//! Web adapter
//!
//! Native shape: flat sprite/DOM JSON with pixel coordinates (`x`/`y`),
//! `width`/`height` standing in for scale, a `texture` (or `src`) asset
//! reference, and `events` instead of signals. Event handlers map onto the
//! canonical `connectedTo` list.

use crate::adapter::EngineAdapter;
use log::warn;
use miff_schema::{
    BridgeResult, Engine, EngineHints, RenderData, RenderKind, Signal, Vec3, WebHints,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event wiring on a Web native node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<String>,
}

/// Web sprite/DOM JSON as exchanged with the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebNative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<String>,
    #[serde(rename = "useWebGL", skip_serializing_if = "Option::is_none")]
    pub use_webgl: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WebNative>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<WebEvent>,
}

fn kind_from_web(kind: Option<&str>) -> RenderKind {
    match kind {
        Some("sprite") => RenderKind::Sprite,
        Some("text") => RenderKind::Text,
        Some("audio") => RenderKind::Sound,
        Some("animation") => RenderKind::Animation,
        Some("container") | Some("group") => RenderKind::Node,
        _ => RenderKind::Component,
    }
}

fn web_from_kind(kind: RenderKind) -> &'static str {
    match kind {
        RenderKind::Sprite => "sprite",
        RenderKind::Text => "text",
        RenderKind::Sound => "audio",
        RenderKind::Animation => "animation",
        RenderKind::Node => "container",
        _ => "element",
    }
}

pub struct WebAdapter;

impl WebAdapter {
    fn import(&self, native: WebNative) -> RenderData {
        let mut data = RenderData::new(
            native.id.clone().unwrap_or_default(),
            kind_from_web(native.kind.as_deref()),
        );
        data.name = native.name.clone();
        data.position = match (native.x, native.y) {
            (Some(x), Some(y)) => Some(Vec3::xy(x, y)),
            _ => None,
        };
        data.scale = match (native.width, native.height) {
            (Some(width), Some(height)) => Some(Vec3::xy(width, height)),
            _ => None,
        };
        data.asset = native.texture.clone().or_else(|| native.src.clone());
        data.props = native.properties.clone().unwrap_or_default();
        data.engine_hints = Some(EngineHints {
            web: Some(WebHints {
                element: native.element,
                canvas: native.canvas,
                dom: native.dom,
                use_webgl: native.use_webgl,
            }),
            ..EngineHints::default()
        });
        data.children = native
            .children
            .into_iter()
            .map(|child| self.import(child))
            .collect();
        data.signals = native
            .events
            .into_iter()
            .map(|event| Signal {
                name: event.name,
                parameters: event.parameters,
                connected_to: event.handlers,
                engine: Some(Engine::Web),
            })
            .collect();
        data
    }

    fn export(&self, data: &RenderData) -> BridgeResult<WebNative> {
        let children = data
            .children
            .iter()
            .map(|child| self.export(child))
            .collect::<BridgeResult<Vec<_>>>()?;

        Ok(WebNative {
            id: Some(data.id.clone()),
            kind: Some(web_from_kind(data.kind).to_string()),
            name: data.name.clone(),
            x: data.position.map(|p| p.x),
            y: data.position.map(|p| p.y),
            width: data.scale.map(|s| s.x),
            height: data.scale.map(|s| s.y),
            texture: data.asset.clone(),
            src: None,
            properties: if data.props.is_empty() {
                None
            } else {
                Some(data.props.clone())
            },
            element: None,
            canvas: None,
            dom: None,
            use_webgl: None,
            children,
            events: data
                .signals_for(Engine::Web)
                .into_iter()
                .map(|signal| WebEvent {
                    name: signal.name.clone(),
                    parameters: signal.parameters.clone(),
                    handlers: signal.connected_to.clone(),
                })
                .collect(),
        })
    }
}

impl EngineAdapter for WebAdapter {
    fn from_native(&self, native: &Value) -> RenderData {
        let parsed = match serde_json::from_value::<WebNative>(native.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("malformed Web native data, importing id only: {err}");
                WebNative {
                    id: native
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    ..WebNative::default()
                }
            }
        };
        self.import(parsed)
    }

    fn to_native(&self, data: &RenderData) -> BridgeResult<Value> {
        Ok(serde_json::to_value(self.export(data)?)?)
    }
}
