//! The engine adapter seam
//!
//! `EngineAdapter` is the single conversion interface between canonical
//! `RenderData` and a target engine's native node shape. Bridges and the CLI
//! obtain adapters through `adapter_for` and never build native nodes by
//! hand, so the tested converter and the converter actually used are the
//! same code.

use miff_schema::{BridgeResult, Engine, RenderData, Signal};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::godot::GodotAdapter;
use crate::unity::UnityAdapter;
use crate::web::WebAdapter;

/// Canonical-to-native conversion capability for one engine.
pub trait EngineAdapter: Send + Sync {
    /// Map a native node (and its children) onto canonical form.
    ///
    /// Never fails: unknown native types map to safe defaults and
    /// engine-specific leftovers land under `engineHints`.
    fn from_native(&self, native: &Value) -> RenderData;

    /// Map a canonical node (and its children) onto the engine's native
    /// shape. Signals are filtered to the target engine; untagged signals
    /// are universal and always survive.
    fn to_native(&self, data: &RenderData) -> BridgeResult<Value>;
}

static UNITY: UnityAdapter = UnityAdapter;
static WEB: WebAdapter = WebAdapter;
static GODOT: GodotAdapter = GodotAdapter;

/// Look up the adapter for a target engine.
pub fn adapter_for(engine: Engine) -> &'static dyn EngineAdapter {
    match engine {
        Engine::Unity => &UNITY,
        Engine::Web => &WEB,
        Engine::Godot => &GODOT,
    }
}

/// Signal shape shared by the Unity and Godot native formats. The engine tag
/// is canonical-side bookkeeping and is stripped on export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSignal {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(
        rename = "connectedTo",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub connected_to: Vec<String>,
}

impl NativeSignal {
    pub fn from_signal(signal: &Signal) -> Self {
        Self {
            name: signal.name.clone(),
            parameters: signal.parameters.clone(),
            connected_to: signal.connected_to.clone(),
        }
    }

    pub fn into_signal(self, engine: Engine) -> Signal {
        Signal {
            name: self.name,
            parameters: self.parameters,
            connected_to: self.connected_to,
            engine: Some(engine),
        }
    }
}

/// The signals a node exports for `engine`, in native shape.
pub(crate) fn exported_signals(data: &RenderData, engine: Engine) -> Vec<NativeSignal> {
    data.signals_for(engine)
        .into_iter()
        .map(NativeSignal::from_signal)
        .collect()
}
