//! Canonical render-data schema for the MIFF engine bridges
//!
//! This crate defines the engine-agnostic `RenderData` tree, the payload
//! envelope shared by every bridge, structural validation over both typed
//! values and raw JSON, and the per-engine bridge configurations.

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use config::{GodotBridgeConfig, ScriptLanguage, UnityBridgeConfig, WebBridgeConfig, WebRenderer};
pub use error::{BridgeError, BridgeResult};
pub use types::{
    Engine, EngineHints, GodotHints, PayloadMetadata, RenderData, RenderKind, RenderPayload,
    Signal, Status, UnityHints, Vec3, WebHints, SCHEMA_VERSION,
};
pub use validate::{
    validate_render_data, validate_render_data_value, validate_render_payload,
    validate_render_payload_value,
};
