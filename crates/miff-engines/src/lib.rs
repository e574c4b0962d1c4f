//! Engine adapters for the MIFF render-data schema
//!
//! One adapter per target engine, each owning the native node shape and the
//! bidirectional mapping to canonical `RenderData`. Every conversion in the
//! workspace routes through this crate; there is no second, hand-built
//! conversion path in the bridges.

pub mod adapter;
pub mod godot;
pub mod unity;
pub mod web;

pub use adapter::{adapter_for, EngineAdapter, NativeSignal};
pub use godot::{GodotAdapter, GodotNative};
pub use unity::{UnityAdapter, UnityNative, UnityTransform};
pub use web::{WebAdapter, WebEvent, WebNative};
