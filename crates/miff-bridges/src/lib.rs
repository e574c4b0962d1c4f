//! Engine bridge facades
//!
//! One bridge per target engine. Each owns a fresh set of domain managers,
//! dispatches `simulate`/`render`/`interop`/`dump` calls by module name, and
//! shapes results into the engine's native tree by routing every node through
//! the engine's `EngineAdapter`. Manager failures are caught at this boundary
//! and flattened into `status: "error"` outputs; nothing here retries or
//! panics.

pub mod builders;
pub mod dispatch;
pub mod godot;
pub mod output;
pub mod unity;
pub mod web;

pub use godot::GodotBridge;
pub use output::BridgeOutput;
pub use unity::UnityBridge;
pub use web::WebBridge;
