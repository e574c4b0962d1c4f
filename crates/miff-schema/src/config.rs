//! Per-engine bridge configuration
//!
//! Config files are JSON; every field has a default so partial files merge
//! over the built-in defaults. Defaults match the original CLI harness
//! contract for each engine.

use serde::{Deserialize, Serialize};

/// Script language for generated Godot resources.
///
/// Only affects generated script filename extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    Gdscript,
    Csharp,
}

impl ScriptLanguage {
    pub fn extension(&self) -> &'static str {
        match self {
            ScriptLanguage::Gdscript => ".gd",
            ScriptLanguage::Csharp => ".cs",
        }
    }
}

impl Default for ScriptLanguage {
    fn default() -> Self {
        ScriptLanguage::Gdscript
    }
}

/// Web rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebRenderer {
    Phaser,
    Canvas,
    Dom,
}

impl Default for WebRenderer {
    fn default() -> Self {
        WebRenderer::Phaser
    }
}

/// Configuration for the Godot bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GodotBridgeConfig {
    pub language: ScriptLanguage,
    #[serde(rename = "targetVersion")]
    pub target_version: String,
    #[serde(rename = "projectPath")]
    pub project_path: String,
    #[serde(rename = "scriptPath")]
    pub script_path: String,
    #[serde(rename = "scenePath")]
    pub scene_path: String,
    #[serde(rename = "resourcePath")]
    pub resource_path: String,
    /// Gates generation of signal declarations on rendered nodes.
    #[serde(rename = "useSignals")]
    pub use_signals: bool,
    /// Gates generation of AnimationPlayer child nodes.
    #[serde(rename = "useAnimations")]
    pub use_animations: bool,
}

impl Default for GodotBridgeConfig {
    fn default() -> Self {
        Self {
            language: ScriptLanguage::Gdscript,
            target_version: "4.0".to_string(),
            project_path: "godot_project/".to_string(),
            script_path: "res://miff/scripts/".to_string(),
            scene_path: "res://scenes/".to_string(),
            resource_path: "res://resources/".to_string(),
            use_signals: true,
            use_animations: true,
        }
    }
}

/// Configuration for the Unity bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnityBridgeConfig {
    #[serde(rename = "targetVersion")]
    pub target_version: String,
    /// ECS entities instead of MonoBehaviour game objects.
    #[serde(rename = "useECS")]
    pub use_ecs: bool,
    #[serde(rename = "prefabPath")]
    pub prefab_path: String,
    #[serde(rename = "scriptPath")]
    pub script_path: String,
    #[serde(rename = "scenePath")]
    pub scene_path: String,
}

impl Default for UnityBridgeConfig {
    fn default() -> Self {
        Self {
            target_version: "2022.3".to_string(),
            use_ecs: false,
            prefab_path: "Assets/Prefabs/".to_string(),
            script_path: "Assets/Scripts/".to_string(),
            scene_path: "Assets/Scenes/".to_string(),
        }
    }
}

/// Configuration for the Web bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebBridgeConfig {
    pub renderer: WebRenderer,
    #[serde(rename = "targetVersion")]
    pub target_version: String,
    #[serde(rename = "assetPath")]
    pub asset_path: String,
    #[serde(rename = "scriptPath")]
    pub script_path: String,
    #[serde(rename = "stylePath")]
    pub style_path: String,
    #[serde(rename = "useWebGL")]
    pub use_webgl: bool,
}

impl Default for WebBridgeConfig {
    fn default() -> Self {
        Self {
            renderer: WebRenderer::Phaser,
            target_version: "3.60".to_string(),
            asset_path: "assets/".to_string(),
            script_path: "js/".to_string(),
            style_path: "css/".to_string(),
            use_webgl: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_config_merges_over_defaults() {
        let config: GodotBridgeConfig =
            serde_json::from_value(json!({ "language": "csharp", "useAnimations": false }))
                .unwrap();
        assert_eq!(config.language, ScriptLanguage::Csharp);
        assert!(!config.use_animations);
        // Untouched fields keep their defaults.
        assert_eq!(config.target_version, "4.0");
        assert!(config.use_signals);
    }

    #[test]
    fn script_extension_follows_language() {
        assert_eq!(ScriptLanguage::Gdscript.extension(), ".gd");
        assert_eq!(ScriptLanguage::Csharp.extension(), ".cs");
    }
}
