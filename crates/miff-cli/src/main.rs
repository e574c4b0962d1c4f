//! Command-line harness for the MIFF engine bridges

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use miff_bridges::{BridgeOutput, GodotBridge, UnityBridge, WebBridge};
use miff_schema::{
    validate_render_payload_value, GodotBridgeConfig, RenderPayload, UnityBridgeConfig,
    WebBridgeConfig,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "miff-bridge")]
#[command(about = "Run MIFF bridge operations against a target engine")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EngineArg {
    Unity,
    Web,
    Godot,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a module simulation and return its native render data
    Simulate {
        #[arg(value_enum)]
        engine: EngineArg,
        /// Module name (npcs, combat, crafting, loot, economy)
        module: String,
        /// JSON file with the simulation arguments
        data_file: Option<PathBuf>,
        /// JSON file overriding the engine's default bridge config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render a module's current state as a native tree
    Render {
        #[arg(value_enum)]
        engine: EngineArg,
        /// Module name (npcs, combat, ui, world)
        module: String,
        /// JSON file with render arguments
        data_file: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Apply native engine data back onto module state
    Interop {
        #[arg(value_enum)]
        engine: EngineArg,
        /// Module name (npcs, quests, stats)
        module: String,
        /// JSON file with the native node to apply
        data_file: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Dump the engine's empty render manifest
    Dump {
        #[arg(value_enum)]
        engine: EngineArg,
        module: String,
    },
    /// Validate a render payload file against the canonical schema
    Validate {
        /// JSON file holding the RenderPayload to check
        payload_file: PathBuf,
    },
}

impl Commands {
    fn op(&self) -> &'static str {
        match self {
            Commands::Simulate { .. } => "simulate",
            Commands::Render { .. } => "render",
            Commands::Interop { .. } => "interop",
            Commands::Dump { .. } => "dump",
            Commands::Validate { .. } => "validate",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    // In-band failures (unknown module, missing entity, validation issues)
    // come back as normal envelopes and exit 0; exit 1 is reserved for
    // harness failures such as unreadable input files.
    let op = cli.command.op();
    match run(cli.command) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to serialize output: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            let envelope = BridgeOutput::error(op, vec![err.to_string()]);
            match serde_json::to_string_pretty(&envelope) {
                Ok(text) => println!("{text}"),
                Err(err) => eprintln!("failed to serialize output: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

fn run(command: Commands) -> anyhow::Result<Value> {
    let output = match command {
        Commands::Simulate {
            engine,
            module,
            data_file,
            config,
        } => {
            let data = load_data(data_file.as_deref())?;
            serde_json::to_value(dispatch(engine, "simulate", &module, &data, config.as_deref()))?
        }
        Commands::Render {
            engine,
            module,
            data_file,
            config,
        } => {
            let data = load_data(data_file.as_deref())?;
            serde_json::to_value(dispatch(engine, "render", &module, &data, config.as_deref()))?
        }
        Commands::Interop {
            engine,
            module,
            data_file,
            config,
        } => {
            let data = load_data(data_file.as_deref())?;
            serde_json::to_value(dispatch(engine, "interop", &module, &data, config.as_deref()))?
        }
        Commands::Dump { engine, module } => serde_json::to_value(match engine {
            EngineArg::Unity => UnityBridge::new().dump(&module),
            EngineArg::Web => WebBridge::new().dump(&module),
            EngineArg::Godot => GodotBridge::new().dump(&module),
        })?,
        Commands::Validate { payload_file } => {
            let payload = load_data(Some(payload_file.as_path()))?;
            let issues = validate_render_payload_value(&payload);
            let result = if issues.is_empty() {
                RenderPayload::ok("validate", Vec::new())
            } else {
                RenderPayload::error("validate", issues)
            };
            serde_json::to_value(result)?
        }
    };
    Ok(output)
}

fn dispatch(
    engine: EngineArg,
    op: &str,
    module: &str,
    data: &Value,
    config_path: Option<&Path>,
) -> BridgeOutput {
    match engine {
        EngineArg::Unity => {
            let config: UnityBridgeConfig = load_config(config_path);
            let mut bridge = UnityBridge::new();
            match op {
                "simulate" => bridge.simulate(module, data, &config),
                "interop" => bridge.interop(module, data, &config),
                _ => bridge.render(module, data, &config),
            }
        }
        EngineArg::Web => {
            let config: WebBridgeConfig = load_config(config_path);
            let mut bridge = WebBridge::new();
            match op {
                "simulate" => bridge.simulate(module, data, &config),
                "interop" => bridge.interop(module, data, &config),
                _ => bridge.render(module, data, &config),
            }
        }
        EngineArg::Godot => {
            let config: GodotBridgeConfig = load_config(config_path);
            let mut bridge = GodotBridge::new();
            match op {
                "simulate" => bridge.simulate(module, data, &config),
                "interop" => bridge.interop(module, data, &config),
                _ => bridge.render(module, data, &config),
            }
        }
    }
}

fn load_data(path: Option<&Path>) -> anyhow::Result<Value> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", path.display()))?;
            Ok(serde_json::from_str(&text)
                .map_err(|err| anyhow::anyhow!("invalid JSON in {}: {err}", path.display()))?)
        }
        None => Ok(Value::Object(serde_json::Map::new())),
    }
}

/// Partial config files merge over engine defaults; a malformed file logs a
/// warning and falls back to the defaults entirely.
fn load_config<T: Default + DeserializeOwned>(path: Option<&Path>) -> T {
    let Some(path) = path else {
        return T::default();
    };

    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!("malformed config {}, using defaults: {err}", path.display());
                T::default()
            }
        },
        Err(err) => {
            warn!("cannot read config {}, using defaults: {err}", path.display());
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_json(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn unknown_module_is_an_envelope_not_a_harness_error() {
        let result = run(Commands::Render {
            engine: EngineArg::Godot,
            module: "physics".to_string(),
            data_file: None,
            config: None,
        });
        let output = result.unwrap();
        assert_eq!(output["op"], "render");
        assert_eq!(output["status"], "error");
        assert_eq!(output["issues"][0], "Unknown module: physics");
    }

    #[test]
    fn missing_data_file_is_a_harness_error() {
        let result = run(Commands::Simulate {
            engine: EngineArg::Unity,
            module: "npcs".to_string(),
            data_file: Some(PathBuf::from("/no/such/file.json")),
            config: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn validate_reports_prefixed_issues() {
        let path = temp_json(
            "miff_cli_invalid_payload.json",
            r#"{ "op": "render", "status": "ok", "renderData": [ { "id": "s", "type": "invalid_type" } ] }"#,
        );
        let output = run(Commands::Validate { payload_file: path }).unwrap();
        assert_eq!(output["op"], "validate");
        assert_eq!(output["status"], "error");
        assert_eq!(
            output["issues"][0],
            "RenderData 0: Invalid render type: invalid_type"
        );
    }

    #[test]
    fn validate_accepts_a_clean_payload() {
        let path = temp_json(
            "miff_cli_valid_payload.json",
            r#"{ "op": "render", "status": "ok", "renderData": [] }"#,
        );
        let output = run(Commands::Validate { payload_file: path }).unwrap();
        assert_eq!(output["status"], "ok");
        assert!(output.get("issues").is_none());
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let path = temp_json("miff_cli_bad_config.json", "{ not json");
        let config: GodotBridgeConfig = load_config(Some(path.as_path()));
        assert_eq!(config, GodotBridgeConfig::default());
    }
}
