//! Error handling for bridge operations
//!
//! Structural validation never produces these errors; it returns issue lists
//! (see `validate`). `BridgeError` covers the failures that abort an
//! operation: unknown modules, missing entities, bad configuration, and the
//! I/O and JSON failures of the CLI harness around the bridges.

use thiserror::Error;

/// Main error type for bridge and manager operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Dispatch target outside the known module set.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// A manager was asked about an entity it does not hold.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: String, id: String },

    /// Domain-manager failures surfaced verbatim as issues.
    #[error("{message}")]
    Manager { message: String },

    /// Configuration errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Canonical/native conversion errors.
    #[error("Conversion error: {message}")]
    Conversion { message: String },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors.
    #[error("Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl BridgeError {
    /// Create an unknown-module error.
    pub fn unknown_module<S: Into<String>>(module: S) -> Self {
        Self::UnknownModule(module.into())
    }

    /// Create a not-found error; the message shape matches the managers
    /// ("NPC with ID npc_001 not found").
    pub fn not_found<E: Into<String>, I: Into<String>>(entity: E, id: I) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a manager error carried through as an issue string.
    pub fn manager<S: Into<String>>(message: S) -> Self {
        Self::Manager {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a conversion error.
    pub fn conversion<S: Into<String>>(message: S) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_matches_manager_wording() {
        let err = BridgeError::not_found("NPC", "npc_404");
        assert_eq!(err.to_string(), "NPC with ID npc_404 not found");
    }

    #[test]
    fn unknown_module_message_is_stable() {
        let err = BridgeError::unknown_module("physics");
        assert_eq!(err.to_string(), "Unknown module: physics");
    }
}
