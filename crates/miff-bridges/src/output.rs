//! Bridge output envelope.

use miff_schema::{BridgeError, PayloadMetadata, Status};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The result of any bridge call, in the schema v1 envelope shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeOutput {
    pub op: String,
    pub status: Status,
    #[serde(rename = "renderData", skip_serializing_if = "Option::is_none")]
    pub render_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PayloadMetadata>,
}

impl BridgeOutput {
    pub fn ok<S: Into<String>>(op: S, render_data: Value) -> Self {
        Self {
            op: op.into(),
            status: Status::Ok,
            render_data: Some(render_data),
            issues: Vec::new(),
            metadata: None,
        }
    }

    pub fn error<S: Into<String>>(op: S, issues: Vec<String>) -> Self {
        Self {
            op: op.into(),
            status: Status::Error,
            render_data: None,
            issues,
            metadata: None,
        }
    }

    pub fn from_error<S: Into<String>>(op: S, err: &BridgeError) -> Self {
        Self::error(op, vec![err.to_string()])
    }

    pub fn with_metadata(mut self, metadata: PayloadMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
