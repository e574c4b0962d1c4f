//! Structural validation of render data and payloads
//!
//! Validation never fails and never short-circuits: every entry point walks
//! the whole tree and returns the complete list of issues, empty meaning
//! valid. The message strings are schema v1 contract; golden tests match on
//! the exact text.
//!
//! Two entry points exist per shape. The raw (`serde_json::Value`) walkers
//! reproduce the full message set, including shape errors the typed model
//! makes unrepresentable (wrong type names, non-numeric coordinates,
//! non-array children). The typed walkers cover what remains expressible on
//! an already-deserialized tree (empty ids, unnamed signals).

use crate::types::{RenderData, RenderKind, RenderPayload};
use serde_json::Value;

/// Validate a typed render-data tree, including all descendants.
pub fn validate_render_data(data: &RenderData) -> Vec<String> {
    let mut issues = Vec::new();
    collect_data_issues(data, &mut issues);
    issues
}

/// Validate a typed payload; element issues are prefixed `RenderData <i>:`.
pub fn validate_render_payload(payload: &RenderPayload) -> Vec<String> {
    let mut issues = Vec::new();
    if payload.op.is_empty() {
        issues.push("RenderPayload must have an op".to_string());
    }
    for (index, data) in payload.render_data.iter().enumerate() {
        for issue in validate_render_data(data) {
            issues.push(format!("RenderData {index}: {issue}"));
        }
    }
    issues
}

fn collect_data_issues(data: &RenderData, issues: &mut Vec<String>) {
    if data.id.is_empty() {
        issues.push("RenderData must have an id".to_string());
    }
    for (index, signal) in data.signals.iter().enumerate() {
        if signal.name.is_empty() {
            issues.push(format!("Signal {index}: must have a name"));
        }
    }
    for (index, child) in data.children.iter().enumerate() {
        let mut child_issues = Vec::new();
        collect_data_issues(child, &mut child_issues);
        for issue in child_issues {
            issues.push(format!("Child {index}: {issue}"));
        }
    }
}

/// Validate raw render-data JSON before deserialization.
pub fn validate_render_data_value(value: &Value) -> Vec<String> {
    let mut issues = Vec::new();
    collect_value_issues(value, &mut issues);
    issues
}

/// Validate a raw payload object; element issues are prefixed
/// `RenderData <i>:`.
pub fn validate_render_payload_value(value: &Value) -> Vec<String> {
    let mut issues = Vec::new();

    if !has_nonempty_string(value, "op") {
        issues.push("RenderPayload must have an op".to_string());
    }

    match value.get("status") {
        None | Some(Value::Null) => {
            issues.push("RenderPayload must have a status".to_string());
        }
        Some(Value::String(status)) if status == "ok" || status == "error" => {}
        Some(_) => issues.push("Status must be \"ok\" or \"error\"".to_string()),
    }

    match value.get("renderData") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                for issue in validate_render_data_value(entry) {
                    issues.push(format!("RenderData {index}: {issue}"));
                }
            }
        }
        _ => issues.push("RenderPayload renderData must be an array".to_string()),
    }

    if let Some(extra) = value.get("issues") {
        if !extra.is_null() && !extra.is_array() {
            issues.push("Issues must be an array".to_string());
        }
    }

    issues
}

fn collect_value_issues(value: &Value, issues: &mut Vec<String>) {
    if !has_nonempty_string(value, "id") {
        issues.push("RenderData must have an id".to_string());
    }

    match value.get("type") {
        None | Some(Value::Null) => {
            issues.push("RenderData must have a type".to_string());
        }
        Some(Value::String(kind)) if kind.is_empty() => {
            issues.push("RenderData must have a type".to_string());
        }
        Some(Value::String(kind)) => {
            if !RenderKind::WIRE_NAMES.contains(&kind.as_str()) {
                issues.push(format!("Invalid render type: {kind}"));
            }
        }
        // Falsy non-strings (false, 0) count as a missing type, not an
        // invalid one.
        Some(Value::Bool(false)) => {
            issues.push("RenderData must have a type".to_string());
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
            issues.push("RenderData must have a type".to_string());
        }
        Some(other) => issues.push(format!("Invalid render type: {other}")),
    }

    if let Some(position) = present(value, "position") {
        if !both_numbers(position, "x", "y") {
            issues.push("Position x and y must be numbers".to_string());
        }
        if bad_optional_number(position, "z") {
            issues.push("Position z must be a number if provided".to_string());
        }
    }

    if let Some(scale) = present(value, "scale") {
        if !both_numbers(scale, "x", "y") {
            issues.push("Scale x and y must be numbers".to_string());
        }
        if bad_optional_number(scale, "z") {
            issues.push("Scale z must be a number if provided".to_string());
        }
    }

    if let Some(rotation) = present(value, "rotation") {
        let all_numbers = both_numbers(rotation, "x", "y")
            && rotation.get("z").map(Value::is_number).unwrap_or(false);
        if !all_numbers {
            issues.push("Rotation x, y, and z must be numbers".to_string());
        }
    }

    if let Some(children) = present(value, "children") {
        match children.as_array() {
            Some(entries) => {
                for (index, child) in entries.iter().enumerate() {
                    let mut child_issues = Vec::new();
                    collect_value_issues(child, &mut child_issues);
                    for issue in child_issues {
                        issues.push(format!("Child {index}: {issue}"));
                    }
                }
            }
            None => issues.push("Children must be an array".to_string()),
        }
    }

    if let Some(signals) = present(value, "signals") {
        match signals.as_array() {
            Some(entries) => {
                for (index, signal) in entries.iter().enumerate() {
                    if !has_nonempty_string(signal, "name") {
                        issues.push(format!("Signal {index}: must have a name"));
                    }
                    if let Some(parameters) = present(signal, "parameters") {
                        if !parameters.is_array() {
                            issues.push(format!("Signal {index}: parameters must be an array"));
                        }
                    }
                    if let Some(connected) = present(signal, "connectedTo") {
                        if !connected.is_array() {
                            issues.push(format!("Signal {index}: connectedTo must be an array"));
                        }
                    }
                }
            }
            None => issues.push("Signals must be an array".to_string()),
        }
    }
}

fn present<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    match value.get(field) {
        None | Some(Value::Null) => None,
        Some(inner) => Some(inner),
    }
}

fn has_nonempty_string(value: &Value, field: &str) -> bool {
    matches!(value.get(field), Some(Value::String(s)) if !s.is_empty())
}

fn both_numbers(value: &Value, a: &str, b: &str) -> bool {
    value.get(a).map(Value::is_number).unwrap_or(false)
        && value.get(b).map(Value::is_number).unwrap_or(false)
}

fn bad_optional_number(value: &Value, field: &str) -> bool {
    match value.get(field) {
        None | Some(Value::Null) => false,
        Some(inner) => !inner.is_number(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RenderData, RenderKind, Signal, Vec3};
    use serde_json::json;

    #[test]
    fn valid_sprite_has_no_issues() {
        let data = RenderData::new("test_sprite", RenderKind::Sprite)
            .at(Vec3::xy(100.0, 200.0))
            .with_asset("test.png");
        assert!(validate_render_data(&data).is_empty());
    }

    #[test]
    fn empty_id_is_reported() {
        let data = RenderData::new("", RenderKind::Sprite);
        assert_eq!(
            validate_render_data(&data),
            vec!["RenderData must have an id".to_string()]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let data = RenderData::new("", RenderKind::Node)
            .with_child(RenderData::new("child", RenderKind::Sprite).with_signal(Signal::new("")));
        let first = validate_render_data(&data);
        let second = validate_render_data(&data);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "RenderData must have an id".to_string(),
                "Child 0: Signal 0: must have a name".to_string(),
            ]
        );
    }

    #[test]
    fn raw_missing_id_and_bad_type_are_both_reported() {
        let issues = validate_render_data_value(&json!({
            "type": "invalid_type",
            "position": { "x": 100, "y": 200 }
        }));
        assert!(issues.contains(&"RenderData must have an id".to_string()));
        assert!(issues.contains(&"Invalid render type: invalid_type".to_string()));
    }

    #[test]
    fn raw_falsy_type_counts_as_missing() {
        for falsy in [json!(0), json!(false)] {
            let issues = validate_render_data_value(&json!({
                "id": "test_sprite",
                "type": falsy
            }));
            assert_eq!(
                issues,
                vec!["RenderData must have a type".to_string()],
                "type = {falsy}"
            );
        }
        let issues = validate_render_data_value(&json!({
            "id": "test_sprite",
            "type": 123
        }));
        assert_eq!(issues, vec!["Invalid render type: 123".to_string()]);
    }

    #[test]
    fn raw_non_numeric_position_is_reported() {
        let issues = validate_render_data_value(&json!({
            "id": "test_sprite",
            "type": "sprite",
            "position": { "x": "not_a_number", "y": 200 }
        }));
        assert!(issues.contains(&"Position x and y must be numbers".to_string()));
    }

    #[test]
    fn raw_optional_z_must_be_numeric() {
        let issues = validate_render_data_value(&json!({
            "id": "s",
            "type": "sprite",
            "position": { "x": 1, "y": 2, "z": "deep" }
        }));
        assert_eq!(
            issues,
            vec!["Position z must be a number if provided".to_string()]
        );
    }

    #[test]
    fn raw_children_must_be_an_array() {
        let issues = validate_render_data_value(&json!({
            "id": "parent",
            "type": "node",
            "children": "not_an_array"
        }));
        assert!(issues.contains(&"Children must be an array".to_string()));
    }

    #[test]
    fn raw_signals_must_be_an_array() {
        let issues = validate_render_data_value(&json!({
            "id": "test_sprite",
            "type": "sprite",
            "signals": "not_an_array"
        }));
        assert!(issues.contains(&"Signals must be an array".to_string()));
    }

    #[test]
    fn raw_nested_children_are_prefixed() {
        let issues = validate_render_data_value(&json!({
            "id": "parent",
            "type": "node",
            "children": [
                { "id": "child", "type": "bogus" }
            ]
        }));
        assert_eq!(issues, vec!["Child 0: Invalid render type: bogus".to_string()]);
    }

    #[test]
    fn raw_signal_fields_are_checked() {
        let issues = validate_render_data_value(&json!({
            "id": "s",
            "type": "sprite",
            "signals": [
                { "parameters": "event", "connectedTo": {} }
            ]
        }));
        assert_eq!(
            issues,
            vec![
                "Signal 0: must have a name".to_string(),
                "Signal 0: parameters must be an array".to_string(),
                "Signal 0: connectedTo must be an array".to_string(),
            ]
        );
    }

    #[test]
    fn raw_payload_issues_are_prefixed_per_element() {
        let issues = validate_render_payload_value(&json!({
            "op": "render",
            "status": "ok",
            "renderData": [
                { "id": "bad", "type": "invalid_type", "position": { "x": "no", "y": 200 } }
            ]
        }));
        assert!(issues.contains(&"RenderData 0: Invalid render type: invalid_type".to_string()));
        assert!(issues.contains(&"RenderData 0: Position x and y must be numbers".to_string()));
    }

    #[test]
    fn raw_payload_envelope_is_checked() {
        let issues = validate_render_payload_value(&json!({
            "status": "maybe",
            "renderData": "not_an_array",
            "issues": "not_an_array"
        }));
        assert_eq!(
            issues,
            vec![
                "RenderPayload must have an op".to_string(),
                "Status must be \"ok\" or \"error\"".to_string(),
                "RenderPayload renderData must be an array".to_string(),
                "Issues must be an array".to_string(),
            ]
        );
    }
}
