//! Golden fixture checks against `fixtures/sample_render.json`.

use miff_schema::{
    validate_render_payload, validate_render_payload_value, RenderPayload,
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn fixture() -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sample_render.json");
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn fixture_declares_the_current_schema_version() {
    assert_eq!(fixture()["schemaVersion"], miff_schema::SCHEMA_VERSION);
}

#[test]
fn example_payloads_validate_clean() {
    let fixture = fixture();
    for module in ["npc_rendering", "combat_rendering", "ui_rendering"] {
        let unified = &fixture["examples"][module]["unified"];

        let issues = validate_render_payload_value(unified);
        assert!(issues.is_empty(), "{module} raw issues: {issues:?}");

        let payload: RenderPayload = serde_json::from_value(unified.clone()).unwrap();
        let issues = validate_render_payload(&payload);
        assert!(issues.is_empty(), "{module} typed issues: {issues:?}");
    }
}

#[test]
fn example_payloads_round_trip_through_the_typed_model() {
    let fixture = fixture();
    let unified = &fixture["examples"]["npc_rendering"]["unified"];
    let payload: RenderPayload = serde_json::from_value(unified.clone()).unwrap();
    let back = serde_json::to_value(&payload).unwrap();
    assert_eq!(&back, unified);
}

#[test]
fn valid_payload_has_no_issues() {
    let fixture = fixture();
    let issues = validate_render_payload_value(&fixture["validation_examples"]["valid_payload"]);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn invalid_payload_reports_type_and_position_issues() {
    let fixture = fixture();
    let issues =
        validate_render_payload_value(&fixture["validation_examples"]["invalid_payload"]);
    assert!(issues.contains(&"RenderData 0: Invalid render type: invalid_type".to_string()));
    assert!(issues.contains(&"RenderData 0: Position x and y must be numbers".to_string()));
}

#[test]
fn validation_is_idempotent() {
    let fixture = fixture();
    let payload = &fixture["validation_examples"]["invalid_payload"];
    let first = validate_render_payload_value(payload);
    let second = validate_render_payload_value(payload);
    assert_eq!(first, second);
}
