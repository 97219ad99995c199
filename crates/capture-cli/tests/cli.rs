use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::{Value, json};

const QUESTIONNAIRE: &str = include_str!("../../qa-capture/tests/fixtures/intake.json");
const RESPONSE: &str = include_str!("../../qa-capture/tests/fixtures/intake_response.json");

fn cli() -> Command {
    Command::cargo_bin("greentic-capture").expect("binary")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn init_prints_mirrored_response() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");

    let output = cli()
        .args(["init", "--questionnaire"])
        .arg(questionnaire.path())
        .output()
        .expect("run");
    assert!(output.status.success());

    let response: Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert_eq!(response["questionnaire"], "Questionnaire/intake");
    assert_eq!(response["items"][0]["linkId"], "basics");
    assert_eq!(response["items"][0]["items"][1]["linkId"], "age");
}

#[test]
fn check_reports_constraint_failures() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");
    let response = temp.child("response.json");
    response.write_str(RESPONSE).expect("write");

    let output = cli()
        .args(["check", "--questionnaire"])
        .arg(questionnaire.path())
        .arg("--response")
        .arg(response.path())
        .output()
        .expect("run");

    assert!(!output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Structure: ok"));
    assert!(stdout.contains("Validation result: invalid"));
    assert!(stdout.contains("0.1 (age) - Maximum value allowed is: 130"));
}

#[test]
fn check_uses_configured_messages() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");
    let response = temp.child("response.json");
    response.write_str(RESPONSE).expect("write");
    let config = temp.child("config.json");
    config
        .write_str(
            &json!({
                "messages": {
                    "http://hl7.org/fhir/StructureDefinition/maxValue": "Too high, limit {{limit}}"
                }
            })
            .to_string(),
        )
        .expect("write");

    let output = cli()
        .args(["check", "--questionnaire"])
        .arg(questionnaire.path())
        .arg("--response")
        .arg(response.path())
        .arg("--config")
        .arg(config.path())
        .output()
        .expect("run");

    assert!(stdout_of(&output).contains("Too high, limit 130"));
}

#[test]
fn check_fails_on_structural_mismatch() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");
    let response = temp.child("response.json");
    response
        .write_str(&json!({ "items": [{ "linkId": "a-different-link-id" }] }).to_string())
        .expect("write");

    let output = cli()
        .args(["check", "--questionnaire"])
        .arg(questionnaire.path())
        .arg("--response")
        .arg(response.path())
        .output()
        .expect("run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "Mismatching linkIds for questionnaire item basics and questionnaire response item a-different-link-id"
    ));
}

#[test]
fn answer_writes_updated_response() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");
    let out = temp.child("out.json");

    cli()
        .args(["answer", "--questionnaire"])
        .arg(questionnaire.path())
        .args(["--path", "1", "--value", r#"{"boolean": true}"#, "--out"])
        .arg(out.path())
        .assert()
        .success();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).expect("read")).expect("json");
    let smoker = &written["items"][1];
    assert_eq!(smoker["answers"][0]["value"], json!({ "boolean": true }));
    assert_eq!(smoker["answers"][0]["items"][0]["linkId"], "packs");
    assert!(smoker.get("items").is_none());
}

#[test]
fn answer_rejects_constraint_violation() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");

    let output = cli()
        .args(["answer", "--questionnaire"])
        .arg(questionnaire.path())
        .args(["--path", "0.1", "--value", r#"{"integer": -4}"#])
        .output()
        .expect("run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Minimum value allowed is: 0"));
}

#[test]
fn render_json_lists_items() {
    let temp = TempDir::new().expect("temp dir");
    let questionnaire = temp.child("intake.json");
    questionnaire.write_str(QUESTIONNAIRE).expect("write");

    let output = cli()
        .args(["render", "--format", "json", "--questionnaire"])
        .arg(questionnaire.path())
        .output()
        .expect("run");
    assert!(output.status.success());

    let ui: Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    let ids: Vec<_> = ui["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["linkId"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["basics", "name", "age", "smoker", "postcode"]);
}

#[test]
fn schema_describes_models() {
    let output = cli().arg("schema").output().expect("run");
    assert!(output.status.success());
    let schema: Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert!(schema.get("questionnaire").is_some());
    assert!(schema.get("questionnaireResponse").is_some());
    assert!(schema.get("validationConfig").is_some());
}
