use std::path::Path;
use std::process::{Command, Output};

use fieldform_app::AppConfig;
use tokio_test::assert_ok;
use uuid::Uuid;

const SUCCESS_PAYLOAD: &str = r#"{"latitude": 12.5, "longitude": 77.6}"#;
const DENIED_PAYLOAD: &str = r#"{"error": "User denied Geolocation", "code": 1}"#;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn run_fieldform(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fieldform"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("Failed to start fieldform binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn store_arg(dir: &Path) -> String {
    dir.join("submissions.json").display().to_string()
}

#[test]
fn fixture_config_parses() {
    let config = assert_ok!(AppConfig::from_file(&fixture("static_location.yaml")));
    assert_eq!(config.capture.timeout_secs, 5);
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let output = run_fieldform(&["--config", &fixture("static_location.yaml"), "--dry-run"]);

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        stdout_of(&output),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn dry_run_rejects_missing_config() {
    let output = run_fieldform(&["--config", "/nonexistent/fieldform.yaml", "--dry-run"]);
    assert!(!output.status.success());
}

#[test]
fn submit_with_location_enabled_stores_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_arg(dir.path());
    let output = run_fieldform(&[
        "--payload",
        SUCCESS_PAYLOAD,
        "--store",
        &store,
        "submit",
        "--location-enabled",
        "--name",
        "Alice",
        "--role",
        "Surveyor",
    ]);

    let stdout = stdout_of(&output);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("Coordinates Captured: 12.5, 77.6"));
    assert!(stdout.contains("Form submitted successfully!"));
    assert!(stdout.contains(
        "Name: Alice, Role: Surveyor, Task: , Notes: , Latitude: 12.5, Longitude: 77.6"
    ));

    let saved = std::fs::read_to_string(dir.path().join("submissions.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(records.as_array().map(Vec::len), Some(1));
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["latitude"], 12.5);

    let session_id = records[0]["session_id"]
        .as_str()
        .expect("stored record carries a session id");
    assert_ok!(Uuid::parse_str(session_id));
}

#[test]
fn submit_json_prints_submission() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_arg(dir.path());
    let output = run_fieldform(&[
        "--config",
        &fixture("static_location.yaml"),
        "--store",
        &store,
        "submit",
        "--location-enabled",
        "--name",
        "Bob",
        "--json",
    ]);

    let stdout = stdout_of(&output);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains(r#""name": "Bob""#));
    assert!(stdout.contains(r#""longitude": 77.6"#));
}

#[test]
fn submit_with_denied_location_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_arg(dir.path());
    let output = run_fieldform(&[
        "--payload",
        DENIED_PAYLOAD,
        "--store",
        &store,
        "submit",
        "--location-enabled",
        "--name",
        "Alice",
    ]);

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(3), "stdout: {stdout}");
    assert!(stdout.contains("Failed to capture coordinates: "));
    assert!(stdout.contains("User denied Geolocation"));
    assert!(stdout.contains("Re-enable location permission, then retry."));
    assert!(stdout.contains(
        "Coordinates not captured. Ensure location permissions are enabled and try again."
    ));
    assert!(!dir.path().join("submissions.json").exists() || {
        let saved = std::fs::read_to_string(dir.path().join("submissions.json")).unwrap();
        saved.trim() == "[]"
    });
}

#[test]
fn submit_without_acknowledgement_stays_gated() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_arg(dir.path());
    let output = run_fieldform(&["--payload", SUCCESS_PAYLOAD, "--store", &store, "submit"]);

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(2), "stdout: {stdout}");
    assert!(stdout.contains("Please enable your location to proceed."));
    assert!(!stdout.contains("Coordinates Captured"));
}
