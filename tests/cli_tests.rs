//! CLI integration tests
//!
//! These tests run the built binary against temporary XML files.

#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const RIGHTS: &str = r#"<ddms:rights xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:privacyAct="true" ddms:copyright="false"/>"#;

fn ddms(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ddms"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn xml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_cli_render_text() {
    let file = xml_file(RIGHTS);
    let output = ddms(&["render", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "render should succeed");
    assert!(stdout.contains("rights.privacyAct: true"));
    assert!(stdout.contains("rights.intellectualProperty: false"));
}

#[test]
fn test_cli_render_json() {
    let file = xml_file(RIGHTS);
    let output = ddms(&["render", "--format", "json", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "render --format json should succeed");
    let json: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("Output should be valid JSON");
    assert_eq!(json["privacyAct"], true);
}

#[test]
fn test_cli_render_html() {
    let file = xml_file(RIGHTS);
    let output = ddms(&["render", "-f", "html", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("<meta name=\"rights.privacyAct\" content=\"true\" />"));
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_cli_validate_warnings() {
    let file = xml_file(r#"<ddms:dates xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"/>"#);
    let output = ddms(&["validate", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "empty dates are valid");
    assert!(stdout.contains("is valid DDMS 5.0"));
    assert!(stdout.contains("A completely empty ddms:dates element was found."));
}

#[test]
fn test_cli_validate_invalid() {
    let file = xml_file(
        r#"<ddms:dates xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:created="---31"/>"#,
    );
    let output = ddms(&["validate", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success(), "bad date should fail");
    assert!(stdout.contains("is invalid"));
    assert!(stdout.contains("xs:gYear"));
}

#[test]
fn test_cli_missing_file() {
    let output = ddms(&["validate", "/nonexistent/dates.xml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

// ============================================================================
// Versions Command Tests
// ============================================================================

#[test]
fn test_cli_versions() {
    let output = ddms(&["versions"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("5.0 (default)"));
    assert!(stdout.contains("urn:us:mil:ces:metadata:ddms:4"));
    assert!(stdout.contains("http://metadata.dod.mil/mdr/ns/DDMS/2.0/"));
}

#[test]
fn test_cli_custom_prefix() {
    let properties = xml_file("ddms.prefix=md\n");
    let file = xml_file(RIGHTS);
    let output = ddms(&[
        "--properties",
        properties.path().to_str().unwrap(),
        "render",
        "-f",
        "xml",
        file.path().to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    // parsed components keep the prefixes of their source document
    assert!(stdout.contains("<ddms:rights"));
}
