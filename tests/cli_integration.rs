//! Integration tests for the cellhost binary
//!
//! These tests drive the CLI end to end:
//! - Listing cell types
//! - Rendering with default and file-supplied settings
//! - Editing cell inputs
//! - Replaying event scripts

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Helper to run cellhost isolated in its own config directory
fn run_cellhost(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cellhost"))
        .current_dir(dir)
        .env("CELLHOST_DIR", dir)
        .env_remove("CELLHOST_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute cellhost")
}

/// Helper to run cellhost and parse stdout as a single JSON document
fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = run_cellhost(dir, args);
    assert!(
        output.status.success(),
        "cellhost {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn write_settings(dir: &Path, yaml: &str) {
    fs::write(dir.join("cellhost.yaml"), yaml).unwrap();
}

#[test]
fn test_list_shows_example() {
    let temp = TempDir::new().unwrap();
    let json = run_json(temp.path(), &["list", "-o", "json"]);

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "example");
}

#[test]
fn test_list_filter_without_match_is_empty() {
    let temp = TempDir::new().unwrap();
    let json = run_json(temp.path(), &["list", "--filter", "zzz", "-o", "json"]);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[test]
fn test_render_defaults() {
    let temp = TempDir::new().unwrap();
    let json = run_json(temp.path(), &["render", "-o", "json"]);

    assert_eq!(json["mode"], "cell");
    assert_eq!(json["selector"]["selected"], "example");
    assert_eq!(json["selector"]["options"], serde_json::json!(["example"]));
    assert_eq!(json["config"]["title"], "Dummy Title");
    assert_eq!(json["config"]["description"], "Some default text from CellSelector");
}

#[test]
fn test_render_with_title_edit() {
    let temp = TempDir::new().unwrap();
    let json = run_json(temp.path(), &["render", "--set", "title=My Cell", "-o", "json"]);

    assert_eq!(json["config"]["title"], "My Cell");
    assert_eq!(json["config"]["description"], "Some default text from CellSelector");

    let widgets = json["cell"]["widgets"].as_array().unwrap();
    let title = widgets.iter().find(|w| w["name"] == "title").unwrap();
    assert_eq!(title["value"], "My Cell");
}

#[test]
fn test_render_set_keeps_typed_text() {
    let temp = TempDir::new().unwrap();
    let json = run_json(
        temp.path(),
        &["render", "--set", "title=1.50", "--set", "description=null", "-o", "json"],
    );

    assert_eq!(json["config"]["title"], "1.50");
    assert_eq!(json["config"]["description"], "null");
}

#[test]
fn test_render_unknown_selection_is_error_view_not_failure() {
    let temp = TempDir::new().unwrap();
    let json = run_json(temp.path(), &["render", "--select", "ghost", "-o", "json"]);

    assert_eq!(json["mode"], "error");
    assert_eq!(json["identifier"], "ghost");
    assert_eq!(json["message"], "No valid cell type found for \"ghost\".");
    assert!(json.get("cell").is_none());
}

#[test]
fn test_render_uses_settings_file() {
    let temp = TempDir::new().unwrap();
    write_settings(
        temp.path(),
        r#"
host:
  initial_config:
    title: Configured
  peers:
    - default.A1
    - default.B2
"#,
    );

    let json = run_json(temp.path(), &["render", "-o", "json"]);

    assert_eq!(json["config"]["title"], "Configured");
    assert!(json["config"].get("description").is_none());
    let widgets = json["cell"]["widgets"].as_array().unwrap();
    let list = widgets.iter().find(|w| w["kind"] == "list").unwrap();
    assert_eq!(list["items"], serde_json::json!(["default.A1", "default.B2"]));
}

#[test]
fn test_settings_with_unknown_selection() {
    let temp = TempDir::new().unwrap();
    write_settings(temp.path(), "host:\n  initial_selection: missing\n");

    let json = run_json(temp.path(), &["render", "-o", "json"]);
    assert_eq!(json["mode"], "error");
    assert_eq!(json["identifier"], "missing");
}

#[test]
fn test_run_script_file() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    fs::write(
        &script,
        r#"# edit, leave and come back
input title My Cell
render
select ghost
render
select example
set extra {"n": 1}
render
"#,
    )
    .unwrap();

    let output = run_cellhost(temp.path(), &["run", script.to_str().unwrap(), "-o", "json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let views: Vec<Value> = stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

    assert_eq!(views.len(), 3);
    assert_eq!(views[0]["config"]["title"], "My Cell");
    assert_eq!(views[1]["mode"], "error");
    assert_eq!(views[2]["mode"], "cell");
    assert_eq!(views[2]["config"]["title"], "My Cell");
    assert_eq!(views[2]["config"]["extra"]["n"], 1);
}

#[test]
fn test_run_script_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_cellhost"))
        .current_dir(temp.path())
        .env("CELLHOST_DIR", temp.path())
        .env_remove("CELLHOST_CONFIG")
        .args(["run", "-o", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cellhost");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"input description Updated\nrender\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let view: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["config"]["description"], "Updated");
    assert_eq!(view["config"]["title"], "Dummy Title");
}

#[test]
fn test_run_bad_script_fails() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.txt");
    fs::write(&script, "render\nexplode now\n").unwrap();

    let output = run_cellhost(temp.path(), &["run", script.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {}", stderr);
}

#[test]
fn test_render_bad_set_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_cellhost(temp.path(), &["render", "--set", "no-equals-sign"]);
    assert!(!output.status.success());
}

#[test]
fn test_config_show_json() {
    let temp = TempDir::new().unwrap();
    write_settings(temp.path(), "log_level: warn\nhost:\n  initial_selection: example\n");

    let json = run_json(temp.path(), &["config", "show", "-o", "json"]);
    assert_eq!(json["log_level"], "warn");
    assert_eq!(json["host"]["initial_selection"], "example");
}
