use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn hiredpath(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hiredpath"))
        .env("HIREDPATH_CONFIG_DIR", config_dir)
        .env_remove("HIREDPATH_REDUCED_MOTION")
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run hiredpath")
}

#[test]
fn page_command_writes_landing_page() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("index.html");

    let output = hiredpath(root.path(), &["page", "--out", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Find Your Path to the Perfect PM Role"));
    assert!(html.contains(r#"<section id="waitlist""#));
    assert!(html.contains("HiredPath. All rights reserved."));
    assert!(html.contains(r#"aria-hidden="true""#));
}

#[test]
fn page_command_uses_discovered_config() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("hiredpath.toml"),
        "version = 1\n[page]\nwaitlist_url = \"https://example.com/join?ref=cli&src=test\"\n",
    )
    .unwrap();

    let output = hiredpath(root.path(), &["page"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.contains(r#"href="https://example.com/join?ref=cli&amp;src=test""#));
}

#[test]
fn invalid_config_fails() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("hiredpath.toml"), "version = 2\n").unwrap();

    let output = hiredpath(root.path(), &["page"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported config version"));
}

#[test]
fn explicit_missing_config_fails() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");

    let output = hiredpath(root.path(), &["--config", missing.to_str().unwrap(), "paths"]);
    assert!(!output.status.success());
}

#[test]
fn motion_command_prints_json_lines() {
    let root = TempDir::new().unwrap();

    let output = hiredpath(root.path(), &["motion", "typewriter", "--frames", "25"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(frames.len(), 25);
    assert_eq!(frames[24]["frame"], 24);
    assert!(frames[24]["state"]["text"].as_str().unwrap().starts_with("Pro"));
}

#[test]
fn reduced_motion_flag_reaches_effects() {
    let root = TempDir::new().unwrap();

    let output = hiredpath(
        root.path(),
        &["--reduced-motion", "motion", "count-up", "--frames", "1"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let line: serde_json::Value =
        serde_json::from_str(String::from_utf8(output.stdout).unwrap().trim()).unwrap();
    assert_eq!(line["state"]["text"], "94.7%");
    assert_eq!(line["state"]["finished"], true);
}

#[test]
fn paths_command_reports_config_location() {
    let root = TempDir::new().unwrap();

    let output = hiredpath(root.path(), &["paths"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&root.path().display().to_string()));
    assert!(stdout.contains("hiredpath.toml"));
    assert!(stdout.contains("not found"));
}
