//! CLI integration tests
//!
//! These run the real binary and check what it prints or writes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn goblin_glow() -> Command {
    let mut cmd = Command::cargo_bin("goblin-glow").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_info_desktop_count() {
    goblin_glow()
        .args(["particles", "info", "--width", "1024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("desktop"))
        .stdout(predicate::str::contains("80"));
}

#[test]
fn test_info_mobile_count() {
    goblin_glow()
        .args(["particles", "info", "--width", "320"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mobile"))
        .stdout(predicate::str::contains("35"));
}

#[test]
fn test_config_yaml_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glow.yaml");
    fs::write(&path, "desktop_count: 12\nmargin: 4.0\n").unwrap();

    goblin_glow()
        .args(["particles", "config", "--format", "yaml", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("desktop_count: 12"))
        .stdout(predicate::str::contains("mobile_count: 35"));

    goblin_glow()
        .args(["particles", "info", "--width", "1280", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("12"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"life": {"min": 600, "max": 200}}"#).unwrap();

    goblin_glow()
        .args(["particles", "config", "--config"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_simulate_json_summary() {
    let output = goblin_glow()
        .args([
            "particles", "simulate", "--width", "1024", "--height", "768", "--seed", "7",
            "--frames", "300", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["particles"], 80);
    assert_eq!(summary["frames"], 300);
    assert_eq!(summary["seed"], 7);
    assert_eq!(summary["device"], "desktop");
    assert!(summary.get("particle_states").is_none());
}

#[test]
fn test_simulate_is_deterministic_for_a_seed() {
    let run = || {
        goblin_glow()
            .args([
                "particles", "simulate", "--seed", "99", "--frames", "120", "--json",
                "--particles",
            ])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_simulate_resize_keeps_count() {
    let output = goblin_glow()
        .args([
            "particles", "simulate", "--width", "1280", "--seed", "3", "--frames", "200",
            "--resize", "400x300@50", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["particles"], 80);
    assert_eq!(summary["width"], 400.0);
}

#[test]
fn test_render_writes_png() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("frames/glow.png");

    goblin_glow()
        .args([
            "particles", "render", "--width", "200", "--height", "100", "--seed", "1",
            "--frames", "5", "--sequence", "2", "--background", "0d0b08", "--output",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 5 frames"));

    let image = image::open(&out).unwrap();
    assert_eq!((image.width(), image.height()), (200, 100));
    assert!(dir.path().join("frames/glow_00003.png").exists());
    assert!(dir.path().join("frames/glow_00004.png").exists());
    assert!(!dir.path().join("frames/glow_00002.png").exists());
}

#[test]
fn test_run_stops_after_duration() {
    goblin_glow()
        .args([
            "particles", "run", "--width", "320", "--seed", "2", "--fps", "120", "--duration",
            "0.2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped by handle"))
        .stdout(predicate::str::contains("true"))
        .stdout(predicate::str::contains("120.0 fps"));
}

#[test]
fn test_run_rejects_unrepresentable_duration() {
    goblin_glow()
        .args(["particles", "run", "--seed", "2", "--duration", "1e300"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("too long"));
}

#[test]
fn test_run_rejects_zero_fps() {
    goblin_glow()
        .args(["particles", "run", "--fps", "0", "--duration", "0.1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--fps"));
}

#[test]
fn test_render_rejects_oversized_surface() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("huge.png");

    goblin_glow()
        .args([
            "particles", "render", "--width", "1e9", "--height", "1e9", "--seed", "1",
            "--frames", "1", "--output",
        ])
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceed"));
    assert!(!out.exists());
}

#[test]
fn test_effects_scroll() {
    goblin_glow()
        .args(["effects", "scroll", "--offset", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.500"))
        .stdout(predicate::str::contains("translateY(25px)"));

    goblin_glow()
        .args(["effects", "scroll", "--offset", "100", "--mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(disabled)"));
}

#[test]
fn test_effects_tilt() {
    goblin_glow()
        .args(["effects", "tilt", "--rect", "0,0,200,200", "--pointer", "150,50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("perspective(800px)"));

    goblin_glow()
        .args(["effects", "tilt", "--pointer", "10,10", "--mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_effects_ripple() {
    goblin_glow()
        .args(["effects", "ripple", "--rect", "0,0,200,48", "--click", "100,24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("200px"))
        .stdout(predicate::str::contains("@keyframes"));
}

#[test]
fn test_effects_floating_html() {
    goblin_glow()
        .args(["effects", "floating", "--width", "320", "--seed", "5", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("floating-item").count(5));
}

#[test]
fn test_effects_reveal() {
    goblin_glow()
        .args([
            "effects", "reveal", "--viewport", "1280x720", "--element", "200,300",
            "--element", "2000,400",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("scroll 0px"));
}

#[test]
fn test_completions() {
    goblin_glow()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("goblin-glow"));
}

#[test]
fn test_unknown_subcommand_fails() {
    goblin_glow()
        .arg("sparkle")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
