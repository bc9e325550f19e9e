//! CLI tests for the `generator` binary.
//!
//! Spawns the binary against a seeded scratch root and verifies exit codes
//! and the files it leaves behind.

use std::fs;
use std::process::Command;

use generator::exit_codes;
use generator::test_support::TestRoot;

fn generator() -> Command {
    Command::new(env!("CARGO_BIN_EXE_generator"))
}

#[test]
fn generate_then_check_is_up_to_date() {
    let root = TestRoot::new().expect("root");

    let status = generator()
        .arg("generate")
        .arg("--root")
        .arg(root.path())
        .status()
        .expect("generator generate");
    assert_eq!(status.code(), Some(exit_codes::OK));

    let runtime = root.path().join("OneOfUnity.Extended").join("Runtime");
    let generated = fs::read_dir(&runtime)
        .expect("read runtime dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".generated.cs"))
        .count();
    assert_eq!(generated, 46);

    let status = generator()
        .arg("check")
        .arg("--root")
        .arg(root.path())
        .status()
        .expect("generator check");
    assert_eq!(status.code(), Some(exit_codes::OK));
}

#[test]
fn check_on_empty_root_is_stale() {
    let root = TestRoot::new().expect("root");

    let output = generator()
        .current_dir(root.path())
        .arg("check")
        .output()
        .expect("generator check");

    assert_eq!(output.status.code(), Some(exit_codes::STALE));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing OneOfUnity/package.json"));
    assert!(!root.path().join("OneOfUnity").exists());
}

#[test]
fn generate_without_inputs_fails() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = generator()
        .current_dir(temp.path())
        .arg("generate")
        .output()
        .expect("generator generate");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("LICENSE.md"));
}

#[test]
fn render_prints_requested_type() {
    let output = generator()
        .args(["render", "--arity", "2", "--kind", "base"])
        .output()
        .expect("generator render");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("public class OneOfBase<T0, T1> : IOneOf"));
}

#[test]
fn render_rejects_unsupported_arity() {
    let output = generator()
        .args(["render", "--arity", "33"])
        .output()
        .expect("generator render");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("outside supported range"));
}

#[test]
fn config_overrides_version_in_manifests() {
    let root = TestRoot::new().expect("root");
    fs::write(
        root.path().join("oneof-generator.toml"),
        "version = \"2.0.0\"\n",
    )
    .expect("write config");

    let output = generator()
        .current_dir(root.path())
        .args(["manifest", "--tier", "extended"])
        .output()
        .expect("generator manifest");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let manifest: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("manifest json");
    assert_eq!(manifest["version"], "2.0.0");
    assert_eq!(manifest["dependencies"]["com.simplycods.oneofunity"], "2.0.0");
}

#[test]
fn init_config_refuses_overwrite_without_force() {
    let root = TestRoot::new().expect("root");

    let first = generator()
        .current_dir(root.path())
        .arg("init-config")
        .status()
        .expect("init-config");
    assert_eq!(first.code(), Some(exit_codes::OK));
    assert!(root.path().join("oneof-generator.toml").is_file());

    let second = generator()
        .current_dir(root.path())
        .arg("init-config")
        .status()
        .expect("init-config");
    assert_eq!(second.code(), Some(exit_codes::INVALID));

    let forced = generator()
        .current_dir(root.path())
        .args(["init-config", "--force"])
        .status()
        .expect("init-config --force");
    assert_eq!(forced.code(), Some(exit_codes::OK));
}
