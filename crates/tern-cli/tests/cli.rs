// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Runs the `ternc` binary against fixture units.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn ternc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ternc"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("TERN_LOWERING_CONFIG")
        .env_remove("TERN_LOG")
        .output()
        .expect("failed to run ternc")
}

#[test]
fn lower_prints_every_thunk() {
    let path = fixture("unit.json");
    let out = ternc(&["lower", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert!(stdout.contains("thunk $lambda$add$0(args: object[])"));
    assert!(stdout.contains("// 3:9"));
    assert!(stdout.contains(".blockedOnExtern"));
    assert!(stdout.contains("call acme/math/1/native.add(Ltern/runtime/scheduling/Strand;JZJZ)J("));

    assert!(stdout.contains("thunk $lambda$scale$1(closure0: map, args: object[])"));
    assert!(stdout.contains(
        "call acme/math/1/ops.scale(Ltern/runtime/scheduling/Strand;Ltern/runtime/values/MapValue;ZDZ)D("
    ));

    assert!(stdout.contains("new object[2]"));
    assert!(stdout.contains("\"deposit\""));

    assert!(stdout.contains("Lower OK: 3 thunks"));
}

#[test]
fn unresolved_callee_fails_the_unit() {
    let path = fixture("unresolved.json");
    let out = ternc(&["lower", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(!out.status.success());
    assert!(stderr.contains("callee could not be resolved"));
    assert!(stderr.contains("acme/missing"));
    assert!(stderr.contains("Lower FAILED"));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let out = ternc(&["lower", "does/not/exist.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read"));
}

#[test]
fn version_and_help() {
    let out = ternc(&["version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("ternc "));

    let out = ternc(&["help"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("lower <unit.json>"));

    let out = ternc(&["frobnicate"]);
    assert!(!out.status.success());
}

#[test]
fn config_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lowering.json");
    std::fs::write(&config, r#"{ "builtin_org": "acme", "builtin_modules": ["bank"] }"#).unwrap();

    // same unit, minus its inline config
    let text = std::fs::read_to_string(fixture("unit.json")).unwrap();
    let unit = text.replacen(r#""config": {},"#, "", 1);
    let path = dir.path().join("unit.json");
    std::fs::write(&path, unit).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_ternc"))
        .args(["lower", path.to_str().unwrap()])
        .env("NO_COLOR", "1")
        .env("TERN_LOWERING_CONFIG", &config)
        .output()
        .expect("failed to run ternc");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    // acme/bank is now built in: no supplied flags
    assert!(stdout.contains("new object[1]"));
}

#[test]
fn bad_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lowering.json");
    std::fs::write(&config, r#"{ "builtin_orgs": [] }"#).unwrap();
    let unit = dir.path().join("unit.json");
    std::fs::write(&unit, r#"{ "instructions": [] }"#).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_ternc"))
        .args(["lower", unit.to_str().unwrap()])
        .env("NO_COLOR", "1")
        .env("TERN_LOWERING_CONFIG", &config)
        .output()
        .expect("failed to run ternc");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid lowering config"));
}
