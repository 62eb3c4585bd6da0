//! Integration tests for the `geobench` binary surface
//!
//! Only flags that exit before connecting to a database are exercised here.

use std::process::Command;

fn geobench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_geobench"))
}

#[test]
fn test_version_flag() {
    let output = geobench().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("geobench "), "unexpected version output: {}", stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let output = geobench().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PostGIS"));
    assert!(stdout.contains("MongoDB"));
}

#[test]
fn test_unknown_option_fails_before_connecting() {
    let output = geobench()
        .arg("--points=10")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Unknown options should be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--points"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Done."));
}
