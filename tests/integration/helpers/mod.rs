//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Insta filters turning SGR escapes into readable `<code>` tokens.
pub const SGR_FILTERS: [(&str, &str); 1] = [(r"\x1b\[([0-9;]*)m", "<$1>")];

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Path of a fixture, as a string for `--kubecolor-stdin=`
pub fn fixture_arg(name: &str) -> String {
    format!("--kubecolor-stdin={}", fixtures_dir().join(name).display())
}

/// A kubecolor command with a clean, predictable environment.
///
/// No config file, no PATH, and a basic terminal type.
pub fn kubecolor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kubecolor"));
    cmd.env_clear()
        .env("KUBECOLOR_CONFIG", "/nonexistent/kubecolor/color.toml")
        .env("TERM", "xterm");
    cmd
}

/// Run kubecolor and capture (stdout, stderr, exit code)
pub fn run_kubecolor(cmd: &mut Command) -> (String, String, i32) {
    let output = cmd.output().expect("Failed to execute kubecolor");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

/// Write an executable shell script standing in for kubectl.
#[cfg(unix)]
pub fn fake_kubectl(dir: &TempDir, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("kubectl");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake kubectl");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake kubectl executable");
    path
}

/// Write a config file into `dir`
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("color.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}
