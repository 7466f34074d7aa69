//! Test helper utilities

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use kubecolor::kubectl::{inspect_subcommand_info, PluginLookup};
use kubecolor::printer::{select_printer, DispatchOptions};
use kubecolor::scanner::{LineSource, Lines, MemoryLines};
use kubecolor::{Preset, Printer, Theme};

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

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Plugin lookup answering from a fixed list of names.
pub struct StubPlugins(pub Vec<&'static str>);

impl PluginLookup for StubPlugins {
    fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.0
            .iter()
            .find(|p| **p == name)
            .map(|p| PathBuf::from(format!("/usr/local/bin/kubectl-{}", p)))
    }
}

pub fn dark_theme() -> Theme {
    Theme::from_preset(Preset::Dark).expect("dark preset resolves")
}

pub fn theme_with(overrides: &[(&str, &str)]) -> Theme {
    let overrides: BTreeMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Theme::new(Preset::Dark, &overrides).expect("theme resolves")
}

/// Color `input` the way kubecolor would for `kubectl <args>`.
pub fn render(theme: &Theme, kubectl_args: &[&str], input: &str) -> String {
    let output = print_with(theme, kubectl_args, &mut MemoryLines::from(input));
    String::from_utf8(output).expect("utf-8 output")
}

/// Like [`render`], reading `input` as raw bytes.
pub fn render_bytes(theme: &Theme, kubectl_args: &[&str], input: &[u8]) -> Vec<u8> {
    print_with(theme, kubectl_args, &mut Lines::new(Cursor::new(input.to_vec())))
}

fn print_with(theme: &Theme, kubectl_args: &[&str], source: &mut dyn LineSource) -> Vec<u8> {
    let info = inspect_subcommand_info(&args(kubectl_args), &StubPlugins(Vec::new()));
    let options = DispatchOptions {
        kubecolor_version: "0.5.0".to_string(),
        ..Default::default()
    };
    let mut printer = select_printer(&info, theme, &options);
    let mut out = Vec::new();
    printer.print(source, &mut out).expect("print succeeds");
    out
}
