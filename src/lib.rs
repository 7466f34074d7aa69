//! kubecolor library
//!
//! Colorizes kubectl's output: a [`theme::Theme`] of [`color::Color`]s,
//! scanners for kubectl's text formats, and printers that pick colors per
//! subcommand. The binary wires them to a kubectl child process.

pub mod cli;
pub mod color;
pub mod command;
pub mod config;
pub mod kubectl;
pub mod printer;
pub mod scanner;
pub mod theme;
pub mod utils;

pub use color::{Color, ColorLevel, ColorSlice};
pub use config::Config;
pub use printer::Printer;
pub use theme::{Preset, Theme};

/// Version string shown by `--kubecolor-version` and `kubectl version`.
///
/// Development builds carry the git commit they were built from.
pub fn version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "unknown" => {
            format!("{} ({})", version, &sha[..sha.len().min(7)])
        }
        _ => version.to_string(),
    }
}
