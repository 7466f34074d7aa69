//! Configuration management for kubecolor
//!
//! Settings are layered, later layers winning:
//! built-in defaults, `~/.kube/color.toml`, `KUBECOLOR_*` environment
//! variables, then kubecolor's own flags in the argument list.

mod detect;
mod env;
mod flags;
mod io;
mod types;

pub use detect::detect_color_level;
pub use env::apply_env;
pub use flags::{apply_flags, find_flag, FlagKind, KubecolorFlag, FLAGS};
pub use types::*;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Read a config file; `None` when it does not exist.
pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
    io::load_from(path)
}

impl Config {
    /// Get the config file path (`~/.kube/color.toml` unless overridden)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Resolve all layers for `args` using the process environment.
    pub fn resolve(args: &[String]) -> Result<Self> {
        let file = io::load()?;
        let vars: BTreeMap<String, String> = std::env::vars().collect();
        Self::resolve_with(file, &vars, args)
    }

    /// Resolve from already-loaded layers.
    pub fn resolve_with(
        file: Option<FileConfig>,
        vars: &BTreeMap<String, String>,
        args: &[String],
    ) -> Result<Self> {
        let mut config = Config::default();
        if let Some(file) = file {
            config.apply_file(file)?;
        }
        apply_env(&mut config, vars)?;
        apply_flags(&mut config, args)?;
        tracing::debug!(
            preset = %config.preset,
            paging = %config.paging,
            force_color = ?config.force_color,
            "resolved config"
        );
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<()> {
        let theme = file.theme_overrides();
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(kubectl) = file.kubectl.filter(|k| !k.is_empty()) {
            self.kubectl = kubectl;
        }
        if let Some(threshold) = file.obj_fresh_threshold {
            self.obj_fresh_threshold =
                parse_threshold(&threshold).context("Invalid obj_fresh_threshold in config file")?;
        }
        if let Some(preset) = file.preset.filter(|p| !p.is_empty()) {
            self.preset = preset.parse().context("Invalid preset in config file")?;
        }
        if let Some(pager) = file.pager.filter(|p| !p.is_empty()) {
            self.pager = pager;
        }
        if let Some(paging) = file.paging {
            self.paging = paging;
        }
        self.theme_overrides.extend(theme);
        Ok(())
    }

    /// Build the theme from the preset and all theme overrides.
    pub fn theme(&self) -> Result<Theme> {
        Theme::new(self.preset, &self.theme_overrides).context("Invalid theme")
    }
}
