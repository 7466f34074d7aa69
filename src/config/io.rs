//! Configuration file loading

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::FileConfig;

/// Get the config file path: `$KUBECOLOR_CONFIG`, else `~/.kube/color.toml`
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("KUBECOLOR_CONFIG").filter(|p| !p.is_empty()) {
        tracing::debug!(?path, "config path overridden by KUBECOLOR_CONFIG");
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".kube").join("color.toml"))
}

/// Load the config file, or `None` when it does not exist
pub fn load() -> Result<Option<FileConfig>> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        tracing::debug!(?path, "no config file found");
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    tracing::debug!(?path, "loaded config file");
    Ok(Some(config))
}
