//! Configuration type definitions and defaults

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::ColorLevel;
use crate::kubectl::find_executable;
use crate::theme::Preset;

/// Errors from parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(r#"must be either "true" or "false""#)]
    InvalidBool,

    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    #[error("parse env {name}: {message}")]
    Env { name: String, message: String },

    #[error("flag {name}: {message}")]
    Flag { name: String, message: String },

    #[error("flag {0} requires a value")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid paging mode: {0:?}")]
pub struct PagingError(pub String);

/// Whether colorized stdout is piped through a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paging {
    Auto,
    #[default]
    Never,
}

impl FromStr for Paging {
    type Err = PagingError;

    /// An empty value means `auto`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Paging::Auto),
            "never" => Ok(Paging::Never),
            _ => Err(PagingError(s.to_string())),
        }
    }
}

impl fmt::Display for Paging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paging::Auto => f.write_str("auto"),
            Paging::Never => f.write_str("never"),
        }
    }
}

/// Contents of `~/.kube/color.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub debug: Option<bool>,
    pub kubectl: Option<String>,
    /// Human duration such as `"5m"`.
    pub obj_fresh_threshold: Option<String>,
    pub preset: Option<String>,
    pub pager: Option<String>,
    pub paging: Option<Paging>,
    #[serde(default)]
    pub theme: toml::Table,
}

impl FileConfig {
    /// Flatten the nested `[theme]` tables into dotted keys.
    ///
    /// Arrays become color slices (`["red", "blue"]` is `"red / blue"`).
    pub fn theme_overrides(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        flatten_table("", &self.theme, &mut out);
        out
    }
}

fn flatten_table(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            toml::Value::Table(inner) => flatten_table(&key, inner, out),
            toml::Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(value_to_string).collect();
                out.insert(key, joined.join(" / "));
            }
            other => {
                out.insert(key, value_to_string(other));
            }
        }
    }
}

fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fully resolved settings for one kubecolor invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub debug: bool,
    /// kubectl executable to run.
    pub kubectl: String,
    /// Ages below this are colored as fresh. Zero disables it.
    pub obj_fresh_threshold: Duration,
    pub preset: Preset,
    pub pager: String,
    pub paging: Paging,
    /// Dotted theme keys to values, from the file and environment.
    pub theme_overrides: BTreeMap<String, String>,
    /// `None` means the color level was never set.
    pub force_color: Option<ColorLevel>,
    pub show_kubecolor_version: bool,
    /// File to read instead of running kubectl; `-` is stdin.
    pub stdin_override: Option<String>,
    /// Arguments left for kubectl after kubecolor flags are removed.
    pub args_passthrough: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            kubectl: default_kubectl(),
            obj_fresh_threshold: Duration::ZERO,
            preset: Preset::default(),
            pager: default_pager(),
            paging: Paging::default(),
            theme_overrides: BTreeMap::new(),
            force_color: None,
            show_kubecolor_version: false,
            stdin_override: None,
            args_passthrough: Vec::new(),
        }
    }
}

pub fn default_kubectl() -> String {
    "kubectl".to_string()
}

/// `$PAGER`, else `less -RF` or `more` when found on `PATH`.
pub fn default_pager() -> String {
    if let Ok(pager) = std::env::var("PAGER") {
        if !pager.is_empty() {
            return pager;
        }
    }
    if find_executable("less").is_some() {
        "less -RF".to_string()
    } else if find_executable("more").is_some() {
        "more".to_string()
    } else {
        String::new()
    }
}

/// Booleans accept only `true` and `false`; empty means unset.
pub fn parse_bool(value: &str) -> Result<Option<bool>, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool),
    }
}

/// `"0"` and `""` disable the threshold; anything else is a kubectl age.
pub fn parse_threshold(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    if value.is_empty() || value == "0" {
        return Ok(Duration::ZERO);
    }
    crate::utils::text::parse_human_duration(value)
        .ok_or_else(|| ConfigError::InvalidDuration(value.to_string()))
}
