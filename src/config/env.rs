//! Environment variable layer.

use std::collections::BTreeMap;

use super::types::{parse_bool, parse_threshold, Config, ConfigError};
use crate::color::ColorLevel;
use crate::theme::{keys, Preset};

const THEME_PREFIX: &str = "KUBECOLOR_THEME_";

/// Overlay `KUBECOLOR_*` variables from `vars` onto `config`.
pub fn apply_env(config: &mut Config, vars: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    let get = |name: &str| vars.get(name).map(String::as_str).unwrap_or("");

    let debug = parse_bool(get("KUBECOLOR_DEBUG")).map_err(|e| env_error("KUBECOLOR_DEBUG", e))?;
    if let Some(debug) = debug {
        config.debug = debug;
    }
    if !get("KUBECTL_COMMAND").is_empty() {
        config.kubectl = get("KUBECTL_COMMAND").to_string();
    }
    if !get("KUBECOLOR_OBJ_FRESH").is_empty() {
        config.obj_fresh_threshold = parse_threshold(get("KUBECOLOR_OBJ_FRESH"))
            .map_err(|e| env_error("KUBECOLOR_OBJ_FRESH", e))?;
    }
    if !get("KUBECOLOR_PRESET").is_empty() {
        config.preset = get("KUBECOLOR_PRESET")
            .parse::<Preset>()
            .map_err(|e| env_error("KUBECOLOR_PRESET", e))?;
    }
    if !get("KUBECOLOR_PAGER").is_empty() {
        config.pager = get("KUBECOLOR_PAGER").to_string();
    }
    if !get("KUBECOLOR_PAGING").is_empty() {
        config.paging = get("KUBECOLOR_PAGING")
            .parse()
            .map_err(|e| env_error("KUBECOLOR_PAGING", e))?;
    }

    for (name, value) in vars {
        let Some(rest) = name.strip_prefix(THEME_PREFIX) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let key = rest.to_ascii_lowercase().replace('_', ".");
        if keys::find(&key).is_none() {
            tracing::warn!(env = %name, "ignoring unknown theme key");
            continue;
        }
        config.theme_overrides.insert(key, value.clone());
    }

    // legacy switch, wins over KUBECOLOR_PRESET
    let light = parse_bool(get("KUBECOLOR_LIGHT_BACKGROUND"))
        .map_err(|e| env_error("KUBECOLOR_LIGHT_BACKGROUND", e))?;
    if let Some(light) = light {
        config.preset = if light { Preset::Light } else { Preset::Dark };
    }

    if let Some(level) = ColorLevel::parse_optional(get("KUBECOLOR_FORCE_COLORS"))
        .map_err(|e| env_error("KUBECOLOR_FORCE_COLORS", e))?
    {
        config.force_color = Some(level);
    }

    Ok(())
}

fn env_error(name: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Env {
        name: name.to_string(),
        message: err.to_string(),
    }
}
