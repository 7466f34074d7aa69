//! Unit tests for config layering

use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use kubecolor::config::{self, Paging};
use kubecolor::{ColorLevel, Config, Preset};
use tempfile::TempDir;

use super::helpers::args;

fn vars(list: &[(&str, &str)]) -> BTreeMap<String, String> {
    list.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn config_file(contents: &str) -> (TempDir, Option<config::FileConfig>) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("color.toml");
    fs::write(&path, contents).unwrap();
    let file = config::load_file(&path).unwrap();
    (temp, file)
}

#[test]
fn config_file_settings_are_applied() {
    let (_temp, file) = config_file(
        r#"
kubectl = "oc"
preset = "light"
paging = "auto"
pager = "less -R"
obj_fresh_threshold = "1h"

[theme.table]
columns = ["red", "blue"]

[theme.data.ratio]
zero = "gray"
"#,
    );
    let config = Config::resolve_with(file, &BTreeMap::new(), &args(&["get", "pods"])).unwrap();

    assert_eq!(config.kubectl, "oc");
    assert_eq!(config.preset, Preset::Light);
    assert_eq!(config.paging, Paging::Auto);
    assert_eq!(config.pager, "less -R");
    assert_eq!(config.obj_fresh_threshold, Duration::from_secs(3600));
    assert_eq!(config.theme_overrides["table.columns"], "red / blue");
    assert_eq!(config.theme_overrides["data.ratio.zero"], "gray");

    let theme = config.theme().unwrap();
    assert_eq!(theme.table.columns.cycle(1).code(), "34");
}

#[test]
fn missing_config_file_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let file = config::load_file(&temp.path().join("color.toml")).unwrap();
    assert!(file.is_none());
}

#[test]
fn malformed_config_file_names_the_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("color.toml");
    fs::write(&path, "preset = [unterminated").unwrap();
    let err = config::load_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn unknown_config_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("color.toml");
    fs::write(&path, "colour = true\n").unwrap();
    assert!(config::load_file(&path).is_err());
}

#[test]
fn environment_overrides_config_file() {
    let (_temp, file) = config_file("preset = \"light\"\nkubectl = \"oc\"\n");
    let env = vars(&[
        ("KUBECOLOR_PRESET", "protanopia-dark"),
        ("KUBECTL_COMMAND", "kubectl-1.29"),
        ("KUBECOLOR_PAGING", "auto"),
    ]);
    let config = Config::resolve_with(file, &env, &[]).unwrap();
    assert_eq!(config.preset.name(), "protanopia-dark");
    assert_eq!(config.kubectl, "kubectl-1.29");
    assert_eq!(config.paging, Paging::Auto);
}

#[test]
fn flags_override_environment() {
    let env = vars(&[
        ("KUBECOLOR_FORCE_COLORS", "truecolor"),
        ("KUBECOLOR_PAGING", "auto"),
    ]);
    let config =
        Config::resolve_with(None, &env, &args(&["get", "--plain", "--no-paging"])).unwrap();
    assert_eq!(config.force_color, Some(ColorLevel::None));
    assert_eq!(config.paging, Paging::Never);
    assert_eq!(config.args_passthrough, args(&["get"]));
}

#[test]
fn invalid_environment_value_is_an_error() {
    let env = vars(&[("KUBECOLOR_OBJ_FRESH", "soon")]);
    let err = Config::resolve_with(None, &env, &[]).unwrap_err();
    assert!(format!("{:#}", err).contains("KUBECOLOR_OBJ_FRESH"));
}

#[test]
fn unknown_theme_key_in_file_fails_theme_build() {
    let (_temp, file) = config_file("[theme.nosuch]\nkey = \"red\"\n");
    let config = Config::resolve_with(file, &BTreeMap::new(), &[]).unwrap();
    assert!(config.theme().is_err());
}
