//! Unit tests for theme resolution

use std::collections::BTreeMap;

use kubecolor::theme::{KeyKind, ResolvedValues, KEYS};
use kubecolor::{Color, ColorLevel, ColorSlice, Preset, Theme};

use super::helpers::{dark_theme, theme_with};

#[test]
fn every_key_parses_in_every_preset() {
    for preset in Preset::ALL {
        let values = ResolvedValues::resolve(preset, &BTreeMap::new()).unwrap();
        for key in KEYS {
            let raw = values.get(key.name).unwrap_or_default();
            let parsed = match key.kind {
                KeyKind::Color => Color::parse(raw).map(|_| ()),
                KeyKind::Slice => ColorSlice::parse(raw).map(|_| ()),
            };
            assert!(parsed.is_ok(), "{} in {}: {:?}", key.name, preset, raw);
        }
    }
}

#[test]
fn fallback_keys_exist() {
    for key in KEYS {
        for fallback in key.fallback {
            assert!(
                KEYS.iter().any(|k| k.name == *fallback),
                "{} falls back to unknown {}",
                key.name,
                fallback
            );
        }
    }
}

#[test]
fn base_override_reaches_every_dependent() {
    let theme = theme_with(&[("base.warning", "hired")]);
    assert_eq!(theme.status.warning.code(), "91");
    assert_eq!(theme.data.ratio.unequal.code(), "91");
    assert_eq!(theme.apply.configured.code(), "91");
}

#[test]
fn specific_override_wins_over_base() {
    let theme = theme_with(&[("base.success", "blue"), ("apply.created", "magenta")]);
    assert_eq!(theme.apply.created.code(), "35");
    assert_eq!(theme.status.success.code(), "34");
}

#[test]
fn table_columns_fall_back_to_info_and_secondary() {
    let theme = theme_with(&[("base.info", "red"), ("base.secondary", "blue")]);
    assert_eq!(theme.table.columns.to_string(), "red / blue");
}

#[test]
fn basic_level_downgrades_hex_colors() {
    let theme = theme_with(&[("base.danger", "#ff0000")]).with_level(ColorLevel::Basic);
    let code = theme.status.error.code().to_string();
    assert!(!code.contains("38;"), "got {}", code);
    assert!(!code.is_empty());
}

#[test]
fn light_preset_differs_from_dark() {
    let light = Theme::from_preset(Preset::Light).unwrap();
    assert_ne!(light.table.columns, dark_theme().table.columns);
    assert_eq!(light.status.success, dark_theme().status.success);
}
