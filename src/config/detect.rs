//! Terminal color support detection.

use crate::color::ColorLevel;

/// Decide the color level for this run.
///
/// `forced` is the level from `--force-colors`/`--plain` or the
/// environment; `env` reads environment variables.
pub fn detect_color_level(
    forced: Option<ColorLevel>,
    stdout_is_terminal: bool,
    env: impl Fn(&str) -> Option<String>,
) -> ColorLevel {
    let is_set = |name: &str| env(name).is_some_and(|v| !v.is_empty());

    if forced == Some(ColorLevel::None) || is_set("NO_COLOR") {
        return ColorLevel::None;
    }
    if let Some(level) = forced.filter(|l| *l != ColorLevel::Auto) {
        return level;
    }

    let insisted = forced.is_some() || is_set("FORCE_COLOR");
    if !stdout_is_terminal && !insisted {
        return ColorLevel::None;
    }

    let colorterm = env("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if colorterm == "truecolor" || colorterm == "24bit" {
        return ColorLevel::TrueColor;
    }
    let term = env("TERM").unwrap_or_default();
    if term.contains("256color") {
        ColorLevel::Palette256
    } else if term == "dumb" && !insisted {
        ColorLevel::None
    } else {
        ColorLevel::Basic
    }
}
