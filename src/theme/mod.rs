//! Color themes for kubectl output.
//!
//! A [`Theme`] is resolved in three steps:
//! - start from the raw values of a [`Preset`]
//! - overlay user values (config file, environment)
//! - fill every unset key from its fallback chain (see [`keys::KEYS`])
//!
//! The result is immutable; [`Theme::with_level`] returns a downgraded copy
//! for terminals with fewer colors.

pub mod keys;
mod preset;

use std::collections::BTreeMap;

use crate::color::{Color, ColorError, ColorLevel, ColorSlice};

pub use keys::{KeyKind, ThemeKey, KEYS};
pub use preset::Preset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme preset: {0:?}")]
    InvalidPreset(String),

    #[error("unknown theme key {0:?}")]
    UnknownKey(String),

    #[error("theme key {key:?}: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: ColorError,
    },
}

/// Raw theme values after fallback resolution, keyed by dotted name.
#[derive(Debug, Clone, Default)]
pub struct ResolvedValues(BTreeMap<&'static str, String>);

impl ResolvedValues {
    /// Resolve `overrides` on top of `preset`.
    ///
    /// Override keys are dotted theme keys; an optional `theme.` prefix is
    /// accepted.
    pub fn resolve(
        preset: Preset,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, ThemeError> {
        let mut raw: BTreeMap<&'static str, String> = BTreeMap::new();
        for (name, value) in preset.values() {
            raw.insert(name, value.to_string());
        }
        for (name, value) in overrides {
            let normalized = name.trim().to_ascii_lowercase();
            let normalized = normalized.strip_prefix("theme.").unwrap_or(&normalized);
            let key =
                keys::find(normalized).ok_or_else(|| ThemeError::UnknownKey(name.clone()))?;
            raw.insert(key.name, value.clone());
        }

        for key in KEYS {
            let unset = raw.get(key.name).map_or(true, |v| v.trim().is_empty());
            if !unset || key.fallback.is_empty() {
                continue;
            }
            let inherited: Vec<&str> = key
                .fallback
                .iter()
                .filter_map(|f| raw.get(f).map(String::as_str))
                .filter(|v| !v.trim().is_empty())
                .collect();
            if !inherited.is_empty() {
                let value = inherited.join(" / ");
                raw.insert(key.name, value);
            }
        }

        Ok(Self(raw))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn color(&self, key: &str) -> Result<Color, ThemeError> {
        Color::parse(self.get(key).unwrap_or_default()).map_err(|source| {
            ThemeError::InvalidValue {
                key: key.to_string(),
                source,
            }
        })
    }

    fn slice(&self, key: &str) -> Result<ColorSlice, ThemeError> {
        ColorSlice::parse(self.get(key).unwrap_or_default()).map_err(|source| {
            ThemeError::InvalidValue {
                key: key.to_string(),
                source,
            }
        })
    }
}

/// Something that can be read out of resolved theme values.
trait ThemeValue: Sized {
    fn resolve(values: &ResolvedValues, key: &str) -> Result<Self, ThemeError>;
    fn with_level(&self, level: ColorLevel) -> Self;
}

impl ThemeValue for Color {
    fn resolve(values: &ResolvedValues, key: &str) -> Result<Self, ThemeError> {
        values.color(key)
    }

    fn with_level(&self, level: ColorLevel) -> Self {
        Color::with_level(self, level)
    }
}

impl ThemeValue for ColorSlice {
    fn resolve(values: &ResolvedValues, key: &str) -> Result<Self, ThemeError> {
        values.slice(key)
    }

    fn with_level(&self, level: ColorLevel) -> Self {
        ColorSlice::with_level(self, level)
    }
}

fn join_key(prefix: &str, field: &str) -> String {
    let field = field.trim_start_matches("r#");
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Declares a theme group whose field names are the last segment of the
/// theme key.
macro_rules! theme_group {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl ThemeValue for $name {
            fn resolve(values: &ResolvedValues, key: &str) -> Result<Self, ThemeError> {
                Ok(Self {
                    $( $field: ThemeValue::resolve(values, &join_key(key, stringify!($field)))?, )*
                })
            }

            fn with_level(&self, level: ColorLevel) -> Self {
                Self {
                    $( $field: ThemeValue::with_level(&self.$field, level), )*
                }
            }
        }
    };
}

theme_group!(
    /// The fully resolved color theme.
    Theme {
        /// Used when no printer matches the command.
        default: Color,
        base: ThemeBase,
        shell: ThemeShell,
        data: ThemeData,
        status: ThemeStatus,
        table: ThemeTable,
        stderr: ThemeStderr,
        describe: ThemeKeyed,
        apply: ThemeApply,
        create: ThemeCreate,
        delete: ThemeDelete,
        expose: ThemeExpose,
        scale: ThemeScale,
        rollout: ThemeRollout,
        patch: ThemePatch,
        uncordon: ThemeUncordon,
        drain: ThemeDrain,
        explain: ThemeExplain,
        diff: ThemeDiff,
        options: ThemeOptions,
        version: ThemeKeyed,
        help: ThemeHelp,
        logs: ThemeLogs,
    }
);

theme_group!(ThemeBase {
    key: ColorSlice,
    info: Color,
    primary: Color,
    secondary: Color,
    success: Color,
    warning: Color,
    danger: Color,
    muted: Color,
});

theme_group!(ThemeShell {
    comment: Color,
    command: Color,
    arg: Color,
    flag: Color,
});

theme_group!(ThemeData {
    key: ColorSlice,
    string: Color,
    r#true: Color,
    r#false: Color,
    number: Color,
    null: Color,
    quantity: Color,
    duration: Color,
    durationfresh: Color,
    ratio: ThemeRatio,
});

theme_group!(ThemeRatio {
    zero: Color,
    equal: Color,
    unequal: Color,
});

theme_group!(ThemeStatus {
    success: Color,
    warning: Color,
    error: Color,
});

theme_group!(ThemeTable {
    header: Color,
    columns: ColorSlice,
});

theme_group!(ThemeStderr {
    error: Color,
    nonefound: Color,
    nonefoundnamespace: Color,
});

theme_group!(
    /// Groups that only carry a key palette (describe, version).
    ThemeKeyed { key: ColorSlice }
);

theme_group!(ThemeApply {
    created: Color,
    configured: Color,
    unchanged: Color,
    serverside: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeCreate {
    created: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeDelete {
    deleted: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeExpose {
    exposed: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeScale {
    scaled: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeRollout {
    rolledback: Color,
    paused: Color,
    resumed: Color,
    restarted: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemePatch {
    patched: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeUncordon {
    uncordoned: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeDrain {
    cordoned: Color,
    evictingpod: Color,
    evicted: Color,
    drained: Color,
    dryrun: Color,
    fallback: Color,
});

theme_group!(ThemeExplain {
    key: ColorSlice,
    required: Color,
});

theme_group!(ThemeDiff {
    added: Color,
    removed: Color,
    unchanged: Color,
});

theme_group!(ThemeOptions { flag: Color });

theme_group!(ThemeHelp {
    header: Color,
    flag: Color,
    flagdesc: Color,
    url: Color,
    text: Color,
});

theme_group!(ThemeLogs {
    key: ColorSlice,
    quotedstring: Color,
    date: Color,
    sourceref: Color,
    guid: Color,
    severity: ThemeSeverity,
});

theme_group!(ThemeSeverity {
    trace: Color,
    debug: Color,
    info: Color,
    warn: Color,
    error: Color,
    fatal: Color,
    panic: Color,
});

impl Theme {
    /// Build a theme from a preset plus user overrides.
    pub fn new(preset: Preset, overrides: &BTreeMap<String, String>) -> Result<Self, ThemeError> {
        let values = ResolvedValues::resolve(preset, overrides)?;
        <Self as ThemeValue>::resolve(&values, "")
    }

    pub fn from_preset(preset: Preset) -> Result<Self, ThemeError> {
        Self::new(preset, &BTreeMap::new())
    }

    /// Copy of this theme with every color converted for `level`.
    pub fn with_level(&self, level: ColorLevel) -> Self {
        <Self as ThemeValue>::with_level(self, level)
    }
}
