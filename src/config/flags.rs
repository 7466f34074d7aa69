//! Kubecolor's own command line flags.
//!
//! Flags are picked out of the kubectl argument list wherever they appear,
//! always in `--name` or `--name=value` form. Anything unrecognized is left
//! for kubectl in its original order.

use super::types::{parse_bool, Config, ConfigError, Paging};
use crate::color::ColorLevel;
use crate::theme::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--flag` or `--flag=true|false`.
    Bool,
    /// `--flag` alone uses a default value.
    OptionalValue,
    /// `--flag=value` with a non-empty value.
    RequiredValue,
}

#[derive(Debug, Clone, Copy)]
pub struct KubecolorFlag {
    pub name: &'static str,
    pub kind: FlagKind,
    pub description: &'static str,
}

pub const FLAGS: &[KubecolorFlag] = &[
    KubecolorFlag {
        name: "--plain",
        kind: FlagKind::Bool,
        description: "Disable colored output.",
    },
    KubecolorFlag {
        name: "--light-background",
        kind: FlagKind::Bool,
        description: "Switches to light theme, or dark when --light-background=false. \
                      Same as --kubecolor-theme=light or --kubecolor-theme=dark.",
    },
    KubecolorFlag {
        name: "--force-colors",
        kind: FlagKind::OptionalValue,
        description: "Overrides the automatic color support detection. \
                      Overrides the KUBECOLOR_FORCE_COLORS env var.",
    },
    KubecolorFlag {
        name: "--kubecolor-version",
        kind: FlagKind::Bool,
        description: "Print the kubecolor version and then exit.",
    },
    KubecolorFlag {
        name: "--kubecolor-stdin",
        kind: FlagKind::OptionalValue,
        description: "Read command input from stdin or file instead of executing kubectl.",
    },
    KubecolorFlag {
        name: "--kubecolor-theme",
        kind: FlagKind::RequiredValue,
        description: "Set kubecolor theme preset, e.g dark or light. \
                      Overrides the KUBECOLOR_PRESET env var.",
    },
    KubecolorFlag {
        name: "--pager",
        kind: FlagKind::RequiredValue,
        description: r#"Set kubecolor pager, e.g "less -RF" or "more". Overrides the KUBECOLOR_PAGER and PAGER env vars."#,
    },
    KubecolorFlag {
        name: "--paging",
        kind: FlagKind::OptionalValue,
        description: "Pipe kubecolor output into pager.",
    },
    KubecolorFlag {
        name: "--no-paging",
        kind: FlagKind::Bool,
        description: "Disable paging. Alias to --paging=never.",
    },
];

/// Look up a kubecolor flag by its `--name`.
pub fn find_flag(name: &str) -> Option<&'static KubecolorFlag> {
    FLAGS.iter().find(|f| f.name == name)
}

/// Apply kubecolor flags found in `args` and store the rest as
/// [`Config::args_passthrough`].
pub fn apply_flags(config: &mut Config, args: &[String]) -> Result<(), ConfigError> {
    let mut passthrough = Vec::with_capacity(args.len());

    for arg in args {
        let parsed = if arg.starts_with("--") {
            split_flag(arg)
        } else {
            None
        };
        let Some((flag, value)) = parsed else {
            passthrough.push(arg.clone());
            continue;
        };
        tracing::trace!(flag = flag.name, ?value, "kubecolor flag");

        match flag.name {
            "--plain" => {
                if bool_value(flag, value)? {
                    config.force_color = Some(ColorLevel::None);
                }
            }
            "--light-background" => {
                config.preset = if bool_value(flag, value)? {
                    Preset::Light
                } else {
                    Preset::Dark
                };
            }
            "--force-colors" => {
                config.force_color = match value {
                    None => Some(ColorLevel::Auto),
                    Some(v) => ColorLevel::parse_optional(v).map_err(|e| flag_error(flag, e))?,
                };
            }
            "--kubecolor-version" => {
                config.show_kubecolor_version = bool_value(flag, value)?;
            }
            "--kubecolor-stdin" => {
                let path = value.filter(|v| !v.is_empty()).unwrap_or("-");
                config.stdin_override = Some(path.to_string());
            }
            "--kubecolor-theme" => {
                config.preset = required_value(flag, value)?
                    .parse()
                    .map_err(|e| flag_error(flag, e))?;
            }
            "--pager" => {
                config.pager = required_value(flag, value)?.to_string();
            }
            "--paging" => {
                config.paging = value
                    .unwrap_or("")
                    .parse()
                    .map_err(|e| flag_error(flag, e))?;
            }
            "--no-paging" => {
                if bool_value(flag, value)? {
                    config.paging = Paging::Never;
                }
            }
            _ => passthrough.push(arg.clone()),
        }
    }

    config.args_passthrough = passthrough;
    Ok(())
}

fn split_flag(arg: &str) -> Option<(&'static KubecolorFlag, Option<&str>)> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    };
    find_flag(name).map(|flag| (flag, value))
}

fn bool_value(flag: &KubecolorFlag, value: Option<&str>) -> Result<bool, ConfigError> {
    match value {
        None => Ok(true),
        Some(v) => match parse_bool(v) {
            Ok(Some(b)) => Ok(b),
            _ => Err(ConfigError::Flag {
                name: flag.name.to_string(),
                message: "must be one of: true, false".to_string(),
            }),
        },
    }
}

fn required_value<'a>(flag: &KubecolorFlag, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingValue(flag.name.to_string()))
}

fn flag_error(flag: &KubecolorFlag, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Flag {
        name: flag.name.to_string(),
        message: err.to_string(),
    }
}
