//! Terminal color capability levels and code downgrading.

use std::fmt;
use std::str::FromStr;

use super::convert::{palette_to_rgb, rgb_to_256, rgb_to_basic};

/// How many colors the output terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorLevel {
    /// No colors at all.
    None,
    /// Decide from the environment at startup.
    #[default]
    Auto,
    /// 16 basic ANSI colors.
    Basic,
    /// xterm 256-color palette.
    Palette256,
    /// 24-bit RGB.
    TrueColor,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color level: {0:?}, must be one of: none, auto, basic, 256, truecolor")]
pub struct ColorLevelError(pub String);

impl ColorLevel {
    /// Parse a level, where an empty string (or legacy `false`) means unset.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ColorLevelError> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" => return Ok(None),
            "true" | "auto" => ColorLevel::Auto,
            "none" => ColorLevel::None,
            "basic" | "3bit" | "3-bit" | "4bit" | "4-bit" => ColorLevel::Basic,
            "256" | "8bit" | "8-bit" => ColorLevel::Palette256,
            "truecolor" | "true-color" | "24bit" | "24-bit" => ColorLevel::TrueColor,
            _ => return Err(ColorLevelError(s.to_string())),
        };
        Ok(Some(level))
    }
}

impl FromStr for ColorLevel {
    type Err = ColorLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_optional(s)?.ok_or_else(|| ColorLevelError(s.to_string()))
    }
}

impl fmt::Display for ColorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorLevel::None => "none",
            ColorLevel::Auto => "auto",
            ColorLevel::Basic => "basic",
            ColorLevel::Palette256 => "256",
            ColorLevel::TrueColor => "truecolor",
        };
        f.write_str(name)
    }
}

/// Rewrite extended-color parameters in `code` so they fit `level`.
pub(super) fn downgrade_code(code: &str, level: ColorLevel) -> String {
    match level {
        ColorLevel::None => return String::new(),
        ColorLevel::Auto | ColorLevel::TrueColor => return code.to_string(),
        ColorLevel::Basic | ColorLevel::Palette256 => {}
    }
    if code.is_empty() {
        return String::new();
    }

    let params: Vec<&str> = code.split(';').collect();
    let mut out: Vec<String> = Vec::with_capacity(params.len());
    let mut i = 0;
    while i < params.len() {
        let p = params[i];
        let background = p == "48";
        if (p == "38" || background) && i + 1 < params.len() {
            let num = |j: usize| params.get(j).and_then(|v| v.parse::<u8>().ok());
            match params[i + 1] {
                "2" => {
                    if let (Some(r), Some(g), Some(b)) = (num(i + 2), num(i + 3), num(i + 4)) {
                        out.push(match level {
                            ColorLevel::Palette256 => {
                                format!("{};5;{}", p, rgb_to_256(r, g, b))
                            }
                            _ => rgb_to_basic(r, g, b, background).to_string(),
                        });
                        i += 5;
                        continue;
                    }
                }
                "5" => {
                    if let Some(n) = num(i + 2) {
                        out.push(match level {
                            ColorLevel::Palette256 => format!("{};5;{}", p, n),
                            _ => {
                                let (r, g, b) = palette_to_rgb(n);
                                rgb_to_basic(r, g, b, background).to_string()
                            }
                        });
                        i += 3;
                        continue;
                    }
                }
                _ => {}
            }
        }
        out.push(p.to_string());
        i += 1;
    }
    out.join(";")
}
