//! Terminal colors expressed as SGR escape codes.
//!
//! A [`Color`] is parsed once from a human-written spec such as
//! `"fg=#ff8800:bg=black:bold"` and keeps the resolved SGR parameter
//! string. Rendering is pure: downgrading to a lower color depth produces
//! a new `Color` via [`Color::with_level`] instead of consulting any
//! process-wide terminal state.

mod convert;
mod level;
mod parse;
mod slice;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

pub use convert::{palette_to_rgb, rgb_to_256, rgb_to_basic};
pub use level::{ColorLevel, ColorLevelError};
pub use parse::ColorError;
pub use slice::ColorSlice;

/// Escape byte that starts every SGR sequence.
pub const ESC: char = '\x1b';

/// Sequence that resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// A parsed color with its resolved SGR parameters (e.g. `"1;38;5;208"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    source: String,
    code: String,
}

impl Color {
    /// Parse a color spec. An empty spec (or `none`) yields the no-op color.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let code = parse::parse_code(s)?;
        Ok(Self {
            source: s.trim().to_string(),
            code,
        })
    }

    /// Build a color directly from SGR parameters, skipping the parser.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            source: format!("raw({})", code),
            code,
        }
    }

    /// The SGR parameters without the `ESC[` prefix and `m` suffix.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The text this color was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when rendering is a no-op.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Wrap `s` in this color, followed by a reset.
    ///
    /// When `s` already contains SGR sequences, every inner reset is
    /// followed by this color again so the outer color survives nesting.
    pub fn render(&self, s: &str) -> String {
        if self.code.is_empty() || s.is_empty() {
            return s.to_string();
        }
        if s.contains(ESC) {
            return self.render_inject(s);
        }
        format!("\x1b[{}m{}{}", self.code, s, RESET)
    }

    /// Like [`Color::render`], with the newline placed after the reset.
    pub fn renderln(&self, s: &str) -> String {
        let mut out = self.render(s);
        out.push('\n');
        out
    }

    fn render_inject(&self, s: &str) -> String {
        // Already a single fully wrapped segment.
        if s.starts_with("\x1b[") && s.ends_with(RESET) && s.matches("\x1b[").count() == 2 {
            return s.to_string();
        }
        let open = format!("\x1b[{}m", self.code);
        let injected = inner_reset_pattern().replace_all(s, |caps: &regex::Captures<'_>| {
            format!("{}{}{}", RESET, open, &caps[1])
        });
        format!("{}{}{}", open, injected, RESET)
    }

    /// Convert this color for a terminal supporting only `level`.
    pub fn with_level(&self, level: ColorLevel) -> Self {
        let code = level::downgrade_code(&self.code, level);
        if code == self.code {
            return self.clone();
        }
        Self {
            source: self.source.clone(),
            code,
        }
    }
}

fn inner_reset_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[0m([^\x1b])").expect("valid regex"))
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&self.source)
        }
    }
}
