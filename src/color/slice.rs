//! Ordered color lists used for cyclic assignment.

use std::fmt;
use std::str::FromStr;

use super::{Color, ColorError, ColorLevel};

/// Colors picked in rotation, e.g. table columns or nesting depth of keys.
///
/// Parsed from `"<color> / <color> / ..."`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorSlice(Vec<Color>);

impl ColorSlice {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    pub fn parse(s: &str) -> Result<Self, ColorError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let colors = s
            .split('/')
            .map(|part| Color::parse(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.0.iter()
    }

    /// Color at `index`, wrapping around. Empty slices give the no-op color.
    pub fn cycle(&self, index: usize) -> Color {
        if self.0.is_empty() {
            return Color::default();
        }
        self.0[index % self.0.len()].clone()
    }

    /// Color for a key at `indent` spaces when each nesting level is
    /// `basic_indent` wide.
    pub fn for_indent(&self, indent: usize, basic_indent: usize) -> Color {
        self.cycle(indent / basic_indent.max(1))
    }

    pub fn with_level(&self, level: ColorLevel) -> Self {
        Self(self.0.iter().map(|c| c.with_level(level)).collect())
    }
}

impl From<Color> for ColorSlice {
    fn from(color: Color) -> Self {
        Self(vec![color])
    }
}

impl FromStr for ColorSlice {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{}", color)?;
        }
        Ok(())
    }
}
