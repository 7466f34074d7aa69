//! Color spec grammar.
//!
//! `<field>(":" <field>)*` where a field is a modifier keyword, a bare
//! color (foreground), or `fg=<spec>` / `bg=<spec>`.

use std::sync::OnceLock;

use regex::Regex;

/// Errors produced while parsing a color spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color key {0:?}")]
    InvalidKey(String),

    #[error("invalid color format: {0:?}")]
    InvalidFormat(String),

    #[error("invalid rgb color {input:?}: {reason}")]
    InvalidRgb { input: String, reason: String },

    #[error("invalid raw color code {0:?}: only digits and ';' are allowed")]
    InvalidRaw(String),

    #[error("color value must not be empty after {0:?}")]
    EmptyValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Fg,
    Bg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Spec {
    Basic(u8),
    Palette(u8),
    Rgb(u8, u8, u8),
    Raw(String),
}

impl Spec {
    fn code(&self, layer: Layer) -> String {
        let (ext, offset) = match layer {
            Layer::Fg => (38, 0),
            Layer::Bg => (48, 10),
        };
        match self {
            Spec::Basic(n) => (n + offset).to_string(),
            Spec::Palette(n) => format!("{};5;{}", ext, n),
            Spec::Rgb(r, g, b) => format!("{};2;{};{};{}", ext, r, g, b),
            Spec::Raw(raw) => raw.clone(),
        }
    }
}

/// Resolve a spec to its SGR parameter string.
pub(super) fn parse_code(s: &str) -> Result<String, ColorError> {
    let trimmed = s.trim().trim_matches(|c: char| c == ':' || c == ',');
    let mut codes: Vec<String> = Vec::new();

    for field in trimmed.split(':') {
        let field = field.trim();
        if field.is_empty() || field.eq_ignore_ascii_case("none") {
            continue;
        }
        codes.push(parse_field(field)?);
    }

    Ok(codes.join(";"))
}

fn parse_field(field: &str) -> Result<String, ColorError> {
    let Some((key, value)) = field.split_once('=') else {
        if let Some(op) = modifier_code(field) {
            return Ok(op.to_string());
        }
        if let Some(n) = named_color(field) {
            return Ok(n.to_string());
        }
        return Ok(parse_syntax(field)?.code(Layer::Fg));
    };

    let layer = match key.trim().to_ascii_lowercase().as_str() {
        "fg" => Layer::Fg,
        "bg" => Layer::Bg,
        _ => return Err(ColorError::InvalidKey(format!("{}=", key.trim()))),
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(ColorError::EmptyValue(format!("{}=", key.trim())));
    }
    if layer == Layer::Bg && value.eq_ignore_ascii_case("transparent") {
        return Ok("49".to_string());
    }
    if let Some(n) = named_color(value) {
        return Ok(Spec::Basic(n).code(layer));
    }
    Ok(parse_syntax(value)?.code(layer))
}

fn modifier_code(s: &str) -> Option<u8> {
    let code = match s.to_ascii_lowercase().as_str() {
        "reset" => 0,
        "bold" | "b" => 1,
        "fuzzy" | "faint" | "dim" => 2,
        "italic" | "i" => 3,
        "underscore" | "underscored" | "underline" | "underlined" | "u" => 4,
        "blink" => 5,
        "fastblink" => 6,
        "reverse" | "invert" | "inverted" => 7,
        "concealed" | "hidden" | "invisible" => 8,
        "strikethrough" | "strike" => 9,
        _ => return None,
    };
    Some(code)
}

/// Foreground code for a named color, after alias normalization.
fn named_color(s: &str) -> Option<u8> {
    let lower = s.to_ascii_lowercase();
    let normalized = ["hi_", "hi-", "light_", "light-"]
        .iter()
        .find_map(|prefix| {
            lower
                .strip_prefix(prefix)
                .map(|rest| format!("{}{}", prefix.trim_end_matches(['_', '-']), rest))
        })
        .unwrap_or(lower);

    let code = match normalized.as_str() {
        "black" => 30,
        "red" => 31,
        "green" => 32,
        "brown" | "yellow" => 33,
        "blue" => 34,
        "magenta" | "purple" => 35,
        "cyan" => 36,
        "white" => 37,
        "default" | "normal" => 39,
        "hiblack" | "lightblack" | "darkgray" | "gray" | "darkgrey" | "grey" => 90,
        "hired" | "lightred" => 91,
        "higreen" | "lightgreen" | "lime" => 92,
        "hibrown" | "lightbrown" | "hiyellow" | "lightyellow" | "gold" => 93,
        "hiblue" | "lightblue" => 94,
        "himagenta" | "lightmagenta" | "hipurple" | "lightpurple" => 95,
        "hicyan" | "lightcyan" => 96,
        "hiwhite" | "lightwhite" => 97,
        _ => return None,
    };
    Some(code)
}

fn hex_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:#|0x)?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex")
    })
}

fn parse_syntax(s: &str) -> Result<Spec, ColorError> {
    let lower = s.to_ascii_lowercase();

    if lower.starts_with("rgb(") {
        return parse_rgb_func(s);
    }
    if lower.starts_with("raw(") {
        return parse_raw(s);
    }
    if s.matches(',').count() == 2 {
        if let Ok((r, g, b)) = parse_rgb_triple(s) {
            return Ok(Spec::Rgb(r, g, b));
        }
    }
    if s.len() < 4 && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = s.parse::<u8>() {
            return Ok(Spec::Palette(n));
        }
    }
    if let Some(caps) = hex_pattern().captures(s) {
        return Ok(parse_hex(&caps[1]));
    }

    Err(ColorError::InvalidFormat(s.to_string()))
}

fn parse_rgb_func(s: &str) -> Result<Spec, ColorError> {
    let invalid = |reason: &str| ColorError::InvalidRgb {
        input: s.to_string(),
        reason: reason.to_string(),
    };
    let inner = s[4..]
        .strip_suffix(')')
        .ok_or_else(|| invalid("missing closing parenthesis"))?;
    if inner.trim().is_empty() {
        return Err(invalid("no values given"));
    }
    let (r, g, b) = parse_rgb_triple(inner).map_err(|reason| invalid(&reason))?;
    Ok(Spec::Rgb(r, g, b))
}

fn parse_rgb_triple(s: &str) -> Result<(u8, u8, u8), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 values, got {}", parts.len()));
    }
    let mut values = [0u8; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<u8>()
            .map_err(|_| format!("{:?} is not a number between 0 and 255", part))?;
    }
    Ok((values[0], values[1], values[2]))
}

fn parse_raw(s: &str) -> Result<Spec, ColorError> {
    let inner = s[4..]
        .strip_suffix(')')
        .map(str::trim)
        .ok_or_else(|| ColorError::InvalidRaw(s.to_string()))?;
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit() || b == b';') {
        return Err(ColorError::InvalidRaw(s.to_string()));
    }
    Ok(Spec::Raw(inner.to_string()))
}

fn parse_hex(digits: &str) -> Spec {
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).unwrap_or(0);
    Spec::Rgb(channel(0), channel(2), channel(4))
}
