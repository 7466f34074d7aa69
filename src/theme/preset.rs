//! Built-in theme presets.
//!
//! A preset only sets the handful of keys it cares about; everything else
//! is filled in through the fallback chains in [`super::keys`].

use std::fmt;
use std::str::FromStr;

use super::ThemeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    #[default]
    Dark,
    Light,
    Pre030Dark,
    Pre030Light,
    Pre0021Dark,
    Pre0021Light,
    ProtanopiaDark,
    ProtanopiaLight,
    DeuteranopiaDark,
    DeuteranopiaLight,
    TritanopiaDark,
    TritanopiaLight,
}

impl Preset {
    pub const ALL: [Preset; 12] = [
        Preset::Dark,
        Preset::Light,
        Preset::Pre030Dark,
        Preset::Pre030Light,
        Preset::Pre0021Dark,
        Preset::Pre0021Light,
        Preset::ProtanopiaDark,
        Preset::ProtanopiaLight,
        Preset::DeuteranopiaDark,
        Preset::DeuteranopiaLight,
        Preset::TritanopiaDark,
        Preset::TritanopiaLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Dark => "dark",
            Preset::Light => "light",
            Preset::Pre030Dark => "pre-0.3.0-dark",
            Preset::Pre030Light => "pre-0.3.0-light",
            Preset::Pre0021Dark => "pre-0.0.21-dark",
            Preset::Pre0021Light => "pre-0.0.21-light",
            Preset::ProtanopiaDark => "protanopia-dark",
            Preset::ProtanopiaLight => "protanopia-light",
            Preset::DeuteranopiaDark => "deuteranopia-dark",
            Preset::DeuteranopiaLight => "deuteranopia-light",
            Preset::TritanopiaDark => "tritanopia-dark",
            Preset::TritanopiaLight => "tritanopia-light",
        }
    }

    /// Raw `(key, value)` pairs this preset sets.
    pub fn values(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Preset::Dark => dark(),
            Preset::Light => light(),
            Preset::Pre030Dark => pre_030(true),
            Preset::Pre030Light => pre_030(false),
            Preset::Pre0021Dark => pre_0021_dark(),
            Preset::Pre0021Light => pre_0021_light(),
            Preset::ProtanopiaDark => colorblind(true, "#2ee5ae:italic"),
            Preset::ProtanopiaLight => colorblind(false, "#2ee5ae:italic"),
            Preset::DeuteranopiaDark => colorblind(true, "#2ee5ae"),
            Preset::DeuteranopiaLight => colorblind(false, "#2ee5ae:italic"),
            Preset::TritanopiaDark => colorblind(true, "#2ee5ae"),
            Preset::TritanopiaLight => colorblind(false, "#2ee5ae:italic"),
        }
    }
}

impl FromStr for Preset {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ThemeError::InvalidPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn dark() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "green"),
        ("base.key", "hicyan / cyan"),
        ("base.info", "white"),
        ("base.primary", "magenta"),
        ("base.secondary", "cyan"),
        ("base.success", "green"),
        ("base.warning", "yellow"),
        ("base.danger", "red"),
        ("base.muted", "gray:italic"),
        ("table.header", "bold"),
        ("data.string", "hiyellow"),
    ]
}

fn light() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "green"),
        ("base.key", "hiblue / blue"),
        ("base.info", "black"),
        ("base.primary", "magenta"),
        ("base.secondary", "blue"),
        ("base.success", "green"),
        ("base.warning", "yellow"),
        ("base.danger", "red"),
        ("base.muted", "gray:italic"),
        ("table.header", "bold"),
        ("data.string", "yellow"),
    ]
}

/// Palette tuned for red/green/blue color blindness.
fn colorblind(dark: bool, muted: &'static str) -> Vec<(&'static str, &'static str)> {
    let (fg, danger, header, columns) = if dark {
        (
            "white",
            "fg=white:bg=#c2270a",
            "white:bold",
            "#2aabee / #6afd6a:bold / #4860e6 / white / #feb927",
        )
    } else {
        (
            "black",
            "fg=black:bg=#c2270a",
            "black:bold",
            "#2aabee / #6afd6a:bold / #4860e6 / black / #feb927",
        )
    };
    vec![
        ("default", fg),
        ("base.key", "#feb927 / #fe6e1a"),
        ("base.info", fg),
        ("base.primary", "#4860e6"),
        ("base.secondary", "#2aabee"),
        ("base.success", "#6afd6a:bold"),
        ("base.warning", "#feb927:italic"),
        ("base.danger", danger),
        ("base.muted", muted),
        ("data.string", "#2aabee"),
        ("table.header", header),
        ("table.columns", columns),
    ]
}

fn pre_030(dark: bool) -> Vec<(&'static str, &'static str)> {
    let (key, info, secondary) = if dark {
        ("yellow / white", "white", "cyan")
    } else {
        ("yellow / black", "black", "blue")
    };
    vec![
        ("default", "green"),
        ("base.key", key),
        ("base.info", info),
        ("base.primary", "magenta"),
        ("base.secondary", secondary),
        ("base.success", "green"),
        ("base.warning", "yellow"),
        ("base.danger", "red"),
        ("base.muted", "yellow"),
        ("options.flag", "yellow"),
    ]
}

fn pre_0021_dark() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "green"),
        ("base.key", "yellow / white"),
        ("base.info", "white"),
        ("base.primary", "magenta"),
        ("base.secondary", "cyan"),
        ("base.success", "green"),
        ("base.warning", "yellow"),
        ("base.danger", "red"),
        ("base.muted", "yellow"),
        ("data.string", "cyan"),
        ("table.columns", "cyan / green / magenta / white / yellow"),
        ("status.success", "none"),
        ("options.flag", "yellow"),
    ]
}

fn pre_0021_light() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "green"),
        ("base.key", "yellow / black"),
        ("base.info", "white"),
        ("base.primary", "magenta"),
        ("base.secondary", "cyan"),
        ("base.success", "green"),
        ("base.warning", "yellow"),
        ("base.danger", "red"),
        ("base.muted", "yellow"),
        ("data.string", "blue"),
        ("table.columns", "cyan / green / magenta / black / yellow / blue"),
        ("status.success", "none"),
        ("options.flag", "yellow"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Dark ".parse::<Preset>().unwrap(), Preset::Dark);
        assert_eq!(
            "PRE-0.0.21-light".parse::<Preset>().unwrap(),
            Preset::Pre0021Light
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "solarized".parse::<Preset>().unwrap_err();
        assert_eq!(err.to_string(), "invalid theme preset: \"solarized\"");
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }
}
