//! `kubectl version` output, with kubecolor's own version added.

use std::io::{self, Write};
use std::sync::OnceLock;

use regex::Regex;

use super::classify::value_color;
use super::json::JsonPrinter;
use super::yaml::YamlPrinter;
use super::{next_text_line, Printer};
use crate::kubectl::OutputFormat;
use crate::scanner::{LineSource, MemoryLines};
use crate::theme::Theme;

const VERSION_KEY: &str = "Kubecolor Version";
const VERSION_FIELD: &str = "kubecolorVersion";

/// `version.Info{Major:"1", Minor:"19"}`
fn go_struct() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([\w.]+)\{(.*)\}$").expect("valid regex"))
}

/// Plain `key: value` lines.
pub struct VersionPrinter<'a> {
    theme: &'a Theme,
    kubecolor_version: String,
}

impl<'a> VersionPrinter<'a> {
    pub fn new(theme: &'a Theme, kubecolor_version: impl Into<String>) -> Self {
        Self {
            theme,
            kubecolor_version: kubecolor_version.into(),
        }
    }

    fn colorize_pair(&self, key: &str, value: &str) -> String {
        let key_color = self.theme.version.key.cycle(0);
        let value = match go_struct().captures(value) {
            Some(caps) => {
                let name = caps.get(1).map_or("", |m| m.as_str());
                let fields = caps.get(2).map_or("", |m| m.as_str());
                format!("{}{{{}}}", name, self.colorize_fields(fields))
            }
            None => value_color(value, self.theme).render(value),
        };
        format!("{}: {}", key_color.render(key), value)
    }

    /// `Major:"1", GitVersion:"v1.19.2"`
    fn colorize_fields(&self, fields: &str) -> String {
        let key_color = self.theme.version.key.cycle(1);
        fields
            .split(", ")
            .map(|field| match field.split_once(':') {
                Some((k, v)) => {
                    let (inner, quoted) = match v.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                        Some(inner) => (inner, true),
                        None => (v, false),
                    };
                    let colored = value_color(inner, self.theme).render(inner);
                    if quoted {
                        format!("{}:\"{}\"", key_color.render(k), colored)
                    } else {
                        format!("{}:{}", key_color.render(k), colored)
                    }
                }
                None => field.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Printer for VersionPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut any = false;
        while let Some(line) = next_text_line(input, out)? {
            match line.split_once(": ") {
                Some((key, value)) => {
                    writeln!(out, "{}", self.colorize_pair(key, value))?;
                    any = true;
                }
                None => writeln!(out, "{}", line)?,
            }
        }
        if any {
            writeln!(out, "{}", self.colorize_pair(VERSION_KEY, &self.kubecolor_version))?;
        }
        Ok(())
    }
}

/// `kubectl version -o json|yaml`, with a `kubecolorVersion` field added.
pub struct VersionInjectPrinter<'a> {
    theme: &'a Theme,
    format: OutputFormat,
    kubecolor_version: String,
}

impl<'a> VersionInjectPrinter<'a> {
    pub fn new(theme: &'a Theme, format: OutputFormat, kubecolor_version: impl Into<String>) -> Self {
        Self {
            theme,
            format,
            kubecolor_version: kubecolor_version.into(),
        }
    }

    fn inject_json(&self, text: &str) -> Option<String> {
        let mut value: serde_json::Value = serde_json::from_str(text).ok()?;
        value.as_object_mut()?.insert(
            VERSION_FIELD.to_string(),
            serde_json::Value::String(self.kubecolor_version.clone()),
        );
        serde_json::to_string_pretty(&value).ok()
    }

    fn inject_yaml(&self, text: &str) -> String {
        let mut text = text.to_string();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!("{}: {}\n", VERSION_FIELD, self.kubecolor_version));
        text
    }
}

impl Printer for VersionInjectPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut buf = Vec::new();
        while let Some(line) = input.next_line()? {
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        let text = match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => return out.write_all(err.as_bytes()),
        };

        match self.format {
            OutputFormat::Json => match self.inject_json(&text) {
                Some(injected) => {
                    JsonPrinter::new(self.theme).print(&mut MemoryLines::from(injected.as_str()), out)
                }
                None => {
                    tracing::debug!("version output is not a JSON object, printing as is");
                    out.write_all(text.as_bytes())
                }
            },
            OutputFormat::Yaml if !text.trim().is_empty() => {
                let injected = self.inject_yaml(&text);
                YamlPrinter::new(self.theme).print(&mut MemoryLines::from(injected.as_str()), out)
            }
            _ => out.write_all(text.as_bytes()),
        }
    }
}
