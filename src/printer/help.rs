//! `--help` output and kubectl's bare usage text.
//!
//! Section headers (`Examples:`, `Options:`) get the header color, example
//! commands are highlighted like a shell, and flags in `Options:` get the
//! flag color.

use std::io::{self, Write};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::classify::value_color;
use super::{next_text_line, Printer};
use crate::color::Color;
use crate::scanner::describe::DescribeScanner;
use crate::scanner::LineSource;
use crate::theme::Theme;

/// Bracketed `[https://...]` or bare URLs.
fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\[(https?://[a-zA-Z0-9][-a-zA-Z0-9]*\.[^\]]+)\]|(https?://[a-zA-Z0-9][-a-zA-Z0-9\.@:%_\+~#=/\?]*)",
        )
        .expect("valid regex")
    })
}

fn is_quoted(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && matches!(bytes[0], b'\'' | b'"') && bytes[bytes.len() - 1] == bytes[0]
}

pub struct HelpPrinter<'a> {
    theme: &'a Theme,
    /// The previous example line ended with `\`.
    continued: bool,
}

impl<'a> HelpPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            continued: false,
        }
    }

    /// Highlights an example command. Returns `None` for lines that are not
    /// indented like a command.
    fn colorize_command(&mut self, line: &str) -> Option<String> {
        let command = line.strip_prefix("  ").filter(|c| !c.is_empty())?;
        let shell = &self.theme.shell;
        if command.starts_with('#') {
            return Some(format!("  {}", shell.comment.render(command)));
        }

        let mut buf = String::from("  ");
        for (pipe_index, pipe) in command.split(" | ").enumerate() {
            if pipe_index > 0 {
                buf.push_str(" | ");
            }
            let fields: Vec<&str> = pipe.split(' ').collect();
            let is_exec = fields.len() > 3 && fields[0] == "kubectl" && fields[1] == "exec";
            for (i, field) in fields.iter().copied().enumerate() {
                if i > 0 {
                    buf.push(' ');
                }
                if field.is_empty() {
                    continue;
                }
                let after_dashes = is_exec && i > 0 && fields[i - 1] == "--";
                if (i == 0 && !self.continued) || after_dashes {
                    buf.push_str(&shell.command.render(field));
                } else if field.starts_with('-') || (field.starts_with("[(-") && field.ends_with(']')) {
                    buf.push_str(&self.colorize_assignment(field, &shell.flag));
                } else if is_quoted(field) {
                    buf.push_str(&self.theme.data.string.render(field));
                } else {
                    buf.push_str(&self.colorize_assignment(field, &shell.arg));
                }
            }
        }
        self.continued = command.ends_with('\\');
        Some(buf)
    }

    /// `name=value` with the value classified, or the whole field in `color`.
    fn colorize_assignment(&self, field: &str, color: &Color) -> String {
        match field.split_once('=') {
            Some((name, value)) => format!(
                "{}{}",
                color.render(&format!("{}=", name)),
                value_color(value, self.theme).render(value)
            ),
            None => color.render(field),
        }
    }

    fn colorize_urls(&self, text: &str) -> String {
        let url = &self.theme.help.url;
        url_pattern()
            .replace_all(text, |caps: &Captures| match caps.get(1) {
                Some(inner) => format!("[{}]", url.render(inner.as_str())),
                None => url.render(&caps[0]),
            })
            .into_owned()
    }
}

impl Printer for HelpPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut scanner = DescribeScanner::new();
        while let Some(raw) = next_text_line(input, out)? {
            let line = scanner.scan_line(&raw);
            if raw.is_empty() {
                writeln!(out)?;
                continue;
            }
            let path = scanner.path();
            let section = path.first().unwrap_or_default();
            let help = &self.theme.help;

            if line.value.is_empty() && path.len() == 1 && raw.ends_with(':') {
                writeln!(
                    out,
                    "{}{}{}{}",
                    line.indent,
                    help.header.render(&line.key),
                    line.spacing,
                    line.trailing
                )?;
                continue;
            }

            if matches!(section, "Examples" | "Usage") {
                if let Some(colored) = self.colorize_command(&raw) {
                    writeln!(out, "{}", colored)?;
                    continue;
                }
            }

            if matches!(section, "Options" | "Flags") && path.len() == 2 {
                writeln!(
                    out,
                    "{}{}{}{}{}",
                    line.indent,
                    help.flag.render(&line.key),
                    line.spacing,
                    value_color(&line.value, self.theme).render(&line.value),
                    line.trailing
                )?;
                continue;
            }

            let text = format!("{}{}{}", line.key, line.spacing, line.value);
            let text = self.colorize_urls(&text);
            let color = if section == "Options" {
                &help.flagdesc
            } else {
                &help.text
            };
            writeln!(out, "{}{}{}", line.indent, color.render(&text), line.trailing)?;
        }
        Ok(())
    }
}
