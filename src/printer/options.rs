//! `kubectl options` output.
//!
//! ```text
//! The following options can be passed to any command:
//!
//!     --as='':
//!         Username to impersonate for the operation.
//! ```

use std::io::{self, Write};

use super::classify::value_color;
use super::{next_text_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;
use crate::utils::text::find_indent;

pub struct OptionsPrinter<'a> {
    theme: &'a Theme,
}

impl<'a> OptionsPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// `--flag='default'`, with the default value classified.
    fn colorize_flag(&self, flag: &str) -> String {
        let color = &self.theme.options.flag;
        match flag.split_once('=') {
            Some((name, default)) => {
                let inner = default.trim_matches('\'');
                let colored = if inner.len() + 2 == default.len() {
                    format!("'{}'", value_color(inner, self.theme).render(inner))
                } else {
                    value_color(default, self.theme).render(default)
                };
                format!("{}={}", color.render(name), colored)
            }
            None => color.render(flag),
        }
    }

    fn colorize_line(&self, line: &str) -> String {
        let (indent, trimmed) = line.split_at(find_indent(line));
        if !trimmed.starts_with('-') {
            return line.to_string();
        }
        if let Some((flag, desc)) = trimmed.split_once(": ") {
            return format!("{}{}: {}", indent, self.colorize_flag(flag), desc);
        }
        match trimmed.strip_suffix(':') {
            Some(flag) => format!("{}{}:", indent, self.colorize_flag(flag)),
            None => format!("{}{}", indent, self.colorize_flag(trimmed)),
        }
    }
}

impl Printer for OptionsPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut first = true;
        while let Some(line) = next_text_line(input, out)? {
            if line.is_empty() {
                writeln!(out)?;
                continue;
            }
            let colored = if first {
                first = false;
                self.theme.data.string.render(&line)
            } else {
                self.colorize_line(&line)
            };
            writeln!(out, "{}", colored)?;
        }
        Ok(())
    }
}
