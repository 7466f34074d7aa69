//! `kubectl logs` output, colored token by token.

use std::io::{self, Write};

use super::classify::value_color;
use super::{for_each_line, Printer};
use crate::color::Color;
use crate::scanner::logs::{tokenize_line, Severity, TokenKind};
use crate::scanner::LineSource;
use crate::theme::Theme;

pub struct LogsPrinter<'a> {
    theme: &'a Theme,
}

impl<'a> LogsPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn severity_color(&self, severity: Severity) -> &'a Color {
        let s = &self.theme.logs.severity;
        match severity {
            Severity::Trace => &s.trace,
            Severity::Debug => &s.debug,
            Severity::Info => &s.info,
            Severity::Warn => &s.warn,
            Severity::Error => &s.error,
            Severity::Fatal => &s.fatal,
            Severity::Panic => &s.panic,
        }
    }

    /// Colors one line; key colors restart at the first key of each line.
    pub fn colorize_line(&self, line: &str) -> String {
        let logs = &self.theme.logs;
        let mut keys = 0;
        let mut buf = String::with_capacity(line.len() * 2);
        for token in tokenize_line(line) {
            let text = token.text;
            let colored = match token.kind {
                TokenKind::Key => {
                    keys += 1;
                    logs.key.cycle(keys - 1).render(text)
                }
                TokenKind::Value => value_color(text, self.theme).render(text),
                TokenKind::Quote => logs.quotedstring.render(text),
                TokenKind::Date => logs.date.render(text),
                TokenKind::SourceRef => logs.sourceref.render(text),
                TokenKind::Guid => logs.guid.render(text),
                TokenKind::Severity(severity) => self.severity_color(severity).render(text),
                TokenKind::Unknown
                | TokenKind::Newline
                | TokenKind::Preformatted
                | TokenKind::Parenthases => text.to_string(),
            };
            buf.push_str(&colored);
        }
        buf
    }
}

impl Printer for LogsPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| self.colorize_line(line))
    }
}
