//! kubectl's stderr.

use std::io::{self, Write};

use super::logs::LogsPrinter;
use super::{for_each_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;

const NONE_FOUND: &str = "No resources found";

pub struct StderrPrinter<'a> {
    theme: &'a Theme,
    logs: LogsPrinter<'a>,
}

impl<'a> StderrPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            logs: LogsPrinter::new(theme),
        }
    }

    fn colorize_line(&self, line: &str) -> String {
        let stderr = &self.theme.stderr;
        let starts_with_error = line
            .get(..5)
            .is_some_and(|p| p.eq_ignore_ascii_case("error"));
        if starts_with_error {
            return stderr.error.render(line);
        }

        if let Some(after) = line.strip_prefix(NONE_FOUND) {
            if after.is_empty() || after == "." {
                return stderr.nonefound.render(line);
            }
            let namespace = after
                .strip_prefix(" in ")
                .and_then(|s| s.strip_suffix(" namespace."));
            if let Some(ns) = namespace {
                return format!(
                    "{}{}{}",
                    stderr.nonefound.render(&format!("{} in ", NONE_FOUND)),
                    stderr.nonefoundnamespace.render(ns),
                    stderr.nonefound.render(" namespace."),
                );
            }
        }

        self.logs.colorize_line(line)
    }
}

impl Printer for StderrPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| self.colorize_line(line))
    }
}
