//! `kubectl explain` output.

use std::io::{self, Write};

use super::{next_text_line, Printer};
use crate::scanner::describe::{DescribeScanner, Line};
use crate::scanner::LineSource;
use crate::theme::Theme;

const REQUIRED_SUFFIX: &str = "-required-";

pub struct ExplainPrinter<'a> {
    theme: &'a Theme,
    recursive: bool,
}

impl<'a> ExplainPrinter<'a> {
    pub fn new(theme: &'a Theme, recursive: bool) -> Self {
        Self { theme, recursive }
    }

    fn write_line(&self, line: &Line, in_fields: bool, out: &mut dyn Write) -> io::Result<()> {
        let mut buf = String::with_capacity(line.to_string().len() + 32);
        buf.push_str(&line.indent);
        if line.key.contains([' ', '\t', '-', '.']) {
            // prose, not a field name
            buf.push_str(&line.key);
        } else if !line.key.is_empty() {
            let color = if self.recursive && in_fields {
                self.theme.explain.key.for_indent(line.key_indent, 2)
            } else {
                self.theme.explain.key.cycle(0)
            };
            match line.key.strip_suffix(':') {
                Some(key) => {
                    buf.push_str(&color.render(key));
                    buf.push(':');
                }
                None => buf.push_str(&color.render(&line.key)),
            }
        }
        buf.push_str(&line.spacing);
        match line.value.strip_suffix(REQUIRED_SUFFIX) {
            Some(before) => {
                buf.push_str(before);
                buf.push_str(&self.theme.explain.required.render(REQUIRED_SUFFIX));
            }
            None => buf.push_str(&line.value),
        }
        buf.push_str(&line.trailing);
        writeln!(out, "{}", buf)
    }
}

impl Printer for ExplainPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut scanner = DescribeScanner::new();
        while let Some(raw) = next_text_line(input, out)? {
            let line = scanner.scan_line(&raw);
            let in_fields = scanner.path().first() == Some("FIELDS");
            self.write_line(&line, in_fields, out)?;
        }
        Ok(())
    }
}
