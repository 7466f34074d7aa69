//! `kubectl auth` output.

use std::io::{self, Write};

use super::table::TablePrinter;
use super::{for_each_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;

pub struct AuthPrinter<'a> {
    theme: &'a Theme,
    /// Arguments after `auth`, e.g. `["can-i", "get", "pods"]`.
    args: Vec<String>,
    list: bool,
}

impl<'a> AuthPrinter<'a> {
    pub fn new(theme: &'a Theme, args: Vec<String>, list: bool) -> Self {
        Self { theme, args, list }
    }
}

impl Printer for AuthPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        if self.args.first().map(String::as_str) != Some("can-i") {
            return for_each_line(input, out, str::to_string);
        }
        if self.list {
            return TablePrinter::new(self.theme, true).print(input, out);
        }
        let base = &self.theme.base;
        for_each_line(input, out, |line| match line {
            "yes" => base.success.render(line),
            "no" => base.warning.render(line),
            _ => line.to_string(),
        })
    }
}
