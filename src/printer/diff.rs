//! `kubectl diff` output.

use std::io::{self, Write};

use super::{for_each_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;

pub struct DiffPrinter<'a> {
    theme: &'a Theme,
}

impl<'a> DiffPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

/// `+x` but not `+++`, likewise for `-`.
fn is_change(line: &str, marker: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(marker) && chars.next().is_some_and(|c| c != marker)
}

impl Printer for DiffPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let diff = &self.theme.diff;
        for_each_line(input, out, |line| {
            if is_change(line, '+') {
                diff.added.render(line)
            } else if is_change(line, '-') {
                diff.removed.render(line)
            } else {
                diff.unchanged.render(line)
            }
        })
    }
}
