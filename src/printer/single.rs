//! Printers that color whole lines.

use std::io::{self, Write};

use super::{for_each_line, Printer};
use crate::color::Color;
use crate::scanner::LineSource;

/// Every line in one color.
pub struct SingleColorPrinter {
    color: Color,
}

impl SingleColorPrinter {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Printer for SingleColorPrinter {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| self.color.render(line))
    }
}

/// Each line in the color picked for it by a function.
pub struct FuncPrinter<F> {
    pick: F,
}

impl<F: FnMut(&str) -> Color> FuncPrinter<F> {
    pub fn new(pick: F) -> Self {
        Self { pick }
    }
}

impl<F: FnMut(&str) -> Color> Printer for FuncPrinter<F> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let pick = &mut self.pick;
        for_each_line(input, out, |line| pick(line).render(line))
    }
}
