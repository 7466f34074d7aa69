//! Output of imperative commands such as `delete`, `scale` or `drain`.
//!
//! Lines look like `deployment.apps/foo scaled`; the verb is colored and
//! the rest stays plain. Lines without a known verb use the fallback color.

use std::io::{self, Write};

use super::apply::DRY_RUN_SUFFIXES;
use super::{for_each_line, Printer};
use crate::color::Color;
use crate::scanner::LineSource;

pub struct VerbPrinter {
    /// Verbs following the resource, e.g. `deleted`.
    verbs: Vec<(&'static str, Color)>,
    /// Verbs starting the line, e.g. `evicting pod`.
    prefixes: Vec<(&'static str, Color)>,
    dry_run: Color,
    fallback: Color,
}

impl VerbPrinter {
    pub fn new(dry_run: Color, fallback: Color) -> Self {
        Self {
            verbs: Vec::new(),
            prefixes: Vec::new(),
            dry_run,
            fallback,
        }
    }

    pub fn verb(mut self, verb: &'static str, color: &Color) -> Self {
        self.verbs.push((verb, color.clone()));
        self
    }

    pub fn prefix(mut self, prefix: &'static str, color: &Color) -> Self {
        self.prefixes.push((prefix, color.clone()));
        self
    }

    fn colorize_verb(&self, line: &str) -> Option<String> {
        for (prefix, color) in &self.prefixes {
            if let Some(rest) = line.strip_prefix(prefix) {
                return Some(format!("{}{}", color.render(prefix), rest));
            }
        }
        for (verb, color) in &self.verbs {
            let found = line
                .rmatch_indices(verb)
                .map(|(i, _)| i)
                .find(|&i| i > 0 && line.as_bytes()[i - 1] == b' ');
            if let Some(i) = found {
                let end = i + verb.len();
                return Some(format!("{}{}{}", &line[..i], color.render(verb), &line[end..]));
            }
        }
        None
    }

    fn colorize_dry_run(&self, line: String) -> String {
        for suffix in DRY_RUN_SUFFIXES {
            if let Some(before) = line.strip_suffix(suffix) {
                return format!("{}{}", before, self.dry_run.render(suffix));
            }
        }
        line
    }
}

impl Printer for VerbPrinter {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| {
            if line.is_empty() {
                return String::new();
            }
            match self.colorize_verb(line) {
                Some(colored) => self.colorize_dry_run(colored),
                None => self.fallback.render(line),
            }
        })
    }
}
