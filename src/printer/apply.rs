//! `kubectl apply` output: `<resource> <action> [(dry run)]`.

use std::io::{self, Write};

use super::{for_each_line, Printer};
use crate::color::Color;
use crate::scanner::LineSource;
use crate::theme::Theme;

pub(crate) const DRY_RUN_SUFFIXES: [&str; 2] = ["(dry run)", "(server dry run)"];

pub struct ApplyPrinter<'a> {
    theme: &'a Theme,
}

impl<'a> ApplyPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn action_color(&self, action: &str) -> Option<&'a Color> {
        let apply = &self.theme.apply;
        match action {
            "created" => Some(&apply.created),
            "configured" => Some(&apply.configured),
            "unchanged" => Some(&apply.unchanged),
            "serverside-applied" => Some(&apply.serverside),
            _ => None,
        }
    }

    fn colorize_line(&self, line: &str) -> Option<String> {
        let (resource, rest) = line.split_once(' ')?;
        let (action, dry_run) = match rest.split_once(' ') {
            Some((action, dry_run)) => (action, Some(dry_run)),
            None => (rest, None),
        };
        let action = self.action_color(action)?.render(action);
        match dry_run {
            None => Some(format!("{} {}", resource, action)),
            Some(suffix) if DRY_RUN_SUFFIXES.contains(&suffix) => Some(format!(
                "{} {} {}",
                resource,
                action,
                self.theme.apply.dryrun.render(suffix)
            )),
            Some(_) => None,
        }
    }
}

impl Printer for ApplyPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| {
            if line.is_empty() {
                return String::new();
            }
            self.colorize_line(line)
                .unwrap_or_else(|| self.theme.apply.fallback.render(line))
        })
    }
}
