//! `kubectl describe` output.
//!
//! Keys are colored by depth. Values go through the value classifier,
//! except under status paths where status words win. Runs of lines whose
//! value looks like a table (events, conditions, volumes) are buffered and
//! handed to a [`TablePrinter`].

use std::io::{self, Write};
use std::sync::OnceLock;

use regex::{Regex, RegexSet};

use super::classify::{render_status, value_color};
use super::table::{status_filter, TablePrinter};
use super::{write_bytes_line, Printer};
use crate::scanner::describe::{DescribeScanner, Line};
use crate::scanner::{InputLine, LineSource, MemoryLines};
use crate::theme::Theme;
use crate::utils::text::count_columns;

const BASIC_INDENT: usize = 2;

/// Paths whose lines are all value, e.g. each label under `Labels:`.
fn value_only_path() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(Labels|Annotations|(Init )?Containers/[^/]+/Environment Variables from)/.+")
            .expect("valid regex")
    })
}

fn status_paths() -> &'static RegexSet {
    static RE: OnceLock<RegexSet> = OnceLock::new();
    RE.get_or_init(|| {
        RegexSet::new([
            r"^Status$",
            r"^(Init )?Containers/[^/]*/State(/Reason)?$",
            r"^Containers/[^/]*/Last State(/Reason)?$",
        ])
        .expect("valid regex")
    })
}

fn args_path() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(Init )?Containers/[^/]*/Args$").expect("valid regex"))
}

pub struct DescribePrinter<'a> {
    theme: &'a Theme,
}

impl<'a> DescribePrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn flush_table(&self, table: &mut MemoryLines, out: &mut dyn Write) -> io::Result<()> {
        if table.is_empty() {
            return Ok(());
        }
        TablePrinter::new(self.theme, false)
            .with_filter(status_filter(self.theme))
            .print(table, out)
    }

    fn write_line(&self, line: &Line, path: &str, out: &mut dyn Write) -> io::Result<()> {
        let mut buf = String::with_capacity(line.value.len() * 2 + 16);
        buf.push_str(&line.indent);
        if !line.key.is_empty() {
            let color = self.theme.describe.key.for_indent(line.key_indent, BASIC_INDENT);
            match line.key.strip_suffix(':') {
                Some(key) => {
                    buf.push_str(&color.render(key));
                    buf.push(':');
                }
                None => buf.push_str(&color.render(&line.key)),
            }
        }
        buf.push_str(&line.spacing);
        if !line.value.is_empty() {
            let value = line.value.as_str();
            if let Some((k, v)) = value.split_once(": ") {
                buf.push_str(k);
                buf.push_str(": ");
                buf.push_str(&self.colorize_value(path, v));
            } else if let Some((k, v)) = value.split_once('=') {
                buf.push_str(k);
                buf.push('=');
                buf.push_str(&self.colorize_value(path, v));
            } else {
                buf.push_str(&self.colorize_value(path, value));
            }
        }
        buf.push_str(&line.trailing);
        writeln!(out, "{}", buf)
    }

    /// Color `value`, keeping surrounding whitespace as is.
    fn colorize_value(&self, path: &str, value: &str) -> String {
        let start = value.len() - value.trim_start().len();
        let end = value.trim_end().len().max(start);
        let (lead, rest) = value.split_at(start);
        let (text, tail) = rest.split_at(end - start);

        let colored = if status_paths().is_match(path) {
            render_status(text, self.theme)
        } else {
            None
        };
        let colored = colored.unwrap_or_else(|| {
            if args_path().is_match(path) && text.starts_with('-') {
                text.to_string()
            } else {
                value_color(text, self.theme).render(text)
            }
        });
        format!("{}{}{}", lead, colored, tail)
    }
}

impl Printer for DescribePrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut scanner = DescribeScanner::new();
        let mut table = MemoryLines::default();

        while let Some(next) = input.next_line()? {
            let raw = match next {
                InputLine::Text(text) => text,
                InputLine::Bytes(bytes) => {
                    self.flush_table(&mut table, out)?;
                    write_bytes_line(out, &bytes)?;
                    continue;
                }
            };
            let mut line = scanner.scan_line(&raw);
            let path = scanner.path().to_string();

            if value_only_path().is_match(&path) {
                line.value = format!("{}{}{}", line.key, line.spacing, line.value);
                line.key.clear();
                line.spacing.clear();
            } else if count_columns(&line.value, b" \t") >= 3 {
                table.push(raw);
                continue;
            } else {
                self.flush_table(&mut table, out)?;
            }

            self.write_line(&line, &path, out)?;
        }
        self.flush_table(&mut table, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testutil::{dark, print_to_string};
    use crate::utils::text::strip_sgr;

    const POD: &str = "Name:         nginx-lpv5x
Namespace:    default
Priority:     0
Labels:       app=nginx
              pod-template-hash=6799fc88d8
Status:       Running
IP:           172.18.0.7
Containers:
  nginx:
    Image:          nginx
    Args:
      --verbose
    State:          Running
      Started:      Sat, 10 Oct 2020 14:15:44 +0900
    Ready:          True
    Restart Count:  0
Conditions:
  Type              Status
  Initialized       True
  Ready             True
Events:
  Type    Reason     Age   From               Message
  ----    ------     ----  ----               -------
  Normal  Scheduled  5m    default-scheduler  Successfully assigned default/nginx to minikube
  Normal  Pulled     5m    kubelet            Container image \"nginx\" already present on machine
";

    #[test]
    fn strips_back_to_input() {
        let theme = dark();
        let out = print_to_string(&mut DescribePrinter::new(&theme), POD);
        assert_eq!(strip_sgr(&out), POD);
    }

    #[test]
    fn keys_by_depth_and_values_by_class() {
        let theme = dark();
        let out = print_to_string(&mut DescribePrinter::new(&theme), POD);
        let k0 = theme.describe.key.for_indent(0, 2);
        let k2 = theme.describe.key.for_indent(4, 2);
        assert!(out.contains(&format!(
            "{}:     {}\n",
            k0.render("Priority"),
            theme.data.number.render("0")
        )));
        assert!(out.contains(&format!(
            "{}:       app={}\n",
            k0.render("Labels"),
            theme.data.string.render("nginx")
        )));
        assert!(out.contains(&format!(
            "    {}:          {}\n",
            k2.render("Ready"),
            theme.data.r#true.render("True")
        )));
    }

    #[test]
    fn status_paths_use_status_colors() {
        let theme = dark();
        let out = print_to_string(&mut DescribePrinter::new(&theme), POD);
        assert!(out.contains(&format!(
            "{}:       {}\n",
            theme.describe.key.for_indent(0, 2).render("Status"),
            theme.status.success.render("Running")
        )));
        assert!(out.contains(&format!(
            "    {}:          {}\n",
            theme.describe.key.for_indent(4, 2).render("State"),
            theme.status.success.render("Running")
        )));
    }

    #[test]
    fn args_flags_stay_plain() {
        let theme = dark();
        let out = print_to_string(&mut DescribePrinter::new(&theme), POD);
        assert!(out.contains("\n      --verbose\n"));
    }

    #[test]
    fn events_become_a_table() {
        let theme = dark();
        let out = print_to_string(&mut DescribePrinter::new(&theme), POD);
        assert!(out.contains(&theme.table.header.render("  Type    Reason     Age   From               Message")));
        assert!(out.contains(&theme.status.success.render("Normal")));
    }
}
