//! `kubectl get`-style tables.

use std::io::{self, Write};
use std::time::Duration;

use super::classify::render_status;
use super::{write_bytes_line, Printer};
use crate::scanner::table::{Row, TableScanner, DEFAULT_STALL_TIMEOUT};
use crate::scanner::LineSource;
use crate::theme::Theme;
use crate::utils::text::{is_all_upper, is_only_symbols, parse_human_duration, parse_ratio};

/// Per-cell override: returns the rendered cell, or `None` to fall back to
/// the column color.
pub type ColumnFilter<'a> = Box<dyn Fn(usize, &str) -> Option<String> + Send + 'a>;

pub struct TablePrinter<'a> {
    theme: &'a Theme,
    with_header: bool,
    filter: Option<ColumnFilter<'a>>,
    stall_timeout: Duration,
    leading_namespace: bool,
}

impl<'a> TablePrinter<'a> {
    pub fn new(theme: &'a Theme, with_header: bool) -> Self {
        Self {
            theme,
            with_header,
            filter: None,
            stall_timeout: DEFAULT_STALL_TIMEOUT,
            leading_namespace: false,
        }
    }

    pub fn with_filter(mut self, filter: ColumnFilter<'a>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    fn is_header(&self, row: &Row, first: bool, next: Option<&str>) -> bool {
        (self.with_header && first)
            || is_all_upper(&row.text)
            || is_only_symbols(&row.text)
            || next.is_some_and(is_only_symbols)
    }

    fn write_row(&self, row: &Row, out: &mut dyn Write) -> io::Result<()> {
        if row.cells.is_empty() {
            return writeln!(out, "{}", row.text);
        }
        let shift = usize::from(self.leading_namespace);
        let mut line = String::with_capacity(row.text.len() * 2);
        line.push_str(&row.leading_spaces);
        for (i, cell) in row.cells.iter().enumerate() {
            let trimmed = cell.trimmed();
            if !trimmed.is_empty() {
                let rendered = self
                    .filter
                    .as_ref()
                    .and_then(|filter| filter(i, trimmed))
                    .unwrap_or_else(|| self.theme.table.columns.cycle(i + shift).render(trimmed));
                line.push_str(&rendered);
            }
            line.push_str(cell.trailing_spaces());
        }
        writeln!(out, "{}", line)
    }
}

impl Printer for TablePrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        let mut scanner = TableScanner::new(input).with_stall_timeout(self.stall_timeout);
        let mut first = true;
        while let Some(row) = scanner.scan()? {
            if let Some(bytes) = &row.bytes {
                write_bytes_line(out, bytes)?;
                continue;
            }
            if row.is_blank() {
                writeln!(out)?;
                continue;
            }
            let next = scanner.buffered_lines().next();
            if self.is_header(&row, first, next) {
                first = false;
                self.leading_namespace = row
                    .cells
                    .first()
                    .is_some_and(|c| c.trimmed().eq_ignore_ascii_case("namespace"));
                writeln!(out, "{}", self.theme.table.header.render(&row.text))?;
                continue;
            }
            first = false;
            self.write_row(&row, out)?;
        }
        Ok(())
    }
}

/// Cell coloring for `kubectl get` and `kubectl events`: status words,
/// `ready/total` ratios and fresh ages.
pub fn get_filter(theme: &Theme, fresh_threshold: Duration) -> ColumnFilter<'_> {
    Box::new(move |_, cell| {
        if let Some(rendered) = render_status(cell, theme) {
            return Some(rendered);
        }
        if let Some((left, right)) = parse_ratio(cell) {
            let ratio = &theme.data.ratio;
            let color = if left == "0" && right == "0" {
                &ratio.zero
            } else if left == right {
                &ratio.equal
            } else {
                &ratio.unequal
            };
            if color.is_empty() {
                return None;
            }
            return Some(color.render(cell));
        }
        if !fresh_threshold.is_zero() {
            if let Some(age) = parse_human_duration(cell) {
                if age < fresh_threshold {
                    return Some(theme.data.durationfresh.render(cell));
                }
            }
        }
        None
    })
}

/// Cell coloring that only looks at status words.
pub fn status_filter(theme: &Theme) -> ColumnFilter<'_> {
    Box::new(move |_, cell| render_status(cell, theme))
}
