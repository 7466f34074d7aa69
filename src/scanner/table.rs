//! Column inference for whitespace-aligned tables.
//!
//! Lines are buffered while their combined non-space layout keeps the same
//! column starts. A line whose content lands right before a known column
//! start is taken as the header of a new table; an empty line ends the
//! current table.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::{floor_char_boundary, InputLine, LineEvent, LineSource};
use crate::utils::text::{index_of_double_space, index_of_non_space};

/// How long to wait for more rows before flushing what is buffered.
pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_millis(50);

/// One cell of a row, including the padding up to the next column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    full: String,
    trimmed_len: usize,
}

impl Cell {
    pub fn new(full: impl Into<String>) -> Self {
        let full = full.into();
        let trimmed_len = full.trim_end_matches([' ', '\t']).len();
        Self { full, trimmed_len }
    }

    pub fn trimmed(&self) -> &str {
        &self.full[..self.trimmed_len]
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn trailing_spaces(&self) -> &str {
        &self.full[self.trimmed_len..]
    }
}

/// A scanned line split into cells.
///
/// `leading_spaces` followed by every cell's `full()` text equals `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub leading_spaces: String,
    pub cells: Vec<Cell>,
    pub text: String,
    /// A line that is not UTF-8. It ends the current table and has no cells.
    pub bytes: Option<Vec<u8>>,
}

impl Row {
    /// True for the empty line separating two tables.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.bytes.is_none()
    }
}

pub struct TableScanner<'a> {
    source: &'a mut dyn LineSource,
    header_indices: Vec<usize>,
    buffered: VecDeque<String>,
    pending: Option<InputLine>,
    bytes_line: Option<Vec<u8>>,
    stall_timeout: Option<Duration>,
}

impl<'a> TableScanner<'a> {
    pub fn new(source: &'a mut dyn LineSource) -> Self {
        Self {
            source,
            header_indices: Vec::new(),
            buffered: VecDeque::new(),
            pending: None,
            bytes_line: None,
            stall_timeout: None,
        }
    }

    /// Flush the buffered table when no new line arrives within `timeout`.
    pub fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = Some(timeout);
        self
    }

    /// Lines currently held back while the column layout is inferred.
    pub fn buffered_lines(&self) -> impl Iterator<Item = &str> {
        self.buffered.iter().map(String::as_str)
    }

    pub fn scan(&mut self) -> io::Result<Option<Row>> {
        if !self.buffer_table_lines()? {
            return Ok(None);
        }
        if let Some(bytes) = self.bytes_line.take() {
            return Ok(Some(Row {
                bytes: Some(bytes),
                ..Row::default()
            }));
        }
        let Some(line) = self.buffered.pop_front() else {
            return Ok(None);
        };

        if line.is_empty() {
            self.buffered.clear();
            return Ok(Some(Row::default()));
        }

        let Some(&first) = self.header_indices.first() else {
            return Ok(Some(Row {
                leading_spaces: line.clone(),
                text: line,
                ..Row::default()
            }));
        };

        let leading_end = floor_char_boundary(&line, first);
        let mut cells = Vec::with_capacity(self.header_indices.len());
        for (i, &start) in self.header_indices.iter().enumerate() {
            if start >= line.len() {
                cells.push(Cell::default());
                continue;
            }
            let start = floor_char_boundary(&line, start).max(leading_end);
            let end = match self.header_indices.get(i + 1) {
                Some(&next) => floor_char_boundary(&line, next),
                None => line.len(),
            };
            cells.push(Cell::new(&line[start..end.max(start)]));
        }

        Ok(Some(Row {
            leading_spaces: line[..leading_end].to_string(),
            cells,
            text: line,
            bytes: None,
        }))
    }

    fn read_next(&mut self) -> io::Result<LineEvent> {
        if let Some(line) = self.pending.take() {
            return Ok(LineEvent::Line(line));
        }
        match self.stall_timeout {
            Some(timeout) if !self.buffered.is_empty() => self.source.next_line_timeout(timeout),
            _ => Ok(match self.source.next_line()? {
                Some(line) => LineEvent::Line(line),
                None => LineEvent::End,
            }),
        }
    }

    fn buffer_table_lines(&mut self) -> io::Result<bool> {
        if !self.buffered.is_empty() {
            return Ok(true);
        }

        self.header_indices.clear();
        let mut combined: Vec<u8> = Vec::new();

        loop {
            let line = match self.read_next()? {
                LineEvent::Line(InputLine::Text(line)) => line,
                LineEvent::Line(InputLine::Bytes(bytes)) => {
                    if self.buffered.is_empty() {
                        self.bytes_line = Some(bytes);
                    } else {
                        self.pending = Some(InputLine::Bytes(bytes));
                    }
                    return Ok(true);
                }
                LineEvent::End => return Ok(!self.buffered.is_empty()),
                LineEvent::Stalled => return Ok(true),
            };

            if line.is_empty() {
                self.buffered.push_back(line);
                return Ok(true);
            }

            overlay_non_space(&mut combined, line.as_bytes());
            let new_indices = calc_header_indices(&combined);

            if is_probably_new_table(&self.header_indices, &combined) {
                self.pending = Some(InputLine::Text(line));
                return Ok(true);
            }

            self.header_indices = new_indices;
            self.buffered.push_back(line);
        }
    }
}

/// Copy every non-space byte of `line` onto `combined`.
fn overlay_non_space(combined: &mut Vec<u8>, line: &[u8]) {
    if line.len() > combined.len() {
        combined.resize(line.len(), b' ');
    }
    for (slot, &b) in combined.iter_mut().zip(line) {
        if b != b' ' {
            *slot = b;
        }
    }
}

/// Column starts: each first non-space after a double space (or tab).
fn calc_header_indices(line: &[u8]) -> Vec<usize> {
    let text = String::from_utf8_lossy(line);
    let mut indices = Vec::new();
    let mut rest: &str = &text;
    let mut offset = 0;
    while let Some(start) = index_of_non_space(rest, b" \t") {
        rest = &rest[start..];
        offset += start;
        indices.push(offset);
        match index_of_double_space(rest) {
            Some(end) => {
                rest = &rest[end..];
                offset += end;
            }
            None => break,
        }
    }
    indices
}

/// Cells should be separated by spacing; content right before a known
/// column start means the layout changed.
fn is_probably_new_table(header_indices: &[usize], combined: &[u8]) -> bool {
    header_indices.iter().skip(1).any(|&index| {
        index != 0 && index < combined.len() && combined[index.saturating_sub(2)] != b' '
    })
}
