//! Line-oriented scanners for kubectl's textual output formats.
//!
//! - [`table`]: whitespace-aligned tables (`kubectl get`, `top`, ...)
//! - [`describe`]: indented `key: value` trees (`describe`, `explain`, help)
//! - [`logs`]: free-form log lines split into semantic tokens
//!
//! All scanners pull lines from a [`LineSource`]. Line terminators are
//! stripped; printers write `\n` back after each line. Lines that are not
//! UTF-8 arrive as [`InputLine::Bytes`] and are written back unchanged.

pub mod describe;
pub mod logs;
pub mod table;

use std::collections::VecDeque;
use std::io::{self, BufRead, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::utils::text::MAX_LINE_LENGTH;

/// One line of input without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Text(String),
    /// Not valid UTF-8.
    Bytes(Vec<u8>),
}

impl InputLine {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }
}

impl From<Vec<u8>> for InputLine {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Bytes(err.into_bytes()),
        }
    }
}

impl From<&str> for InputLine {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Outcome of waiting a bounded time for the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(InputLine),
    /// Nothing arrived in time; the producer is idle but not finished.
    Stalled,
    End,
}

/// A stream of lines without their terminators.
pub trait LineSource {
    /// Next line, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<InputLine>>;

    /// Next line, giving up after `timeout`. Sources that cannot stall
    /// simply block.
    fn next_line_timeout(&mut self, _timeout: Duration) -> io::Result<LineEvent> {
        Ok(match self.next_line()? {
            Some(line) => LineEvent::Line(line),
            None => LineEvent::End,
        })
    }
}

/// Read one line from `reader`, enforcing [`MAX_LINE_LENGTH`].
fn read_capped_line<R: BufRead>(reader: &mut R) -> io::Result<Option<InputLine>> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LENGTH as u64 + 1)
        .read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if buf.len() > MAX_LINE_LENGTH {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line exceeds {} bytes", MAX_LINE_LENGTH),
        ));
    }
    Ok(Some(InputLine::from(buf)))
}

/// Blocking lines straight from a reader.
pub struct Lines<R> {
    reader: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Lines<R> {
    fn next_line(&mut self) -> io::Result<Option<InputLine>> {
        read_capped_line(&mut self.reader)
    }
}

/// Lines already held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryLines(VecDeque<String>);

impl MemoryLines {
    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push_back(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MemoryLines {
    fn from(text: &str) -> Self {
        Self(text.lines().map(String::from).collect())
    }
}

impl LineSource for MemoryLines {
    fn next_line(&mut self) -> io::Result<Option<InputLine>> {
        Ok(self.0.pop_front().map(InputLine::Text))
    }
}

/// Lines read on a background thread, so waiting can time out.
pub struct ThreadedLines {
    rx: Receiver<io::Result<InputLine>>,
    finished: bool,
}

impl ThreadedLines {
    pub fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::sync_channel(100);
        thread::spawn(move || loop {
            match read_capped_line(&mut reader) {
                Ok(Some(line)) => {
                    if tx.send(Ok(line)).is_err() {
                        return;
                    }
                }
                Ok(None) => return,
                Err(err) => {
                    let _ = tx.send(Err(err));
                    return;
                }
            }
        });
        Self {
            rx,
            finished: false,
        }
    }
}

impl LineSource for ThreadedLines {
    fn next_line(&mut self) -> io::Result<Option<InputLine>> {
        if self.finished {
            return Ok(None);
        }
        match self.rx.recv() {
            Ok(line) => line.map(Some),
            Err(_) => {
                self.finished = true;
                Ok(None)
            }
        }
    }

    fn next_line_timeout(&mut self, timeout: Duration) -> io::Result<LineEvent> {
        if self.finished {
            return Ok(LineEvent::End);
        }
        match self.rx.recv_timeout(timeout) {
            Ok(line) => line.map(LineEvent::Line),
            Err(RecvTimeoutError::Timeout) => Ok(LineEvent::Stalled),
            Err(RecvTimeoutError::Disconnected) => {
                self.finished = true;
                Ok(LineEvent::End)
            }
        }
    }
}

/// Largest index `<= i` that lies on a char boundary of `s`.
pub(crate) fn floor_char_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    let mut i = i;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn text(line: io::Result<Option<InputLine>>) -> Option<String> {
        line.unwrap().map(|l| l.as_text().unwrap().to_string())
    }

    #[test]
    fn lines_strip_terminators() {
        let mut lines = Lines::new(Cursor::new("a\r\nb\n\nc"));
        assert_eq!(text(lines.next_line()).as_deref(), Some("a"));
        assert_eq!(text(lines.next_line()).as_deref(), Some("b"));
        assert_eq!(text(lines.next_line()).as_deref(), Some(""));
        assert_eq!(text(lines.next_line()).as_deref(), Some("c"));
        assert_eq!(lines.next_line().unwrap(), None);
    }

    #[test]
    fn lines_keep_bytes_that_are_not_utf8() {
        let mut lines = Lines::new(Cursor::new(&b"caf\xe9 ok\r\nnext\n"[..]));
        assert_eq!(
            lines.next_line().unwrap(),
            Some(InputLine::Bytes(b"caf\xe9 ok".to_vec()))
        );
        assert_eq!(text(lines.next_line()).as_deref(), Some("next"));
    }

    #[test]
    fn threaded_lines_end() {
        let mut lines = ThreadedLines::spawn(Cursor::new("x\n"));
        assert_eq!(text(lines.next_line()).as_deref(), Some("x"));
        assert_eq!(
            lines.next_line_timeout(Duration::from_secs(5)).unwrap(),
            LineEvent::End
        );
    }

    #[test]
    fn memory_lines_drain_in_order() {
        let mut lines = MemoryLines::from("a\r\nb");
        lines.push("c");
        assert_eq!(text(lines.next_line()).as_deref(), Some("a"));
        assert_eq!(text(lines.next_line()).as_deref(), Some("b"));
        assert_eq!(text(lines.next_line()).as_deref(), Some("c"));
        assert!(lines.is_empty());
        assert_eq!(lines.next_line().unwrap(), None);
    }

    #[test]
    fn char_boundary_floor() {
        let s = "aé b";
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 99), s.len());
    }
}
