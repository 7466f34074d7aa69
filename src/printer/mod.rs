//! Printers turn kubectl output into colored output, one line at a time.
//!
//! Every printer reads from a [`LineSource`] and writes whole lines, so the
//! stdout and stderr printers never interleave partial lines. Stripping the
//! SGR sequences from a printer's output gives back its input.

pub mod apply;
pub mod auth;
pub mod classify;
pub mod describe;
pub mod diff;
pub mod dispatch;
pub mod explain;
pub mod help;
pub mod json;
pub mod logs;
pub mod options;
pub mod single;
pub mod stderr;
pub mod table;
pub mod verb;
pub mod version;
pub mod yaml;

use std::io::{self, Write};

use crate::scanner::{InputLine, LineSource};

pub use apply::ApplyPrinter;
pub use auth::AuthPrinter;
pub use describe::DescribePrinter;
pub use diff::DiffPrinter;
pub use dispatch::{select_printer, DispatchOptions};
pub use explain::ExplainPrinter;
pub use help::HelpPrinter;
pub use json::JsonPrinter;
pub use logs::LogsPrinter;
pub use options::OptionsPrinter;
pub use single::{FuncPrinter, SingleColorPrinter};
pub use stderr::StderrPrinter;
pub use table::TablePrinter;
pub use verb::VerbPrinter;
pub use version::{VersionInjectPrinter, VersionPrinter};
pub use yaml::YamlPrinter;

/// Something that colors a stream of lines.
pub trait Printer {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()>;
}

/// Apply `f` to every line and write the result followed by `\n`.
pub(crate) fn for_each_line(
    input: &mut dyn LineSource,
    out: &mut dyn Write,
    mut f: impl FnMut(&str) -> String,
) -> io::Result<()> {
    while let Some(line) = next_text_line(input, out)? {
        writeln!(out, "{}", f(&line))?;
    }
    Ok(())
}

/// Next UTF-8 line of `input`. Lines that are not UTF-8 are copied to `out`
/// on the way.
pub(crate) fn next_text_line(
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Option<String>> {
    loop {
        match input.next_line()? {
            Some(InputLine::Text(line)) => return Ok(Some(line)),
            Some(InputLine::Bytes(bytes)) => write_bytes_line(out, &bytes)?,
            None => return Ok(None),
        }
    }
}

pub(crate) fn write_bytes_line(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.write_all(b"\n")
}
