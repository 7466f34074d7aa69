//! Splits indented `key: value` output into its parts.
//!
//! Used for `kubectl describe`, `kubectl explain` and `--help` output.
//! Every scanned [`Line`] keeps all of its bytes:
//! `indent + key + spacing + value + trailing == line`.

use std::fmt;

use crate::utils::text::{find_indent, index_of_double_space};

/// One line, split into its five parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub indent: String,
    pub key: String,
    pub spacing: String,
    pub value: String,
    pub trailing: String,
    /// Column of the key this line belongs to. Continuation lines inherit
    /// the key column of the line that opened the value.
    pub key_indent: usize,
    /// Column where the value starts, when there is one.
    pub value_indent: Option<usize>,
}

impl Line {
    /// Parts joined with `~`, e.g. `"  ~name:~  ~foo~"`. Meant for tests and
    /// debug logging.
    pub fn parts(&self) -> String {
        format!(
            "{}~{}~{}~{}~{}",
            self.indent, self.key, self.spacing, self.value, self.trailing
        )
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.indent, self.key, self.spacing, self.value, self.trailing
        )
    }
}

/// Trail of keys leading to the current line, e.g. `Containers/app/State`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<(usize, String)>);

impl Path {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, key)| key.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.segments().next()
    }

    fn enter(&mut self, indent: usize, key: &str) {
        while matches!(self.0.last(), Some((i, _)) if *i >= indent) {
            self.0.pop();
        }
        let key = key.trim_end_matches(':').trim().to_string();
        self.0.push((indent, key));
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Previous {
    key_indent: usize,
    value_indent: Option<usize>,
    has_key: bool,
}

/// Stateful line splitter; feed it lines in order.
#[derive(Debug, Default)]
pub struct DescribeScanner {
    path: Path,
    prev: Option<Previous>,
}

impl DescribeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the most recently scanned line.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scan_line(&mut self, line: &str) -> Line {
        let indent = find_indent(line);
        let rest = &line[indent..];

        if rest.trim().is_empty() {
            return Line {
                trailing: line.to_string(),
                key_indent: indent,
                ..Line::default()
            };
        }

        let prev = self.prev.unwrap_or_default();

        if self.prev.is_some() && prev.value_indent == Some(indent) {
            return self.value_line(line, indent, prev.key_indent);
        }

        if let Some(key_end) = index_of_double_space(rest) {
            let key = &rest[..key_end];
            let after_key = &rest[key_end..];
            let spacing_len = after_key
                .bytes()
                .take_while(|b| *b == b' ' || *b == b'\t')
                .count();
            let spacing = &after_key[..spacing_len];
            let remainder = &after_key[spacing_len..];

            self.path.enter(indent, key);

            if remainder.is_empty() {
                self.prev = Some(Previous {
                    key_indent: indent,
                    value_indent: None,
                    has_key: true,
                });
                return Line {
                    indent: line[..indent].to_string(),
                    key: key.to_string(),
                    trailing: after_key.to_string(),
                    key_indent: indent,
                    ..Line::default()
                };
            }

            let value = remainder.trim_end_matches([' ', '\t']);
            let value_indent = indent + key_end + spacing_len;
            self.prev = Some(Previous {
                key_indent: indent,
                value_indent: Some(value_indent),
                has_key: true,
            });
            return Line {
                indent: line[..indent].to_string(),
                key: key.to_string(),
                spacing: spacing.to_string(),
                value: value.to_string(),
                trailing: remainder[value.len()..].to_string(),
                key_indent: indent,
                value_indent: Some(value_indent),
            };
        }

        let trimmed = rest.trim_end_matches([' ', '\t']);
        let continues_value = prev.has_key && indent > prev.key_indent;
        let opens_key = trimmed.ends_with(':');

        if self.prev.is_some() && continues_value && (prev.value_indent.is_some() || !opens_key) {
            return self.value_line(line, indent, prev.key_indent);
        }

        self.path.enter(indent, trimmed);
        self.prev = Some(Previous {
            key_indent: indent,
            value_indent: None,
            has_key: true,
        });
        Line {
            indent: line[..indent].to_string(),
            key: trimmed.to_string(),
            trailing: rest[trimmed.len()..].to_string(),
            key_indent: indent,
            ..Line::default()
        }
    }

    fn value_line(&mut self, line: &str, indent: usize, key_indent: usize) -> Line {
        let rest = &line[indent..];
        let value = rest.trim_end_matches([' ', '\t']);
        self.prev = Some(Previous {
            key_indent,
            value_indent: Some(indent),
            has_key: true,
        });
        Line {
            indent: line[..indent].to_string(),
            value: value.to_string(),
            trailing: rest[value.len()..].to_string(),
            key_indent,
            value_indent: Some(indent),
            ..Line::default()
        }
    }
}
