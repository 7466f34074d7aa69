//! Log line tokenizer.
//!
//! Splits free-form log output (klog, logfmt, JSON lines, plain text) into
//! tokens that the logs printer colors individually. Tokens borrow from the
//! input and their texts concatenate back to it exactly.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::utils::text::is_only_letters;

/// Groups nested deeper than this are kept as a single token.
const MAX_NESTING: usize = 64;

/// Severity categories recognized in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Severity {
    /// Matches common spellings of a level name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let severity = match lower.as_str() {
            "trace" | "trc" => Self::Trace,
            "debug" | "dbg" => Self::Debug,
            "information" | "info" | "inf" | "note" | "successfully" | "success" => Self::Info,
            "warning" | "warn" | "wrn" => Self::Warn,
            "error" | "erro" | "err" | "failed" => Self::Error,
            "fatal" => Self::Fatal,
            "panic" => Self::Panic,
            _ => return None,
        };
        Some(severity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Unknown,
    /// End of the line.
    Newline,
    /// A whole line that already carries SGR sequences.
    Preformatted,
    Date,
    Guid,
    /// e.g. `reconciler.go:142]`
    SourceRef,
    Quote,
    /// Opening or closing bracket of a group.
    Parenthases,
    Key,
    Value,
    Severity(Severity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// klog header: `Lmmdd hh:mm:ss.uuuuuu threadid file:line]`
fn klog_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([IWEF])(\d{4} \d\d:\d\d:\d\d\.\d+)(\s*\d+\s*)([\w._]+:\d+)\]")
            .expect("valid regex")
    })
}

/// `2024-08-03T19:57:19.446242`, `2024-08-03 20:04:28.614 GMT`,
/// `03 Aug 2024 20:04:28.614 GMT`, `03/Aug/2024:20:04:28.614 +02:00`
fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^\d{4}-\d\d-\d\dT\d\d:\d\d(:\d\d(\.\d+)?)?(Z|[+-]\d\d:\d\d|[+-]\d{4})?\b",
            r"|^(\d{4}-\d\d-\d\d|\d\d [a-zA-Z][a-z]+ \d{4}|\d\d/[a-zA-Z][a-z]+/\d{4})[ :]\d\d:\d\d(:\d\d(\.\d+)?)?( ?(GMT|UTC|[+-]\d\d:\d\d|[+-]\d{4}))?\b",
        ))
        .expect("valid regex")
    })
}

fn guid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$|^[0-9a-fA-F]{32}$",
        )
        .expect("valid regex")
    })
}

/// Tokenizes a whole stream, emitting a [`TokenKind::Newline`] token for
/// every `\n`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for chunk in input.split_inclusive('\n') {
        match chunk.strip_suffix('\n') {
            Some(line) => {
                tokens.extend(tokenize_line(line));
                tokens.push(Token::new(TokenKind::Newline, &chunk[line.len()..]));
            }
            None => tokens.extend(tokenize_line(chunk)),
        }
    }
    tokens
}

/// Tokenizes one line without its terminator.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let mut tokenizer = LineTokenizer::new(line);
    if line.contains("\x1b[") {
        tokenizer.push(TokenKind::Preformatted, line);
    } else {
        tokenizer.scan_all(line);
    }
    tokenizer.tokens
}

/// End offsets of every balanced `(...)` and `[...]` group in a line, keyed
/// by the offset of the opening bracket.
#[derive(Debug, Default)]
struct BracketIndex {
    parens: HashMap<usize, usize>,
    brackets: HashMap<usize, usize>,
}

impl BracketIndex {
    fn build(line: &str) -> Self {
        let mut index = Self::default();
        let mut parens = Vec::new();
        let mut brackets = Vec::new();
        for (i, c) in line.char_indices() {
            match c {
                '(' => parens.push(i),
                '[' => brackets.push(i),
                ')' => {
                    if let Some(open) = parens.pop() {
                        index.parens.insert(open, i + 1);
                    }
                }
                ']' => {
                    if let Some(open) = brackets.pop() {
                        index.brackets.insert(open, i + 1);
                    }
                }
                _ => {}
            }
        }
        index
    }
}

struct LineTokenizer<'a> {
    line: &'a str,
    tokens: Vec<Token<'a>>,
    found_severity: bool,
    depth: usize,
    brackets: Option<BracketIndex>,
    /// Per quote char, the last `(start, end)` span where no closing quote
    /// was found.
    unclosed_quotes: [Option<(usize, usize)>; 3],
}

impl<'a> LineTokenizer<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            tokens: Vec::new(),
            found_severity: false,
            depth: 0,
            brackets: None,
            unclosed_quotes: [None; 3],
        }
    }

    /// Byte offset of `rest` within the line. Every slice scanned here
    /// borrows from `self.line`.
    fn offset(&self, rest: &str) -> usize {
        rest.as_ptr() as usize - self.line.as_ptr() as usize
    }

    /// Balanced group starting at the first char of `rest`, or `None` when
    /// it does not close before `rest` ends.
    fn group(&mut self, rest: &'a str) -> Option<&'a str> {
        let start = self.offset(rest);
        let line = self.line;
        let index = self.brackets.get_or_insert_with(|| BracketIndex::build(line));
        let end = match rest.chars().next()? {
            '(' => index.parens.get(&start)?,
            '[' => index.brackets.get(&start)?,
            _ => return None,
        };
        let len = end - start;
        (len <= rest.len()).then(|| &rest[..len])
    }

    /// [`read_quoted`], skipping the scan when an earlier quote of the same
    /// kind already ran off the end of an enclosing span.
    fn quoted(&mut self, rest: &'a str) -> Option<&'a str> {
        let slot = match rest.chars().next()? {
            '"' => 0,
            '\'' => 1,
            '`' => 2,
            _ => return read_quoted(rest),
        };
        let start = self.offset(rest);
        let end = start + rest.len();
        if let Some((failed_start, failed_end)) = self.unclosed_quotes[slot] {
            if start > failed_start && end <= failed_end {
                return None;
            }
        }
        let quoted = read_quoted(rest);
        if quoted.is_none() {
            self.unclosed_quotes[slot] = Some((start, end));
        }
        quoted
    }

    /// `"key":` at the start of `s`. Returns the quoted key and what
    /// follows the colon.
    fn json_key(&mut self, s: &'a str) -> Option<(&'a str, &'a str)> {
        let key = self.quoted(s)?;
        let after = s[key.len()..].strip_prefix(':')?;
        Some((key, after))
    }

    fn push(&mut self, kind: TokenKind, text: &'a str) -> usize {
        if !text.is_empty() {
            self.tokens.push(Token::new(kind, text));
        }
        text.len()
    }

    fn scan_all(&mut self, mut rest: &'a str) {
        while !rest.is_empty() {
            let consumed = self.scan(rest);
            if consumed == 0 {
                self.push(TokenKind::Unknown, rest);
                return;
            }
            rest = &rest[consumed..];
        }
    }

    /// Consumes one token (or group) from the start of `rest`.
    fn scan(&mut self, rest: &'a str) -> usize {
        let word = read_word(rest);
        let Some(first) = word.chars().next() else {
            return self.push(TokenKind::Unknown, rest);
        };
        if first.is_whitespace() {
            return self.push(TokenKind::Unknown, word);
        }

        match first {
            '[' | '(' => {
                if let Some(group) = self.group(rest) {
                    self.scan_group(group);
                    return group.len();
                }
            }
            '"' | '\'' | '`' => {
                if let Some(quoted) = self.quoted(rest) {
                    return self.push(TokenKind::Quote, quoted);
                }
            }
            '{' => {
                let written = self.scan_json(rest);
                if written > 0 {
                    return written;
                }
            }
            _ => {}
        }

        if let Some((key, _)) = word.split_once('=') {
            if !key.is_empty() {
                return self.scan_key_value(key, &rest[key.len() + 1..]);
            }
        }

        if word.ends_with(']') && word.contains('.') && word.contains(':') {
            return self.push(TokenKind::SourceRef, word);
        }

        if let Some(caps) = klog_header().captures(rest) {
            let severity = match first {
                'I' => Severity::Info,
                'W' => Severity::Warn,
                'E' => Severity::Error,
                _ => Severity::Fatal,
            };
            self.found_severity = true;
            let text = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            self.push(TokenKind::Severity(severity), text(1));
            self.push(TokenKind::Date, text(2));
            self.push(TokenKind::Unknown, text(3));
            self.push(TokenKind::SourceRef, text(4));
            let full = text(0);
            self.push(TokenKind::Parenthases, &full[full.len() - 1..]);
            return full.len();
        }

        if let Some(date) = date_pattern().find(rest) {
            return self.push(TokenKind::Date, date.as_str());
        }

        if guid_pattern().is_match(word) {
            return self.push(TokenKind::Guid, word);
        }

        if !self.found_severity {
            let name = word.trim_end_matches([':', '!', ',']);
            if is_only_letters(name) {
                if let Some(severity) = Severity::from_name(name) {
                    self.found_severity = true;
                    return self.push(TokenKind::Severity(severity), name);
                }
            }
        }

        self.push(TokenKind::Unknown, word)
    }

    fn scan_group(&mut self, group: &'a str) {
        if self.depth >= MAX_NESTING {
            self.push(TokenKind::Unknown, group);
            return;
        }
        let open_len = group.chars().next().map_or(0, char::len_utf8);
        let close_len = group.chars().next_back().map_or(0, char::len_utf8);
        self.push(TokenKind::Parenthases, &group[..open_len]);
        self.depth += 1;
        self.scan_all(&group[open_len..group.len() - close_len]);
        self.depth -= 1;
        self.push(TokenKind::Parenthases, &group[group.len() - close_len..]);
    }

    fn scan_key_value(&mut self, key: &'a str, value_and_rest: &'a str) -> usize {
        self.push(TokenKind::Key, key);
        self.push(TokenKind::Unknown, "=");
        let prefix = key.len() + 1;

        let word = read_word(value_and_rest);
        if word.is_empty() || word.starts_with(char::is_whitespace) {
            return prefix;
        }

        let group = match word.chars().next() {
            Some('(' | '[') => self.group(value_and_rest),
            Some('"' | '\'' | '`') => self.quoted(value_and_rest),
            Some('{') => {
                let written = self.scan_json(value_and_rest);
                if written > 0 {
                    return prefix + written;
                }
                None
            }
            _ => None,
        };
        if let Some(group) = group.filter(|g| g.len() >= word.len()) {
            return prefix + self.push(TokenKind::Value, group);
        }

        if date_pattern().is_match(word) {
            return prefix + self.push(TokenKind::Date, word);
        }

        match key {
            "level" | "lvl" | "severity" | "l" | "s" => {
                if let Some(severity) = Severity::from_name(word) {
                    self.found_severity = true;
                    return prefix + self.push(TokenKind::Severity(severity), word);
                }
            }
            "caller" | "source" => return prefix + self.push(TokenKind::SourceRef, word),
            _ => {}
        }

        prefix + self.push(TokenKind::Value, word)
    }

    /// Tokenizes a compact JSON value. Returns the number of bytes consumed,
    /// zero when `rest` does not start with one.
    fn scan_json(&mut self, rest: &'a str) -> usize {
        let Some(first) = rest.chars().next() else {
            return 0;
        };
        match first {
            '"' => {
                let Some(quoted) = self.quoted(rest) else {
                    return 0;
                };
                if quoted.len() > 2 {
                    let inner = &quoted[1..quoted.len() - 1];
                    if date_pattern()
                        .find(inner)
                        .is_some_and(|m| m.len() == inner.len())
                    {
                        return self.push(TokenKind::Date, quoted);
                    }
                    if let Some(severity) = Severity::from_name(inner) {
                        return self.push(TokenKind::Severity(severity), quoted);
                    }
                }
                self.push(TokenKind::Value, quoted)
            }
            '0'..='9' | '.' => self.push(TokenKind::Value, read_json_number(rest)),
            't' | 'f' | 'n' => {
                let letters = read_letters(rest);
                match letters {
                    "true" | "false" | "null" => self.push(TokenKind::Value, letters),
                    _ => 0,
                }
            }
            '{' | '[' if self.depth < MAX_NESTING => {
                self.depth += 1;
                let size = if first == '{' {
                    self.scan_json_object(rest)
                } else {
                    self.scan_json_array(rest)
                };
                self.depth -= 1;
                size
            }
            _ => 0,
        }
    }

    fn scan_json_object(&mut self, rest: &'a str) -> usize {
        let mut size = self.push(TokenKind::Parenthases, &rest[..1]);
        if rest[size..].starts_with('}') {
            return size + self.push(TokenKind::Parenthases, &rest[size..size + 1]);
        }
        loop {
            let Some((key, after_colon)) = self.json_key(&rest[size..]) else {
                return size;
            };
            size += self.push(TokenKind::Key, key);
            size += self.push(TokenKind::Unknown, &rest[size..size + 1]);
            size += self.scan_json(after_colon);
            match rest[size..].chars().next() {
                Some(',') => size += self.push(TokenKind::Unknown, &rest[size..size + 1]),
                Some('}') => return size + self.push(TokenKind::Parenthases, &rest[size..size + 1]),
                _ => return size,
            }
        }
    }

    fn scan_json_array(&mut self, rest: &'a str) -> usize {
        let mut size = self.push(TokenKind::Parenthases, &rest[..1]);
        if rest[size..].starts_with(']') {
            return size + self.push(TokenKind::Parenthases, &rest[size..size + 1]);
        }
        loop {
            let item = self.scan_json(&rest[size..]);
            if item == 0 {
                return size;
            }
            size += item;
            match rest[size..].chars().next() {
                Some(',') => size += self.push(TokenKind::Unknown, &rest[size..size + 1]),
                Some(']') => return size + self.push(TokenKind::Parenthases, &rest[size..size + 1]),
                _ => return size,
            }
        }
    }
}

/// Leading run of whitespace, or leading run of non-whitespace.
pub(crate) fn read_word(s: &str) -> &str {
    let Some(first) = s.chars().next() else {
        return s;
    };
    let space = first.is_whitespace();
    let end = s
        .char_indices()
        .find(|(_, c)| c.is_whitespace() != space)
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

/// Quoted string starting at the first char of `s`, which is the quote.
/// A backslash escapes the char after it.
pub(crate) fn read_quoted(s: &str) -> Option<&str> {
    let mut chars = s.char_indices();
    let (_, quote) = chars.next()?;
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next()?;
        } else if c == quote {
            return Some(&s[..i + c.len_utf8()]);
        }
    }
    None
}

fn read_letters(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

fn read_json_number(s: &str) -> &str {
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                let stop = seen_dot;
                seen_dot = true;
                stop
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a str)> {
        tokens.iter().map(|t| (t.kind, t.text)).collect()
    }

    fn concat(tokens: &[Token<'_>]) -> String {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn tokens_concatenate_to_input() {
        for input in [
            "",
            "\n\n\n",
            "helloworld\n",
            "INFO: hello world\n",
            "(key=value with more) [a (b] c\n",
            "{\"a\": 1, \"b\":[1,2,{\"c\":null}]} tail\n",
            "level=warn msg=\"quoted \\\" value\" caller=main.go:12 ts=2024-08-03T12:38:44Z\n",
            "I0803 12:38:44.049832       1 reconciler.go:142] \"Updated\" obj=\"x\"\n",
            "ünïcödé (ö=ä) «x»\n",
            "key=\"unterminated\n",
            "trailing no newline",
        ] {
            assert_eq!(concat(&tokenize(input)), input, "input: {input:?}");
        }
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert_eq!(kinds(&tokenize("\n")), vec![(TokenKind::Newline, "\n")]);
    }

    #[test]
    fn preformatted_line() {
        let input = "\x1be[33m[NOTE]\x1b[0m this line already has colored output\n";
        assert_eq!(
            kinds(&tokenize(input)),
            vec![
                (
                    TokenKind::Preformatted,
                    "\x1be[33m[NOTE]\x1b[0m this line already has colored output"
                ),
                (TokenKind::Newline, "\n"),
            ]
        );
    }

    #[test]
    fn key_value() {
        assert_eq!(
            kinds(&tokenize("key=value other\n")),
            vec![
                (TokenKind::Key, "key"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "value"),
                (TokenKind::Unknown, " "),
                (TokenKind::Unknown, "other"),
                (TokenKind::Newline, "\n"),
            ]
        );
    }

    #[test]
    fn key_value_in_parenthases() {
        assert_eq!(
            kinds(&tokenize("(key=value)\n")),
            vec![
                (TokenKind::Parenthases, "("),
                (TokenKind::Key, "key"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "value"),
                (TokenKind::Parenthases, ")"),
                (TokenKind::Newline, "\n"),
            ]
        );
    }

    #[test]
    fn grouped_and_quoted_values() {
        assert_eq!(
            kinds(&tokenize_line("key=(value with spaces)")),
            vec![
                (TokenKind::Key, "key"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "(value with spaces)"),
            ]
        );
        assert_eq!(
            kinds(&tokenize_line("key=\"value with spaces\"")),
            vec![
                (TokenKind::Key, "key"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "\"value with spaces\""),
            ]
        );
    }

    #[test]
    fn dates() {
        for date in [
            "2024-08-03T12:38:44.049832713Z",
            "2024-08-03T12:38:44.049832713+02:00",
        ] {
            assert_eq!(kinds(&tokenize_line(date)), vec![(TokenKind::Date, date)]);
        }
        assert_eq!(
            kinds(&tokenize_line("2024-08-03 20:04:28.614 GMT x")),
            vec![
                (TokenKind::Date, "2024-08-03 20:04:28.614 GMT"),
                (TokenKind::Unknown, " "),
                (TokenKind::Unknown, "x"),
            ]
        );
    }

    #[test]
    fn guids() {
        for guid in [
            "70d5707e-b07b-41c3-9411-cad84c6db764",
            "70d5707eb07b41c39411cad84c6db764",
        ] {
            assert_eq!(kinds(&tokenize_line(guid)), vec![(TokenKind::Guid, guid)]);
        }
    }

    #[test]
    fn klog_header_line() {
        let tokens = tokenize_line("I0803 12:38:44.049832       1 reconciler.go:142] done");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Severity(Severity::Info), "I"),
                (TokenKind::Date, "0803 12:38:44.049832"),
                (TokenKind::Unknown, "       1 "),
                (TokenKind::SourceRef, "reconciler.go:142"),
                (TokenKind::Parenthases, "]"),
                (TokenKind::Unknown, " "),
                (TokenKind::Unknown, "done"),
            ]
        );
    }

    #[test]
    fn logfmt_line_with_severity() {
        let tokens =
            tokenize_line("INFO controller=\"apiservice\" reconciler.go:142] message=\"hello world\"");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Severity(Severity::Info), "INFO"),
                (TokenKind::Unknown, " "),
                (TokenKind::Key, "controller"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "\"apiservice\""),
                (TokenKind::Unknown, " "),
                (TokenKind::SourceRef, "reconciler.go:142]"),
                (TokenKind::Unknown, " "),
                (TokenKind::Key, "message"),
                (TokenKind::Unknown, "="),
                (TokenKind::Value, "\"hello world\""),
            ]
        );
    }

    #[test]
    fn severity_only_once_per_line() {
        let tokens = tokenize_line("WARN: error happened");
        assert_eq!(tokens[0].kind, TokenKind::Severity(Severity::Warn));
        assert_eq!(tokens[0].text, "WARN");
        assert!(tokens[1..]
            .iter()
            .all(|t| !matches!(t.kind, TokenKind::Severity(_))));
    }

    #[test]
    fn level_and_caller_keys() {
        let tokens = tokenize_line("level=error caller=main.go:12");
        assert_eq!(tokens[2].kind, TokenKind::Severity(Severity::Error));
        assert_eq!(tokens[6].kind, TokenKind::SourceRef);
        assert_eq!(tokens[6].text, "main.go:12");
    }

    #[test]
    fn json_object() {
        let tokens = tokenize_line(r#"{"level":"info","n":1.5,"ok":true}"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Parenthases, "{"),
                (TokenKind::Key, "\"level\""),
                (TokenKind::Unknown, ":"),
                (TokenKind::Severity(Severity::Info), "\"info\""),
                (TokenKind::Unknown, ","),
                (TokenKind::Key, "\"n\""),
                (TokenKind::Unknown, ":"),
                (TokenKind::Value, "1.5"),
                (TokenKind::Unknown, ","),
                (TokenKind::Key, "\"ok\""),
                (TokenKind::Unknown, ":"),
                (TokenKind::Value, "true"),
                (TokenKind::Parenthases, "}"),
            ]
        );
    }

    #[test]
    fn read_word_cases() {
        assert_eq!(read_word(""), "");
        assert_eq!(read_word("hello world"), "hello");
        assert_eq!(read_word("\t hello world"), "\t ");
        assert_eq!(read_word("(hello-world!)"), "(hello-world!)");
    }

    fn group(line: &str) -> Option<&str> {
        LineTokenizer::new(line).group(line)
    }

    #[test]
    fn group_cases() {
        assert_eq!(group(""), None);
        assert_eq!(group("()"), Some("()"));
        assert_eq!(group("(hello world)"), Some("(hello world)"));
        assert_eq!(group("(hello world) (another one here)"), Some("(hello world)"));
        assert_eq!(
            group("(hello (another one here) world)"),
            Some("(hello (another one here) world)")
        );
        assert_eq!(group("[a (b] c)"), Some("[a (b]"));
        assert_eq!(group("(hello world"), None);
        assert_eq!(group("(hello world (another one here)"), None);
    }

    #[test]
    fn group_must_close_inside_the_slice() {
        let line = "((a) b)";
        let mut tokenizer = LineTokenizer::new(line);
        assert_eq!(tokenizer.group(&line[..4]), None);
        assert_eq!(tokenizer.group(&line[1..]), Some("(a)"));
    }

    #[test]
    fn unclosed_quote_in_group_does_not_hide_later_quotes() {
        let tokens = tokenize_line("(\"a) \"b\"");
        assert!(kinds(&tokens).contains(&(TokenKind::Quote, "\"b\"")));
        assert_eq!(concat(&tokens), "(\"a) \"b\"");
    }

    #[test]
    fn deeply_nested_groups_fit_a_small_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                for line in [
                    format!("{}{}", "(".repeat(100_000), ")".repeat(100_000)),
                    format!("{}{}", "[".repeat(100_000), "]".repeat(100_000)),
                    "{\"a\":".repeat(100_000),
                    "x=".to_string() + &"[".repeat(100_000),
                ] {
                    assert_eq!(concat(&tokenize_line(&line)), line);
                }
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn unclosed_brackets_and_quotes_scan_in_linear_time() {
        for line in ["(a ".repeat(80_000), "[a ".repeat(80_000), "\"a ".repeat(80_000)] {
            let started = std::time::Instant::now();
            let tokens = tokenize_line(&line);
            assert!(
                started.elapsed() < std::time::Duration::from_secs(5),
                "took {:?}",
                started.elapsed()
            );
            assert_eq!(concat(&tokens), line);
        }
    }

    #[test]
    fn read_quoted_cases() {
        assert_eq!(read_quoted(""), None);
        assert_eq!(read_quoted(r#""""#), Some(r#""""#));
        assert_eq!(read_quoted(r#""hello world""#), Some(r#""hello world""#));
        assert_eq!(read_quoted(r#""hello world" foo bar"#), Some(r#""hello world""#));
        assert_eq!(read_quoted(r#""hello \" world""#), Some(r#""hello \" world""#));
        assert_eq!(read_quoted(r#""hello \\" world""#), Some(r#""hello \\""#));
        assert_eq!(
            read_quoted(r#""hello \\\" world""#),
            Some(r#""hello \\\" world""#)
        );
        assert_eq!(read_quoted(r#"'hello " world'"#), Some(r#"'hello " world'"#));
        assert_eq!(read_quoted("`hello \" world`"), Some("`hello \" world`"));
    }
}
