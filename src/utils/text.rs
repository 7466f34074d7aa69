//! Line and word helpers shared by the scanners and printers.

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Maximum size a single buffered line may grow to.
///
/// Sized for a base64-encoded 1 MiB Secret or ConfigMap value.
pub const MAX_LINE_LENGTH: usize = 1_500_000;

fn sgr_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[\d;?]*m").expect("valid regex"))
}

/// Remove all SGR escape sequences from `s`.
pub fn strip_sgr(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    sgr_pattern().replace_all(s, "")
}

/// Number of leading spaces.
pub fn find_indent(s: &str) -> usize {
    s.bytes().take_while(|b| *b == b' ').count()
}

/// Index of the first byte not in `charset`.
pub fn index_of_non_space(s: &str, charset: &[u8]) -> Option<usize> {
    s.bytes().position(|b| !charset.contains(&b))
}

/// Index of the first double space or tab, whichever comes first.
pub fn index_of_double_space(s: &str) -> Option<usize> {
    let space = s.find("  ");
    let tab = s.find('\t');
    match (space, tab) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Count columns separated by runs of two or more spaces (or tabs).
pub fn count_columns(s: &str, charset: &[u8]) -> usize {
    let mut rest = s;
    let mut count = 0;
    while let Some(start) = index_of_non_space(rest, charset) {
        rest = &rest[start..];
        count += 1;
        match index_of_double_space(rest) {
            Some(end) => rest = &rest[end..],
            None => break,
        }
    }
    count
}

/// True when every letter is uppercase and there is at least one letter.
pub fn is_all_upper(s: &str) -> bool {
    let mut has_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if !c.is_uppercase() {
                return false;
            }
            has_letter = true;
        }
    }
    has_letter
}

/// True for lines such as `----   -----` (punctuation and whitespace only).
pub fn is_only_symbols(s: &str) -> bool {
    let mut has_symbol = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            return false;
        }
        if c.is_ascii_punctuation() {
            has_symbol = true;
        }
    }
    has_symbol
}

pub fn is_only_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_only_letters(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// Split a ratio such as `"1/2"`. Both sides must be non-empty digits.
pub fn parse_ratio(s: &str) -> Option<(&str, &str)> {
    if s.matches('/').count() != 1 {
        return None;
    }
    let (left, right) = s.split_once('/')?;
    if is_only_digits(left) && is_only_digits(right) {
        Some((left, right))
    } else {
        None
    }
}

/// Parse kubectl's human readable ages, e.g. `"4m59s"`, `"6d6h"` or `"2y"`.
///
/// At most five `<number><unit>` chunks are accepted, units being
/// `y`, `d`, `h`, `m` and `s`.
pub fn parse_human_duration(s: &str) -> Option<Duration> {
    if s.is_empty() {
        return None;
    }
    let mut total: u64 = 0;
    let mut rest = s;
    let mut chunks = 0;
    while !rest.is_empty() {
        if chunks == 5 {
            return None;
        }
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let num: u64 = rest[..digits].parse().ok()?;
        let unit = rest[digits..].chars().next()?;
        let seconds = match unit {
            'y' => 365 * 24 * 3600,
            'd' => 24 * 3600,
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(num.checked_mul(seconds)?)?;
        rest = &rest[digits + 1..];
        chunks += 1;
    }
    Some(Duration::from_secs(total))
}

/// Strip one matching pair of surrounding quote characters from `s`.
///
/// Returns the inner text and the quote used, if any.
pub fn cut_surrounding_quotes<'a>(s: &'a str, quotes: &[char]) -> (&'a str, Option<char>) {
    let mut chars = s.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if first == last && quotes.contains(&first) {
            return (&s[1..s.len() - 1], Some(first));
        }
    }
    (s, None)
}
