//! Pretty-printed JSON, e.g. `kubectl get -o json`.

use std::io::{self, Write};

use super::classify::value_color;
use super::{for_each_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;
use crate::utils::text::find_indent;

pub struct JsonPrinter<'a> {
    theme: &'a Theme,
}

impl<'a> JsonPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn colorize_line(&self, line: &str) -> String {
        let indent_len = find_indent(line);
        let (indent, trimmed) = line.split_at(indent_len);

        if trimmed.starts_with(['{', '}', ']']) {
            return line.to_string();
        }

        match trimmed.split_once(": ") {
            Some((key, value)) => format!(
                "{}{}: {}",
                indent,
                self.colorize_key(key, indent_len),
                self.colorize_value(value)
            ),
            None => format!("{}{}", indent, self.colorize_value(trimmed)),
        }
    }

    fn colorize_key(&self, key: &str, indent: usize) -> String {
        let color = self.theme.data.key.for_indent(indent, 4);
        match strip_quotes(key) {
            Some(inner) => format!("\"{}\"", color.render(inner)),
            None => color.render(key),
        }
    }

    fn colorize_value(&self, value: &str) -> String {
        if matches!(value, "{" | "[" | "{}" | "{}," | "[]" | "[],") {
            return value.to_string();
        }
        let (value, comma) = match value.strip_suffix(',') {
            Some(v) => (v, ","),
            None => (value, ""),
        };
        match strip_quotes(value) {
            Some(inner) => format!("\"{}\"{}", self.theme.data.string.render(inner), comma),
            None => format!("{}{}", value_color(value, self.theme).render(value), comma),
        }
    }
}

/// Inner text of a `"..."` string, removing exactly one quote per side.
fn strip_quotes(s: &str) -> Option<&str> {
    if s.len() < 2 {
        return None;
    }
    s.strip_prefix('"')?.strip_suffix('"')
}

impl Printer for JsonPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        for_each_line(input, out, |line| self.colorize_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testutil::{dark, print_to_string};
    use crate::utils::text::strip_sgr;

    const POD: &str = r#"{
    "apiVersion": "v1",
    "kind": "Pod",
    "num": 598,
    "bool": true,
    "null": null,
    "quantity": 100m,
    "metadata": {
        "labels": {},
        "finalizers": [
            "a",
            "b\""
        ],
        "empty": []
    }
}
"#;

    #[test]
    fn keys_by_depth_values_by_class() {
        let theme = dark();
        let out = print_to_string(&mut JsonPrinter::new(&theme), POD);
        let k0 = theme.data.key.for_indent(4, 4);
        let k1 = theme.data.key.for_indent(8, 4);
        assert!(out.contains(&format!(
            "    \"{}\": {},\n",
            k0.render("num"),
            theme.data.number.render("598")
        )));
        assert!(out.contains(&format!(
            "    \"{}\": {},\n",
            k0.render("bool"),
            theme.data.r#true.render("true")
        )));
        assert!(out.contains(&format!(
            "    \"{}\": {},\n",
            k0.render("null"),
            theme.data.null.render("null")
        )));
        assert!(out.contains(&format!(
            "    \"{}\": \"{}\",\n",
            k0.render("kind"),
            theme.data.string.render("Pod")
        )));
        assert!(out.contains(&format!("        \"{}\": {{}},\n", k1.render("labels"))));
        assert!(out.contains(&format!("            \"{}\",\n", theme.data.string.render("a"))));
    }

    #[test]
    fn strips_back_to_input() {
        let theme = dark();
        let out = print_to_string(&mut JsonPrinter::new(&theme), POD);
        assert_eq!(strip_sgr(&out), POD);
    }

    #[test]
    fn escaped_quote_keeps_all_bytes() {
        let theme = dark();
        let input = "    \"b\\\"\"\n";
        let out = print_to_string(&mut JsonPrinter::new(&theme), input);
        assert_eq!(strip_sgr(&out), input);
    }
}
