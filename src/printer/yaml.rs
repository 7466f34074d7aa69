//! YAML output, e.g. `kubectl get -o yaml`.

use std::io::{self, Write};

use super::classify::value_color;
use super::{next_text_line, Printer};
use crate::scanner::LineSource;
use crate::theme::Theme;
use crate::utils::text::{cut_surrounding_quotes, find_indent};

const BLOCK_INDICATORS: [&str; 6] = ["|-", "|+", "|", ">-", ">+", ">"];

pub struct YamlPrinter<'a> {
    theme: &'a Theme,
    /// Inside a quoted string that spans several lines.
    in_string: bool,
    /// Column where the current block scalar's text starts, when inside one.
    block_indent: Option<usize>,
    /// The previous line opened a block scalar without an explicit indent.
    next_line_sets_indent: bool,
}

impl<'a> YamlPrinter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            in_string: false,
            block_indent: None,
            next_line_sets_indent: false,
        }
    }

    fn colorize_line(&mut self, line: &str) -> String {
        let indent_len = find_indent(line);
        let (indent, trimmed) = line.split_at(indent_len);

        if self.next_line_sets_indent {
            self.next_line_sets_indent = false;
            self.block_indent = Some(indent_len).filter(|n| *n > 0);
        }

        if let Some(block) = self.block_indent {
            if indent_len >= block {
                let (head, text) = line.split_at(block);
                return format!("{}{}", head, self.theme.data.string.render(text));
            }
            self.block_indent = None;
        }

        if self.in_string {
            self.in_string = !trimmed.ends_with(['"', '\'']);
            return format!("{}{}", indent, self.colorize_string_continuation(trimmed));
        }

        if let Some((key, value)) = trimmed.split_once(": ") {
            let key = self.colorize_key(key, indent_len);

            if let Some((indicator, rest)) = BLOCK_INDICATORS
                .iter()
                .find_map(|p| value.strip_prefix(p).map(|rest| (*p, rest)))
            {
                if rest.is_empty() {
                    self.next_line_sets_indent = true;
                    return format!("{}{}: {}", indent, key, indicator);
                }
                if let Ok(n) = rest.parse::<usize>() {
                    self.block_indent = Some(indent_len + n).filter(|n| *n > 0);
                    return format!(
                        "{}{}: {}{}",
                        indent,
                        key,
                        indicator,
                        self.colorize_value(rest)
                    );
                }
            }

            for quote in ['"', '\''] {
                if let Some(after) = value.strip_prefix(quote) {
                    if !after.ends_with(quote) {
                        self.in_string = true;
                        return format!(
                            "{}{}: {}{}",
                            indent,
                            key,
                            quote,
                            self.theme.data.string.render(after)
                        );
                    }
                }
            }

            return format!("{}{}: {}", indent, key, self.colorize_value(value));
        }

        if trimmed.ends_with(':') {
            return format!("{}{}", indent, self.colorize_key(trimmed, indent_len));
        }

        format!("{}{}", indent, self.colorize_value(trimmed))
    }

    fn colorize_key(&self, key: &str, mut indent: usize) -> String {
        let (key, colon) = match key.strip_suffix(':') {
            Some(k) => (k, ":"),
            None => (key, ""),
        };
        let (key, dash) = match key.strip_prefix("- ") {
            Some(k) => {
                indent += 2;
                (k, "- ")
            }
            None => (key, ""),
        };
        let color = self.theme.data.key.for_indent(indent, 2);
        format!("{}{}{}", dash, color.render(key), colon)
    }

    fn colorize_value(&self, value: &str) -> String {
        if matches!(value, "{}" | "- {}" | "[]" | "- []") {
            return value.to_string();
        }
        let (value, dash) = match value.strip_prefix("- ") {
            Some(v) => (v, "- "),
            None => (value, ""),
        };
        match cut_surrounding_quotes(value, &['"', '\'']) {
            (inner, Some(q)) if value.len() >= 2 => {
                format!("{}{}{}{}", dash, q, self.theme.data.string.render(inner), q)
            }
            _ => format!("{}{}", dash, value_color(value, self.theme).render(value)),
        }
    }

    fn colorize_string_continuation(&self, text: &str) -> String {
        match text.strip_suffix(['"', '\'']) {
            Some(before) => format!(
                "{}{}",
                self.theme.data.string.render(before),
                &text[before.len()..]
            ),
            None => self.theme.data.string.render(text),
        }
    }
}

impl Printer for YamlPrinter<'_> {
    fn print(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        while let Some(line) = next_text_line(input, out)? {
            let colored = self.colorize_line(&line);
            writeln!(out, "{}", colored)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testutil::{dark, print_to_string};
    use crate::utils::text::strip_sgr;

    const DOC: &str = "apiVersion: v1
kind: Pod
metadata:
  annotations:
    annotation.long.1: 'Sit eu ea cillum
      exercitation duis sint.'
    annotation.long.2: \"Lorem ipsum
      dolor sit amet\"
  labels: {}
  finalizers:
  - first
  - \"second\"
spec:
  script: |
    echo hello
    exit 1
  count: 3
  enabled: true
  cpu: 250m
  list:
  - name: nginx
    image: nginx:1.25
";

    #[test]
    fn strips_back_to_input() {
        let theme = dark();
        let out = print_to_string(&mut YamlPrinter::new(&theme), DOC);
        assert_eq!(strip_sgr(&out), DOC);
    }

    #[test]
    fn multiline_quoted_string() {
        let theme = dark();
        let out = print_to_string(&mut YamlPrinter::new(&theme), DOC);
        let s = &theme.data.string;
        assert!(out.contains(&format!(
            "    {}: '{}\n",
            theme.data.key.for_indent(4, 2).render("annotation.long.1"),
            s.render("Sit eu ea cillum")
        )));
        assert!(out.contains(&format!("      {}'\n", s.render("exercitation duis sint."))));
        assert!(out.contains(&format!("      {}\"\n", s.render("dolor sit amet"))));
        // back to key mode after the closing quote
        assert!(out.contains(&format!(
            "  {}: {{}}\n",
            theme.data.key.for_indent(2, 2).render("labels")
        )));
    }

    #[test]
    fn block_scalar_is_string() {
        let theme = dark();
        let out = print_to_string(&mut YamlPrinter::new(&theme), DOC);
        let s = &theme.data.string;
        assert!(out.contains(&format!("    {}\n", s.render("echo hello"))));
        assert!(out.contains(&format!("    {}\n", s.render("exit 1"))));
        assert!(out.contains(&format!(
            "  {}: {}\n",
            theme.data.key.for_indent(2, 2).render("count"),
            theme.data.number.render("3")
        )));
    }

    #[test]
    fn list_items() {
        let theme = dark();
        let out = print_to_string(&mut YamlPrinter::new(&theme), DOC);
        assert!(out.contains(&format!("  - {}\n", theme.data.string.render("first"))));
        assert!(out.contains(&format!("  - \"{}\"\n", theme.data.string.render("second"))));
        assert!(out.contains(&format!(
            "  - {}: {}\n",
            theme.data.key.for_indent(4, 2).render("name"),
            theme.data.string.render("nginx")
        )));
        assert!(out.contains(&format!(
            "  {}: {}\n",
            theme.data.key.for_indent(2, 2).render("cpu"),
            theme.data.quantity.render("250m")
        )));
    }
}
