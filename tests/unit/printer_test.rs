//! Unit tests for printers fed with recorded kubectl output

use kubecolor::utils::text::strip_sgr;
use regex::bytes::Regex;

use super::helpers::{dark_theme, load_fixture, render, render_bytes};

/// (kubectl arguments, fixture) pairs covering each printer family.
const CASES: &[(&[&str], &str)] = &[
    (&["get", "pods"], "get_pods.txt"),
    (&["get", "pods", "-o", "wide"], "get_pods.txt"),
    (&["get", "pod", "nginx", "-o", "json"], "pod.json"),
    (&["get", "pod", "nginx", "-o", "yaml"], "pod.yaml"),
    (&["describe", "pod", "nginx"], "describe_pod.txt"),
    (&["logs", "nginx"], "logs.txt"),
    (&["apply", "-f", "deploy.yaml"], "apply.txt"),
];

#[test]
fn coloring_never_changes_the_text() {
    let theme = dark_theme();
    for (args, fixture) in CASES {
        let input = load_fixture(fixture);
        let output = render(&theme, args, &input);
        assert_ne!(output, input, "{:?} left uncolored", args);
        assert_eq!(strip_sgr(&output), input, "{:?} changed the text", args);
    }
}

#[test]
fn describe_status_uses_status_colors() {
    let output = render(&dark_theme(), &["describe", "pod", "nginx"], &load_fixture("describe_pod.txt"));
    assert!(output.contains("\x1b[32mRunning\x1b[0m"));
}

#[test]
fn yaml_top_level_keys_use_first_key_color() {
    let output = render(&dark_theme(), &["get", "pod", "-o", "yaml"], &load_fixture("pod.yaml"));
    assert!(output.starts_with("\x1b[96mapiVersion\x1b[0m: "));
}

#[test]
fn help_flag_uses_help_printer_for_any_subcommand() {
    let output = render(&dark_theme(), &["get", "--help"], "Usage:\n  kubectl get [flags]\n");
    assert_eq!(strip_sgr(&output), "Usage:\n  kubectl get [flags]\n");
}

#[test]
fn unknown_output_goes_through_default_color() {
    let output = render(&dark_theme(), &["cordon", "node-1"], "node/node-1 cordoned\n");
    assert_eq!(strip_sgr(&output), "node/node-1 cordoned\n");
    assert!(output.contains('\x1b'));
}

#[test]
fn lines_that_are_not_utf8_pass_through_unchanged() {
    let theme = dark_theme();
    let input: &[u8] = b"caf\xe9 ok\n";
    const VERSION: &[&str] = &["version", "-o", "json"];
    for args in CASES.iter().map(|(args, _)| *args).chain([VERSION]) {
        assert_eq!(render_bytes(&theme, args, input), input, "{:?}", args);
    }
}

#[test]
fn bytes_line_keeps_its_place_among_colored_rows() {
    let input: &[u8] = b"NAME    AGE\nweb     1d\n\xff\xfe\ndb      2d\n";
    let output = render_bytes(&dark_theme(), &["get", "pods"], input);
    let sgr = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    assert_ne!(output, input);
    assert_eq!(sgr.replace_all(&output, &b""[..]).as_ref(), input);
}
