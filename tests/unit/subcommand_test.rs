//! Unit tests for kubectl argument inspection

use kubecolor::kubectl::{inspect_subcommand_info, OutputFormat, Subcommand, SubcommandInfo};

use super::helpers::{args, StubPlugins};

fn inspect(list: &[&str]) -> SubcommandInfo {
    inspect_subcommand_info(&args(list), &StubPlugins(vec!["whoami", "view_secret"]))
}

#[test]
fn global_flags_before_subcommand_are_skipped() {
    let info = inspect(&["--context", "prod", "-n", "kube-system", "get", "pods"]);
    assert_eq!(info.subcommand, Subcommand::Get);
    assert_eq!(info.args, args(&["pods"]));
    assert!(!info.help);
}

#[test]
fn output_format_controls_coloring() {
    assert!(inspect(&["get", "pods", "-o", "yaml"]).supports_coloring());
    assert!(inspect(&["get", "pods", "-owide"]).supports_coloring());
    assert!(!inspect(&["get", "pods", "-o", "name"]).supports_coloring());
    assert!(!inspect(&["get", "pods", "-o", "jsonpath={.items}"]).supports_coloring());
    assert_eq!(
        inspect(&["get", "pods", "--output=custom-columns=NAME:.metadata.name"]).output,
        OutputFormat::CustomColumns
    );
}

#[test]
fn watched_structured_output_is_not_colored() {
    assert!(!inspect(&["get", "pods", "-w", "-o", "json"]).supports_coloring());
    assert!(inspect(&["get", "pods", "--watch"]).supports_coloring());
}

#[test]
fn interactive_subcommands_are_not_colored() {
    for sub in ["exec", "attach", "edit", "port-forward", "completion"] {
        assert!(!inspect(&[sub, "x"]).supports_coloring(), "{}", sub);
    }
}

#[test]
fn pager_only_for_finite_output() {
    assert!(inspect(&["get", "pods"]).supports_pager());
    assert!(!inspect(&["get", "pods", "-w"]).supports_pager());
    assert!(!inspect(&["logs", "-f", "nginx"]).supports_pager());
    assert!(!inspect(&["apply", "-k", "."]).supports_pager());
}

#[test]
fn plugins_are_recognized() {
    assert_eq!(inspect(&["whoami"]).subcommand, Subcommand::KubectlPlugin);
    assert_eq!(
        inspect(&["view-secret", "db"]).subcommand,
        Subcommand::KubectlPlugin
    );
}

#[test]
fn unknown_command_means_help() {
    let info = inspect(&["frobnicate"]);
    assert_eq!(info.subcommand, Subcommand::Unknown);
    assert!(info.help);
    assert!(inspect(&[]).help);
}

#[test]
fn completion_requests_are_detected() {
    assert_eq!(inspect(&["__complete", "get", ""]).subcommand, Subcommand::Complete);
    assert_eq!(
        inspect(&["__completeNoDesc", "get", ""]).subcommand,
        Subcommand::Complete
    );
}
