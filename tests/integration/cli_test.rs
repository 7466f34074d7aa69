//! End-to-end tests of the kubecolor binary

use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use super::helpers::{fixture_arg, kubecolor, load_fixture, run_kubecolor, write_config};

#[test]
fn kubecolor_version_flag_prints_version() {
    let (stdout, stderr, exit_code) = run_kubecolor(kubecolor().arg("--kubecolor-version"));
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.starts_with(env!("CARGO_PKG_VERSION")));
}

#[test]
fn non_terminal_output_is_passed_through_untouched() {
    let (stdout, _, exit_code) =
        run_kubecolor(kubecolor().args(["get", "pods", &fixture_arg("get_pods.txt")]));
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, load_fixture("get_pods.txt"));
}

#[test]
fn plain_flag_disables_forced_colors() {
    let (stdout, _, exit_code) = run_kubecolor(kubecolor().args([
        "get",
        "pods",
        "--force-colors",
        "--plain",
        &fixture_arg("get_pods.txt"),
    ]));
    assert_eq!(exit_code, 0);
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn no_color_env_wins_over_forced_colors() {
    let (stdout, _, _) = run_kubecolor(
        kubecolor()
            .env("NO_COLOR", "1")
            .args(["get", "pods", "--force-colors", &fixture_arg("get_pods.txt")]),
    );
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn force_colors_env_colors_output() {
    let (stdout, _, _) = run_kubecolor(
        kubecolor()
            .env("KUBECOLOR_FORCE_COLORS", "true")
            .args(["get", "pods", &fixture_arg("get_pods.txt")]),
    );
    assert!(stdout.contains("\x1b[32mRunning\x1b[0m"));
}

#[test]
fn unsupported_subcommand_is_not_colored() {
    let (stdout, _, exit_code) = run_kubecolor(kubecolor().args([
        "exec",
        "nginx",
        "--force-colors",
        &fixture_arg("logs.txt"),
    ]));
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, load_fixture("logs.txt"));
}

#[test]
fn missing_stdin_file_is_reported() {
    let (_, stderr, exit_code) = run_kubecolor(kubecolor().args([
        "get",
        "pods",
        "--kubecolor-stdin=/nonexistent/kubecolor/input.txt",
    ]));
    assert_eq!(exit_code, 1);
    assert!(stderr.starts_with("[ERROR] [kubecolor]"), "stderr: {}", stderr);
    assert!(stderr.contains("--kubecolor-stdin"));
}

#[test]
fn invalid_flag_value_is_reported() {
    let (_, stderr, exit_code) = run_kubecolor(kubecolor().args(["get", "--plain=maybe"]));
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("flag --plain"), "stderr: {}", stderr);
}

#[test]
fn invalid_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "preset = \"no-such-preset\"\n");
    let (_, stderr, exit_code) = run_kubecolor(
        kubecolor()
            .env("KUBECOLOR_CONFIG", &config)
            .args(["get", "pods", &fixture_arg("get_pods.txt")]),
    );
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid preset in config file"), "stderr: {}", stderr);
}

#[test]
fn missing_kubectl_is_reported() {
    let (_, stderr, exit_code) = run_kubecolor(
        kubecolor()
            .env("KUBECTL_COMMAND", "/nonexistent/kubectl")
            .args(["get", "pods"]),
    );
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("kubectl must be installed"), "stderr: {}", stderr);
}

#[test]
fn help_output_lists_kubecolor_flags() {
    // `--help` goes to kubectl, so clap's long help is only reachable
    // through the library.
    use clap::CommandFactory;
    let help = kubecolor::cli::Cli::command().render_long_help().to_string();
    for flag in kubecolor::config::FLAGS {
        assert!(help.contains(flag.name), "{} missing from help", flag.name);
    }
}

#[cfg(unix)]
mod with_fake_kubectl {
    use super::*;
    use crate::helpers::fake_kubectl;

    const TABLE_AND_ERROR: &str = r#"echo "NAME    READY"
echo "nginx   1/1"
echo "error: something went wrong" >&2
exit 3"#;

    #[test]
    fn exit_code_is_propagated() {
        let temp = TempDir::new().unwrap();
        let kubectl = fake_kubectl(&temp, TABLE_AND_ERROR);
        let (stdout, _, exit_code) =
            run_kubecolor(kubecolor().env("KUBECTL_COMMAND", &kubectl).args(["get", "pods"]));
        assert_eq!(exit_code, 3);
        assert_eq!(stdout, "NAME    READY\nnginx   1/1\n");
    }

    #[test]
    fn stderr_is_colored_and_exit_code_kept() {
        let temp = TempDir::new().unwrap();
        let kubectl = fake_kubectl(&temp, TABLE_AND_ERROR);
        let (stdout, stderr, exit_code) = run_kubecolor(
            kubecolor()
                .env("KUBECTL_COMMAND", &kubectl)
                .args(["get", "pods", "--force-colors"]),
        );
        assert_eq!(exit_code, 3);
        assert!(stdout.starts_with("\x1b[1mNAME    READY\x1b[0m\n"), "stdout: {:?}", stdout);
        assert_eq!(stderr, "\x1b[31merror: something went wrong\x1b[0m\n");
    }

    #[test]
    fn arguments_reach_kubectl_without_kubecolor_flags() {
        let temp = TempDir::new().unwrap();
        let kubectl = fake_kubectl(&temp, r#"echo "$@""#);
        let (stdout, _, exit_code) = run_kubecolor(kubecolor().env("KUBECTL_COMMAND", &kubectl).args([
            "--light-background",
            "get",
            "pods",
            "--paging=never",
            "-n",
            "kube-system",
        ]));
        assert_eq!(exit_code, 0);
        assert_eq!(stdout, "get pods -n kube-system\n");
    }

    #[test]
    fn completion_merges_kubecolor_flags() {
        let temp = TempDir::new().unwrap();
        let kubectl = fake_kubectl(
            &temp,
            r#"printf '%s\t%s\n' '--no-headers' 'Hide headers' '--namespace' 'Namespace'
echo ':4'"#,
        );
        let mut cmd = kubecolor();
        cmd.env("KUBECTL_COMMAND", &kubectl)
            .args(["__complete", "get", "--no"]);
        let (stdout, stderr, exit_code) = run_kubecolor(&mut cmd);
        assert_eq!(exit_code, 0, "stderr: {}", stderr);
        assert!(stdout.contains("--no-headers\tHide headers\n"));
        assert!(stdout.contains("--no-paging\t"));
        assert!(!stdout.contains("--namespace"));
        assert!(stdout.ends_with(":4\n"), "stdout: {:?}", stdout);
    }

    #[test]
    fn kubectl_command_from_config_file() {
        let temp = TempDir::new().unwrap();
        let kubectl = fake_kubectl(&temp, r#"echo "from config""#);
        let config = write_config(
            temp.path(),
            &format!("kubectl = {:?}\n", kubectl.display().to_string()),
        );
        assert_cmd::Command::cargo_bin("kubecolor")
            .unwrap()
            .env_clear()
            .env("KUBECOLOR_CONFIG", &config)
            .args(["get", "pods"])
            .assert()
            .success()
            .stdout("from config\n")
            .stderr(contains("[ERROR]").not());
    }
}
