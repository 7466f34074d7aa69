//! Integration tests for waiting on kubectl through ProcessGuard

use std::process::Command;
use std::time::Duration;

use kubecolor::command::KubectlExit;
use kubecolor::utils::process_guard::ProcessGuard;

fn sh(script: &str) -> std::process::Child {
    Command::new("sh")
        .args(["-c", script])
        .spawn()
        .expect("failed to spawn sh")
}

#[test]
fn successful_child_is_not_an_error() {
    let guard = ProcessGuard::new();
    let status = guard.wait_or_kill(&mut sh("exit 0")).unwrap();
    assert!(status.success());
    assert!(!guard.is_interrupted());
}

#[test]
fn exit_code_is_carried_into_kubectl_exit() {
    let guard = ProcessGuard::new().with_grace_period(Duration::from_millis(200));
    let status = guard.wait_or_kill(&mut sh("exit 42")).unwrap();
    assert_eq!(KubectlExit::from_status(status), KubectlExit { code: 42 });
}

#[cfg(unix)]
#[test]
fn child_killed_by_signal_maps_to_exit_code_one() {
    let guard = ProcessGuard::new();
    let status = guard.wait_or_kill(&mut sh("kill -TERM $$")).unwrap();
    assert_eq!(status.code(), None);
    assert_eq!(KubectlExit::from_status(status).code, 1);
}

#[test]
fn child_output_is_not_consumed() {
    let guard = ProcessGuard::new();
    let mut child = Command::new("sh")
        .args(["-c", "echo pods"])
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdout = child.stdout.take().unwrap();
    let status = guard.wait_or_kill(&mut child).unwrap();
    let mut text = String::new();
    std::io::Read::read_to_string(&mut stdout, &mut text).unwrap();
    assert!(status.success());
    assert_eq!(text, "pods\n");
}
