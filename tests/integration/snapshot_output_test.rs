//! Colored output snapshots
//!
//! Each test replays a fixture through the binary with `--kubecolor-stdin`
//! and forced colors. Escapes are shown as `<code>` tokens.

use super::helpers::{fixture_arg, kubecolor, run_kubecolor, SGR_FILTERS};

fn colored(args: &[&str], fixture: &str) -> String {
    let (stdout, stderr, exit_code) = run_kubecolor(
        kubecolor()
            .args(args)
            .arg("--force-colors")
            .arg(fixture_arg(fixture)),
    );
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    stdout
}

#[test]
fn snapshot_get_pods() {
    let output = colored(&["get", "pods"], "get_pods.txt");
    insta::with_settings!({ filters => SGR_FILTERS.to_vec() }, {
        insta::assert_snapshot!(output, @r"
<1>NAME          READY   STATUS             RESTARTS   AGE<0>
<37>nginx-dnmv5<0>   <36>1/1<0>     <32>Running<0>            <36>0<0>          <37>6d6h<0>
<37>web-7f9c<0>      <33>0/1<0>     <31>CrashLoopBackOff<0>   <36>12<0>         <37>2m<0>
<37>job-xk2p<0>      <33>0/1<0>     <32>Completed<0>          <36>0<0>          <37>3h<0>
");
    });
}

#[test]
fn snapshot_get_pods_fresh_ages() {
    let (stdout, _, _) = run_kubecolor(
        kubecolor()
            .env("KUBECOLOR_OBJ_FRESH", "5m")
            .args(["get", "pods", "--force-colors", &fixture_arg("get_pods.txt")]),
    );
    insta::with_settings!({ filters => SGR_FILTERS.to_vec() }, {
        insta::assert_snapshot!(stdout, @r"
<1>NAME          READY   STATUS             RESTARTS   AGE<0>
<37>nginx-dnmv5<0>   <36>1/1<0>     <32>Running<0>            <36>0<0>          <37>6d6h<0>
<37>web-7f9c<0>      <33>0/1<0>     <31>CrashLoopBackOff<0>   <36>12<0>         <32>2m<0>
<37>job-xk2p<0>      <33>0/1<0>     <32>Completed<0>          <36>0<0>          <37>3h<0>
");
    });
}

#[test]
fn snapshot_apply() {
    let output = colored(&["apply", "-f", "deploy.yaml"], "apply.txt");
    insta::with_settings!({ filters => SGR_FILTERS.to_vec() }, {
        insta::assert_snapshot!(output, @r"
deployment.apps/nginx <32>created<0>
service/nginx <33>configured<0>
configmap/settings <35>unchanged<0>
");
    });
}

#[test]
fn snapshot_get_json() {
    let output = colored(&["get", "pod", "nginx", "-o", "json"], "pod.json");
    insta::with_settings!({ filters => SGR_FILTERS.to_vec() }, {
        insta::assert_snapshot!(output, @r#"
{
    "<36>apiVersion<0>": "<93>v1<0>",
    "<36>kind<0>": "<93>Pod<0>",
    "<36>metadata<0>": {
        "<96>name<0>": "<93>nginx<0>",
        "<96>generation<0>": <35>2<0>
    },
    "<36>spec<0>": {
        "<96>hostNetwork<0>": <32>true<0>
    }
}
"#);
    });
}

#[test]
fn theme_override_from_environment() {
    let (stdout, _, _) = run_kubecolor(
        kubecolor()
            .env("KUBECOLOR_THEME_APPLY_CREATED", "blue")
            .args(["apply", "--force-colors", &fixture_arg("apply.txt")]),
    );
    assert!(stdout.starts_with("deployment.apps/nginx \x1b[34mcreated\x1b[0m\n"));
}

#[test]
fn light_background_changes_colors() {
    let dark = colored(&["get", "pods"], "get_pods.txt");
    let light = colored(&["get", "pods", "--light-background"], "get_pods.txt");
    assert_ne!(dark, light);
    assert!(light.contains("\x1b[32mRunning\x1b[0m"));
}
