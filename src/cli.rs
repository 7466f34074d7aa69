//! CLI definitions for kubecolor
//!
//! kubecolor takes kubectl's arguments verbatim, so the clap definition is a
//! single trailing argument list. Kubecolor's own flags are picked out of it
//! later (see [`crate::config::FLAGS`]); they are listed here for `xtask`
//! documentation generation.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;

use crate::config::{FlagKind, FLAGS};

/// Build clap styles matching the default dark theme.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Help section describing kubecolor's own flags.
pub fn kubecolor_flags_help() -> String {
    let mut out = String::from("Kubecolor flags (may appear anywhere among the kubectl arguments):\n");
    for flag in FLAGS {
        let usage = match flag.kind {
            FlagKind::Bool => flag.name.to_string(),
            FlagKind::OptionalValue => format!("{}[=VALUE]", flag.name),
            FlagKind::RequiredValue => format!("{}=VALUE", flag.name),
        };
        out.push_str(&format!("  {:<28} {}\n", usage, flag.description));
    }
    out
}

#[derive(Parser, Debug)]
#[command(name = "kubecolor")]
#[command(about = "Colorize your kubectl output")]
#[command(
    long_about = "kubecolor runs kubectl with the given arguments and colorizes its output.

EXAMPLES:
    kubecolor get pods                      Colored pod table
    kubecolor describe pod nginx            Colored describe tree
    kubecolor get pods --force-colors | less -R
    kubectl get pods -o yaml | kubecolor get pods -o yaml --kubecolor-stdin

CONFIGURATION:
    ~/.kube/color.toml (or $KUBECOLOR_CONFIG), KUBECOLOR_* environment variables,
    then the kubecolor flags below."
)]
#[command(after_long_help = kubecolor_flags_help())]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Arguments for kubectl, kubecolor flags included
    #[arg(
        value_name = "KUBECTL_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub args: Vec<String>,
}
