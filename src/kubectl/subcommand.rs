use std::fmt;

use super::plugin::{is_plugin, PluginLookup};

/// A kubectl subcommand that kubecolor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subcommand {
    /// No subcommand found; kubectl prints its help.
    #[default]
    Unknown,
    /// An external `kubectl-*` executable.
    KubectlPlugin,
    /// `__complete` and friends, used by shell completion.
    Complete,

    ApiResources,
    ApiVersions,
    Annotate,
    Apply,
    Attach,
    Auth,
    Autoscale,
    Certificate,
    ClusterInfo,
    Completion,
    Config,
    Convert,
    Cordon,
    Cp,
    Create,
    Ctx,
    Debug,
    Delete,
    Describe,
    Diff,
    Drain,
    Edit,
    Events,
    Exec,
    Explain,
    Expose,
    Get,
    Kustomize,
    Label,
    Logs,
    Ns,
    Options,
    Patch,
    Plugin,
    PortForward,
    Proxy,
    Replace,
    Rollout,
    Run,
    Scale,
    Set,
    Taint,
    Top,
    Uncordon,
    Version,
    Wait,
    /// OpenShift `oc rsh`.
    Rsh,
}

impl Subcommand {
    const NAMED: [Subcommand; 47] = [
        Self::ApiResources,
        Self::ApiVersions,
        Self::Annotate,
        Self::Apply,
        Self::Attach,
        Self::Auth,
        Self::Autoscale,
        Self::Certificate,
        Self::ClusterInfo,
        Self::Completion,
        Self::Config,
        Self::Convert,
        Self::Cordon,
        Self::Cp,
        Self::Create,
        Self::Ctx,
        Self::Debug,
        Self::Delete,
        Self::Describe,
        Self::Diff,
        Self::Drain,
        Self::Edit,
        Self::Events,
        Self::Exec,
        Self::Explain,
        Self::Expose,
        Self::Get,
        Self::Kustomize,
        Self::Label,
        Self::Logs,
        Self::Ns,
        Self::Options,
        Self::Patch,
        Self::Plugin,
        Self::PortForward,
        Self::Proxy,
        Self::Replace,
        Self::Rollout,
        Self::Run,
        Self::Scale,
        Self::Set,
        Self::Taint,
        Self::Top,
        Self::Uncordon,
        Self::Version,
        Self::Wait,
        Self::Rsh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::KubectlPlugin => "(plugin)",
            Self::Complete => "__complete",
            Self::ApiResources => "api-resources",
            Self::ApiVersions => "api-versions",
            Self::Annotate => "annotate",
            Self::Apply => "apply",
            Self::Attach => "attach",
            Self::Auth => "auth",
            Self::Autoscale => "autoscale",
            Self::Certificate => "certificate",
            Self::ClusterInfo => "cluster-info",
            Self::Completion => "completion",
            Self::Config => "config",
            Self::Convert => "convert",
            Self::Cordon => "cordon",
            Self::Cp => "cp",
            Self::Create => "create",
            Self::Ctx => "ctx",
            Self::Debug => "debug",
            Self::Delete => "delete",
            Self::Describe => "describe",
            Self::Diff => "diff",
            Self::Drain => "drain",
            Self::Edit => "edit",
            Self::Events => "events",
            Self::Exec => "exec",
            Self::Explain => "explain",
            Self::Expose => "expose",
            Self::Get => "get",
            Self::Kustomize => "kustomize",
            Self::Label => "label",
            Self::Logs => "logs",
            Self::Ns => "ns",
            Self::Options => "options",
            Self::Patch => "patch",
            Self::Plugin => "plugin",
            Self::PortForward => "port-forward",
            Self::Proxy => "proxy",
            Self::Replace => "replace",
            Self::Rollout => "rollout",
            Self::Run => "run",
            Self::Scale => "scale",
            Self::Set => "set",
            Self::Taint => "taint",
            Self::Top => "top",
            Self::Uncordon => "uncordon",
            Self::Version => "version",
            Self::Wait => "wait",
            Self::Rsh => "rsh",
        }
    }

    /// Looks up a subcommand by the word typed on the command line.
    pub fn from_arg(arg: &str) -> Option<Self> {
        if arg.starts_with("__complete") {
            return Some(Self::Complete);
        }
        Self::NAMED.into_iter().find(|s| s.as_str() == arg)
    }

    /// Interactive or machine-facing subcommands whose output must not be
    /// touched.
    pub fn supports_coloring(&self) -> bool {
        !matches!(
            self,
            Self::Attach
                | Self::Completion
                | Self::Complete
                | Self::Ctx
                | Self::Debug
                | Self::Edit
                | Self::Exec
                | Self::KubectlPlugin
                | Self::Ns
                | Self::Plugin
                | Self::PortForward
                | Self::Proxy
                | Self::Run
                | Self::Wait
                | Self::Rsh
        )
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of `-o`/`--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    None,
    Wide,
    Json,
    Yaml,
    Name,
    CustomColumns,
    CustomColumnsFile,
    GoTemplate,
    Jsonpath,
    Other,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        let (name, _) = value.split_once('=').unwrap_or((value, ""));
        match name {
            "" => Self::None,
            "wide" => Self::Wide,
            "json" => Self::Json,
            "yaml" => Self::Yaml,
            "name" => Self::Name,
            "custom-columns" => Self::CustomColumns,
            "custom-columns-file" => Self::CustomColumnsFile,
            "go-template" | "go-template-file" | "template" | "templatefile" => Self::GoTemplate,
            "jsonpath" | "jsonpath-file" | "jsonpath-as-json" => Self::Jsonpath,
            _ => Self::Other,
        }
    }

    /// Formats kubecolor can color.
    pub fn is_colorable(&self) -> bool {
        matches!(self, Self::None | Self::Wide | Self::Json | Self::Yaml)
    }
}

/// What kubecolor learned from the kubectl arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcommandInfo {
    pub subcommand: Subcommand,
    pub output: OutputFormat,
    pub no_header: bool,
    pub watch: bool,
    pub follow: bool,
    pub help: bool,
    pub recursive: bool,
    pub client: bool,
    pub short: bool,
    pub list: bool,
    /// Positional arguments after the subcommand, e.g. `["can-i", "get"]`
    /// for `auth can-i get pods`.
    pub args: Vec<String>,
}

impl SubcommandInfo {
    pub fn supports_coloring(&self) -> bool {
        if !self.subcommand.supports_coloring() || !self.output.is_colorable() {
            return false;
        }
        // Watched JSON/YAML is a stream of documents without indentation hints.
        !(self.watch && matches!(self.output, OutputFormat::Json | OutputFormat::Yaml))
    }

    /// Paging only makes sense for output that ends.
    pub fn supports_pager(&self) -> bool {
        if self.watch || self.follow {
            return false;
        }
        self.help
            || matches!(
                self.subcommand,
                Subcommand::Unknown
                    | Subcommand::Get
                    | Subcommand::Describe
                    | Subcommand::Explain
                    | Subcommand::Events
                    | Subcommand::Logs
                    | Subcommand::ApiResources
                    | Subcommand::ApiVersions
                    | Subcommand::Diff
                    | Subcommand::Top
                    | Subcommand::Options
            )
    }
}

/// kubectl flags that take a separate value, so the value is not mistaken
/// for a subcommand (`kubectl --context prod get pods`).
const FLAGS_WITH_VALUE: &[&str] = &[
    "-n",
    "--namespace",
    "--context",
    "--kubeconfig",
    "--cluster",
    "--user",
    "-s",
    "--server",
    "--token",
    "--as",
    "--as-group",
    "--as-uid",
    "--cache-dir",
    "--certificate-authority",
    "--client-certificate",
    "--client-key",
    "--request-timeout",
    "--tls-server-name",
    "-v",
    "--v",
    "--log-file",
    "-l",
    "--selector",
    "-c",
    "--container",
    "--filename",
    "-o",
    "--output",
];

/// Splits a flag and its value, e.g. `-owide`, `-o=wide`, `--output=wide`
/// or `--output wide`.
///
/// Returns empty strings for an empty slice; the value is empty when there
/// is none.
pub fn parse_arg_flag(args: &[String]) -> (&str, &str) {
    let Some(first) = args.first() else {
        return ("", "");
    };
    let next = || args.get(1).map_or("", String::as_str);

    if first.starts_with("--") {
        return match first.split_once('=') {
            Some((flag, value)) => (flag, value),
            None => (first.as_str(), next()),
        };
    }

    if first.starts_with('-') && first.len() > 2 && first.is_char_boundary(2) {
        let (flag, rest) = first.split_at(2);
        let value = rest.strip_prefix('=').unwrap_or(rest);
        return (flag, value);
    }

    (first.as_str(), next())
}

fn parse_bool_flag(arg: &str, name: &str) -> Option<bool> {
    let rest = arg.strip_prefix(name)?;
    match rest {
        "" => Some(true),
        "=true" => Some(true),
        "=false" => Some(false),
        _ => None,
    }
}

fn collect_flags(args: &[String], info: &mut SubcommandInfo) {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            break;
        }
        if arg.starts_with("--output") || (arg.starts_with("-o") && !arg.starts_with("--")) {
            let (flag, value) = parse_arg_flag(&args[i..]);
            if flag == "-o" || flag == "--output" {
                info.output = OutputFormat::parse(value);
            }
            continue;
        }
        if let Some(client) = arg.strip_prefix("--client") {
            match client {
                "" => info.client = true,
                "=false" => info.client = false,
                _ if client.starts_with('=') => info.client = true,
                _ => {}
            }
            continue;
        }
        match arg.as_str() {
            "-w" | "--watch" | "--watch-only" => info.watch = true,
            "-f" | "--follow" => info.follow = true,
            "-h" | "--help" => info.help = true,
            "--short" => info.short = true,
            _ => {
                if let Some(v) = parse_bool_flag(arg, "--no-headers") {
                    info.no_header = v;
                } else if let Some(v) = parse_bool_flag(arg, "--recursive") {
                    info.recursive = v;
                } else if let Some(v) = parse_bool_flag(arg, "--list") {
                    info.list = v;
                } else if let Some(v) = parse_bool_flag(arg, "--follow") {
                    info.follow = v;
                } else if let Some(v) = parse_bool_flag(arg, "--watch") {
                    info.watch = v;
                }
            }
        }
    }
}

/// Positional (non-flag) arguments before `--`, skipping the values of
/// flags known to take one.
fn positional(args: &[String]) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            break;
        }
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with('-') {
            skip_next = FLAGS_WITH_VALUE.contains(&arg.as_str());
            continue;
        }
        out.push((i, arg.as_str()));
    }
    out
}

/// Inspects kubectl arguments (without the program name).
///
/// When the first positional argument is neither a subcommand nor a
/// plugin, kubectl prints its help, so `help` is set.
pub fn inspect_subcommand_info(args: &[String], plugins: &dyn PluginLookup) -> SubcommandInfo {
    let mut info = SubcommandInfo::default();
    collect_flags(args, &mut info);

    let positional = positional(args);
    let Some(&(index, first)) = positional.first() else {
        info.help = true;
        return info;
    };

    match Subcommand::from_arg(first) {
        Some(subcommand) => {
            info.subcommand = subcommand;
            info.args = positional[1..]
                .iter()
                .map(|(_, arg)| arg.to_string())
                .collect();
        }
        None if is_plugin(&args[index..], plugins) => {
            info.subcommand = Subcommand::KubectlPlugin;
        }
        None => info.help = true,
    }
    info
}
