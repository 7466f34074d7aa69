//! Every configurable theme key with its fallback chain.
//!
//! Entries are ordered so that a key only ever falls back to a key listed
//! before it; resolution is a single pass over [`KEYS`].

/// Whether a key holds one color or a `/`-separated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Color,
    Slice,
}

/// A theme key, e.g. `data.durationfresh`.
#[derive(Debug, Clone, Copy)]
pub struct ThemeKey {
    pub name: &'static str,
    pub kind: KeyKind,
    /// Keys whose resolved values are used when this one is unset.
    /// Several keys are joined into a color slice.
    pub fallback: &'static [&'static str],
    pub description: &'static str,
}

const fn color(
    name: &'static str,
    fallback: &'static [&'static str],
    description: &'static str,
) -> ThemeKey {
    ThemeKey {
        name,
        kind: KeyKind::Color,
        fallback,
        description,
    }
}

const fn slice(
    name: &'static str,
    fallback: &'static [&'static str],
    description: &'static str,
) -> ThemeKey {
    ThemeKey {
        name,
        kind: KeyKind::Slice,
        fallback,
        description,
    }
}

pub const KEYS: &[ThemeKey] = &[
    color("base.info", &[], "general color for when things are informational"),
    color("base.primary", &[], "general color for when things are focus"),
    color("base.secondary", &[], "general color for when things are secondary focus"),
    color("base.success", &[], "general color for when things are good"),
    color("base.warning", &[], "general color for when things are wrong"),
    color("base.danger", &[], "general color for when things are bad"),
    color("base.muted", &[], "general color for when things are less relevant"),
    slice("base.key", &["base.secondary"], "general color for keys"),
    color("default", &[], "default when no specific mapping is found for the command"),
    // shell
    color("shell.comment", &["base.muted"], "comments, e.g `# this is a comment`"),
    color("shell.command", &["base.success"], "commands, e.g `kubectl` or `echo`"),
    color("shell.arg", &["base.info"], "arguments, e.g `get pods` in `kubectl get pods`"),
    color("shell.flag", &["base.secondary"], "flags, e.g `--watch`"),
    // data
    slice("data.key", &["base.key"], "keys of key/value data"),
    color("data.string", &["base.info"], "string values"),
    color("data.true", &["base.success"], "values that are true"),
    color("data.false", &["base.danger"], "values that are false"),
    color("data.number", &["base.primary"], "numeric values"),
    color("data.null", &["base.muted"], "null, nil, or none values"),
    color("data.quantity", &["data.number"], "quantities, e.g \"100m\" or \"5Gi\""),
    color("data.duration", &["data.string"], "durations, e.g \"12m\" or \"1d12h\""),
    color("data.durationfresh", &["base.success"], "durations under the freshness threshold"),
    color("data.ratio.zero", &["base.muted"], "ratios like \"0/0\""),
    color("data.ratio.equal", &[], "ratios like \"1/1\""),
    color("data.ratio.unequal", &["base.warning"], "ratios like \"0/1\""),
    // status
    color("status.success", &["base.success"], "status words, e.g \"Running\", \"Ready\""),
    color("status.warning", &["base.warning"], "status words, e.g \"Terminating\""),
    color("status.error", &["base.danger"], "status words, e.g \"Failed\", \"Unhealthy\""),
    // table
    color("table.header", &["base.info"], "table headers"),
    slice(
        "table.columns",
        &["base.info", "base.secondary"],
        "table columns, cycled from left to right",
    ),
    // stderr
    color("stderr.error", &["base.danger"], "lines starting with \"error\""),
    color("stderr.nonefound", &["data.null"], "\"No resources found\""),
    color(
        "stderr.nonefoundnamespace",
        &["data.string"],
        "namespace name in \"No resources found in my-ns namespace\"",
    ),
    // describe
    slice("describe.key", &["data.key"], "describe keys, cycled by indentation"),
    // apply
    color("apply.created", &["base.success"], "\"deployment.apps/foo created\""),
    color("apply.configured", &["base.warning"], "\"deployment.apps/bar configured\""),
    color("apply.unchanged", &["base.primary"], "\"deployment.apps/quux unchanged\""),
    color("apply.serverside", &["base.warning"], "\"deployment.apps/quux serverside-applied\""),
    color("apply.dryrun", &["base.secondary"], "\"(dry run)\" and \"(server dry run)\""),
    color("apply.fallback", &["base.success"], "apply output in an unknown format"),
    // verbs
    color("create.created", &["base.success"], "\"deployment.apps/foo created\""),
    color("create.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("create.fallback", &["base.success"], "create output in an unknown format"),
    color("delete.deleted", &["base.danger"], "\"deployment.apps \"nginx\" deleted\""),
    color("delete.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("delete.fallback", &["base.danger"], "delete output in an unknown format"),
    color("expose.exposed", &["base.primary"], "\"service/foo exposed\""),
    color("expose.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("expose.fallback", &["base.primary"], "expose output in an unknown format"),
    color("scale.scaled", &["base.warning"], "\"deployment.apps/foo scaled\""),
    color("scale.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("scale.fallback", &["base.warning"], "scale output in an unknown format"),
    color("rollout.rolledback", &["base.warning"], "\"deployment.apps/foo rolled back\""),
    color("rollout.paused", &["base.primary"], "\"deployment.apps/foo paused\""),
    color("rollout.resumed", &["base.secondary"], "\"deployment.apps/foo resumed\""),
    color("rollout.restarted", &["base.warning"], "\"deployment.apps/foo restarted\""),
    color("rollout.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("rollout.fallback", &["base.warning"], "rollout output in an unknown format"),
    color("patch.patched", &["base.warning"], "\"deployment.apps/foo patched\""),
    color("patch.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("patch.fallback", &["base.warning"], "patch output in an unknown format"),
    color("uncordon.uncordoned", &["base.secondary"], "\"node/worker-01 uncordoned\""),
    color("uncordon.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("uncordon.fallback", &["base.warning"], "uncordon output in an unknown format"),
    color("drain.cordoned", &["base.primary"], "\"node/worker-01 cordoned\""),
    color("drain.evictingpod", &["base.muted"], "\"evicting pod my-namespace/my-pod\""),
    color("drain.evicted", &["base.warning"], "\"pod/my-pod evicted\""),
    color("drain.drained", &["base.success"], "\"node/worker-01 drained\""),
    color("drain.dryrun", &["apply.dryrun"], "dry run suffix"),
    color("drain.fallback", &["base.warning"], "drain output in an unknown format"),
    // explain
    slice("explain.key", &["data.key"], "explain keys, cycled by indentation"),
    color("explain.required", &["base.danger"], "the trailing \"-required-\""),
    // diff
    color("diff.added", &["base.success"], "added lines"),
    color("diff.removed", &["base.danger"], "removed lines"),
    color("diff.unchanged", &["base.muted"], "unchanged lines"),
    // options
    color("options.flag", &["base.secondary"], "flags, e.g \"--kubeconfig\""),
    // version
    slice("version.key", &["data.key"], "version keys"),
    // help
    color("help.header", &["table.header"], "headers, e.g \"Examples:\" or \"Options:\""),
    color("help.flag", &["base.secondary"], "flags, e.g \"--kubeconfig\""),
    color("help.flagdesc", &["base.info"], "flag descriptions under \"Options:\""),
    color("help.url", &["base.secondary"], "URLs, e.g `[https://example.com]`"),
    color("help.text", &["base.info"], "any other help text"),
    // logs
    slice("logs.key", &["data.key"], "keys in `key=value` pairs"),
    color("logs.quotedstring", &["data.string"], "quoted strings outside `key=value`"),
    color("logs.date", &["base.muted"], "timestamps"),
    color("logs.sourceref", &["base.muted"], "source references, e.g `main.go:42]`"),
    color("logs.guid", &["base.muted"], "GUIDs"),
    color("logs.severity.trace", &["base.muted"], "TRACE"),
    color("logs.severity.debug", &["base.muted"], "DEBUG"),
    color("logs.severity.info", &["base.success"], "INFO"),
    color("logs.severity.warn", &["base.warning"], "WARN"),
    color("logs.severity.error", &["base.danger"], "ERROR"),
    color("logs.severity.fatal", &["base.danger"], "FATAL"),
    color("logs.severity.panic", &["base.danger"], "PANIC"),
];

/// Look up a key definition by its dotted name.
pub fn find(name: &str) -> Option<&'static ThemeKey> {
    KEYS.iter().find(|k| k.name == name)
}
