//! Picks the printer for a kubectl invocation.

use std::time::Duration;

use super::table::get_filter;
use super::{
    ApplyPrinter, AuthPrinter, DescribePrinter, DiffPrinter, ExplainPrinter, HelpPrinter,
    JsonPrinter, LogsPrinter, OptionsPrinter, Printer, SingleColorPrinter, TablePrinter,
    VerbPrinter, VersionInjectPrinter, VersionPrinter, YamlPrinter,
};
use crate::kubectl::{OutputFormat, Subcommand, SubcommandInfo};
use crate::theme::Theme;

/// Settings that do not come from the command line being wrapped.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Ages below this are colored as fresh. Zero disables it.
    pub fresh_threshold: Duration,
    pub kubecolor_version: String,
}

/// Printer for kubectl's stdout.
pub fn select_printer<'a>(
    info: &SubcommandInfo,
    theme: &'a Theme,
    options: &DispatchOptions,
) -> Box<dyn Printer + 'a> {
    if info.help {
        return Box::new(HelpPrinter::new(theme));
    }

    let with_header = !info.no_header;
    let output = info.output;

    match (info.subcommand, output) {
        (Subcommand::Top | Subcommand::ApiResources, _) => {
            Box::new(TablePrinter::new(theme, with_header))
        }
        (Subcommand::ApiVersions, _) => Box::new(TablePrinter::new(theme, false)),
        (Subcommand::Get | Subcommand::Events, OutputFormat::None | OutputFormat::Wide) => {
            Box::new(
                TablePrinter::new(theme, with_header)
                    .with_filter(get_filter(theme, options.fresh_threshold)),
            )
        }
        (Subcommand::Describe, _) => Box::new(DescribePrinter::new(theme)),
        (Subcommand::Explain, _) => Box::new(ExplainPrinter::new(theme, info.recursive)),
        (Subcommand::Version, OutputFormat::Json | OutputFormat::Yaml) => Box::new(
            VersionInjectPrinter::new(theme, output, options.kubecolor_version.clone()),
        ),
        (Subcommand::Version, _) => Box::new(VersionPrinter::new(
            theme,
            options.kubecolor_version.clone(),
        )),
        (Subcommand::Options, _) => Box::new(OptionsPrinter::new(theme)),
        (_, OutputFormat::Json) => Box::new(JsonPrinter::new(theme)),
        (_, OutputFormat::Yaml) => Box::new(YamlPrinter::new(theme)),
        (Subcommand::Apply, _) => Box::new(ApplyPrinter::new(theme)),
        (Subcommand::Logs, _) => Box::new(LogsPrinter::new(theme)),
        (Subcommand::Diff, _) => Box::new(DiffPrinter::new(theme)),
        (Subcommand::Auth, _) => Box::new(AuthPrinter::new(theme, info.args.clone(), info.list)),
        (subcommand, _) => match verb_printer(subcommand, theme) {
            Some(printer) => Box::new(printer),
            None => Box::new(SingleColorPrinter::new(theme.default.clone())),
        },
    }
}

fn verb_printer(subcommand: Subcommand, theme: &Theme) -> Option<VerbPrinter> {
    let printer = match subcommand {
        Subcommand::Create => {
            let t = &theme.create;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone()).verb("created", &t.created)
        }
        Subcommand::Delete => {
            let t = &theme.delete;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone()).verb("deleted", &t.deleted)
        }
        Subcommand::Expose => {
            let t = &theme.expose;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone()).verb("exposed", &t.exposed)
        }
        Subcommand::Scale => {
            let t = &theme.scale;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone()).verb("scaled", &t.scaled)
        }
        Subcommand::Rollout => {
            let t = &theme.rollout;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone())
                .verb("rolled back", &t.rolledback)
                .verb("paused", &t.paused)
                .verb("resumed", &t.resumed)
                .verb("restarted", &t.restarted)
        }
        Subcommand::Patch => {
            let t = &theme.patch;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone()).verb("patched", &t.patched)
        }
        Subcommand::Uncordon => {
            let t = &theme.uncordon;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone())
                .verb("uncordoned", &t.uncordoned)
        }
        Subcommand::Drain | Subcommand::Cordon => {
            let t = &theme.drain;
            VerbPrinter::new(t.dryrun.clone(), t.fallback.clone())
                .verb("cordoned", &t.cordoned)
                .verb("evicted", &t.evicted)
                .verb("drained", &t.drained)
                .prefix("evicting pod", &t.evictingpod)
        }
        _ => return None,
    };
    Some(printer)
}
