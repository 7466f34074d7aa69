//! The main kubecolor flow: decide whether to color, start kubectl (or
//! replay `--kubecolor-stdin`), and print both streams concurrently.

use std::fs::File;
use std::io::{self, BufReader, LineWriter, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result};

use super::pager::Pager;
use super::{check_status, complete};
use crate::color::ColorLevel;
use crate::config::{detect_color_level, Config, Paging};
use crate::kubectl::{inspect_subcommand_info, PathPluginLookup, Subcommand, SubcommandInfo};
use crate::printer::{select_printer, DispatchOptions, Printer, StderrPrinter};
use crate::scanner::{LineSource, Lines, MemoryLines, ThreadedLines};
use crate::theme::Theme;
use crate::utils::process_guard::ProcessGuard;

type Source = Box<dyn LineSource + Send>;
type Sink = Box<dyn Write + Send>;

/// Run one kubecolor invocation. `raw_args` still contains kubecolor's
/// own flags; `config` holds the resolved settings.
pub fn run(config: &Config, raw_args: &[String], version: &str) -> Result<()> {
    let args = &config.args_passthrough;
    let info = inspect_subcommand_info(args, &PathPluginLookup);
    tracing::debug!(
        subcommand = info.subcommand.as_str(),
        output = ?info.output,
        supports_coloring = info.supports_coloring(),
        supports_pager = info.supports_pager(),
        "parsed command"
    );

    if info.subcommand == Subcommand::Complete {
        return complete::inject_completions(raw_args, config);
    }

    if config.show_kubecolor_version {
        println!("{}", version);
        return Ok(());
    }

    let theme = config.theme()?;
    let stdout_is_terminal = atty::is(atty::Stream::Stdout);
    let mut pager = None;
    if config.paging == Paging::Auto && stdout_is_terminal && info.supports_pager() {
        match Pager::spawn(&config.pager) {
            Ok(p) => pager = p,
            Err(err) => tracing::error!("failed to run pager: {:#}", err),
        }
    }

    let level = detect_color_level(config.force_color, stdout_is_terminal, |name| {
        std::env::var(name).ok()
    });
    tracing::debug!(%level, "color level");

    let colorize = info.supports_coloring() && level != ColorLevel::None;
    let result = if colorize || info.subcommand == Subcommand::Version {
        // version output still gets the kubecolor version appended
        let level = if colorize { level } else { ColorLevel::None };
        let theme = theme.with_level(level);
        exec_colored(config, &info, &theme, version, pager.as_mut())
    } else {
        exec_plain(config, pager.as_mut())
    };

    if let Some(pager) = pager {
        pager.finish()?;
    }
    result
}

fn stdout_sink(pager: Option<&mut Pager>) -> Sink {
    match pager.and_then(Pager::take_stdin) {
        Some(stdin) => Box::new(LineWriter::new(stdin)),
        None => Box::new(LineWriter::new(io::stdout())),
    }
}

fn open_stdin_override(path: &str) -> Result<Box<dyn Read + Send>> {
    if path == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path)
        .with_context(|| format!("read file specified by --kubecolor-stdin: {:?}", path))?;
    Ok(Box::new(file))
}

fn spawn_kubectl(config: &Config, stdout: Stdio, stderr: Stdio) -> Result<Child> {
    tracing::debug!(kubectl = %config.kubectl, args = ?config.args_passthrough, "running kubectl");
    Command::new(&config.kubectl)
        .args(&config.args_passthrough)
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                anyhow::anyhow!(
                    "{}: {}; kubectl must be installed to use kubecolor",
                    config.kubectl,
                    err
                )
            } else {
                anyhow::Error::new(err).context(format!("Failed to run {}", config.kubectl))
            }
        })
}

fn wait_kubectl(mut child: Child) -> Result<ExitStatus> {
    let guard = ProcessGuard::new();
    guard.register_signal_handlers();
    guard.wait_or_kill(&mut child)
}

/// Run kubectl untouched, only routing stdout into the pager if any.
fn exec_plain(config: &Config, pager: Option<&mut Pager>) -> Result<()> {
    if let Some(path) = &config.stdin_override {
        let mut input = open_stdin_override(path)?;
        let mut out = stdout_sink(pager);
        io::copy(&mut input, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let Some(pager) = pager else {
        let child = spawn_kubectl(config, Stdio::inherit(), Stdio::inherit())?;
        return Ok(check_status(wait_kubectl(child)?)?);
    };

    let mut child = spawn_kubectl(config, Stdio::piped(), Stdio::inherit())?;
    let mut kubectl_out = child.stdout.take().context("kubectl stdout not captured")?;
    let mut out = stdout_sink(Some(pager));
    let copied = io::copy(&mut kubectl_out, &mut out).and_then(|_| out.flush());
    if let Err(err) = copied {
        tracing::debug!(%err, "stopped copying kubectl output");
    }
    drop(kubectl_out);
    drop(out);
    Ok(check_status(wait_kubectl(child)?)?)
}

fn exec_colored(
    config: &Config,
    info: &SubcommandInfo,
    theme: &Theme,
    version: &str,
    pager: Option<&mut Pager>,
) -> Result<()> {
    let options = DispatchOptions {
        fresh_threshold: config.obj_fresh_threshold,
        kubecolor_version: version.to_string(),
    };
    let out = stdout_sink(pager);
    let err: Sink = Box::new(LineWriter::new(io::stderr()));

    if let Some(path) = &config.stdin_override {
        let input = BufReader::new(open_stdin_override(path)?);
        let stdout_src: Source = Box::new(ThreadedLines::spawn(input));
        let stderr_src: Source = Box::new(MemoryLines::default());
        print_streams(info, theme, &options, stdout_src, stderr_src, out, err, || Ok(None))?;
        return Ok(());
    }

    let mut child = spawn_kubectl(config, Stdio::piped(), Stdio::piped())?;
    let stdout_src: Source = Box::new(ThreadedLines::spawn(BufReader::new(
        child.stdout.take().context("kubectl stdout not captured")?,
    )));
    let stderr_src: Source = Box::new(Lines::new(BufReader::new(
        child.stderr.take().context("kubectl stderr not captured")?,
    )));

    let status = print_streams(info, theme, &options, stdout_src, stderr_src, out, err, || {
        wait_kubectl(child).map(Some)
    })?;
    if let Some(status) = status {
        check_status(status)?;
    }
    Ok(())
}

/// Color `stdout_src` and `stderr_src` on two threads while `wait` runs
/// on the calling thread.
///
/// Print errors are logged, not returned: a closed pipe (`| head`) must not
/// hide kubectl's exit status.
#[allow(clippy::too_many_arguments)]
pub fn print_streams(
    info: &SubcommandInfo,
    theme: &Theme,
    options: &DispatchOptions,
    mut stdout_src: Source,
    mut stderr_src: Source,
    mut out: Sink,
    mut err: Sink,
    wait: impl FnOnce() -> Result<Option<ExitStatus>>,
) -> Result<Option<ExitStatus>> {
    thread::scope(|scope| {
        let stdout_thread = scope.spawn(move || {
            let mut printer = select_printer(info, theme, options);
            let result = printer
                .print(stdout_src.as_mut(), out.as_mut())
                .and_then(|_| out.flush());
            log_print_result("stdout", result);
        });
        let stderr_thread = scope.spawn(move || {
            let result = StderrPrinter::new(theme)
                .print(stderr_src.as_mut(), err.as_mut())
                .and_then(|_| err.flush());
            log_print_result("stderr", result);
        });

        let status = wait();

        for (name, handle) in [("stdout", stdout_thread), ("stderr", stderr_thread)] {
            if handle.join().is_err() {
                tracing::error!(stream = name, "printer panicked");
            }
        }
        status
    })
}

fn log_print_result(stream: &str, result: io::Result<()>) {
    match result {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!(stream, "output closed early");
        }
        Err(err) => tracing::warn!(stream, %err, "failed to print kubectl output"),
    }
}
