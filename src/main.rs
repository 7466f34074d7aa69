//! kubecolor - CLI entry point

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kubecolor::cli::Cli;
use kubecolor::command::{self, KubectlExit};
use kubecolor::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli.args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(exit) = err.downcast_ref::<KubectlExit>() {
                return exit_code(exit.code);
            }
            eprintln!("[ERROR] [kubecolor] {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = Config::resolve(args).context("resolve config")?;
    init_logging(config.debug);
    command::run(&config, args, &kubecolor::version())
}

/// Log to stderr. `RUST_LOG` wins over the `debug` setting.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
