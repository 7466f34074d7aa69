//! Piping colorized output into a pager such as `less -RF`.

use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::kubectl::find_executable;

pub struct Pager {
    child: Child,
}

impl Pager {
    /// Start `command`, split on whitespace. An empty command means no pager.
    pub fn spawn(command: &str) -> Result<Option<Self>> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(None);
        };
        if !program.contains(std::path::MAIN_SEPARATOR) && find_executable(program).is_none() {
            bail!("pager {:?} not found in PATH", program);
        }
        let child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start pager {:?}", command))?;
        tracing::debug!(pager = command, pid = child.id(), "started pager");
        Ok(Some(Self { child }))
    }

    /// The pipe feeding the pager. Dropping it signals end of output.
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Close the pipe and wait for the user to quit the pager.
    pub fn finish(mut self) -> Result<()> {
        drop(self.child.stdin.take());
        let status = self.child.wait().context("Failed to wait for pager")?;
        if !status.success() {
            tracing::debug!(?status, "pager exited unsuccessfully");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_command_is_no_pager() {
        assert!(Pager::spawn("").unwrap().is_none());
        assert!(Pager::spawn("   ").unwrap().is_none());
    }

    #[test]
    fn missing_pager_is_an_error() {
        assert!(Pager::spawn("definitely-not-a-pager-binary -R").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn feeds_output_through_pager() {
        let mut pager = Pager::spawn("tail -n 0").unwrap().unwrap();
        let mut stdin = pager.take_stdin().unwrap();
        let _ = writeln!(stdin, "hello");
        drop(stdin);
        pager.finish().unwrap();
    }
}
