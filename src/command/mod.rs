//! Running kubectl and colorizing what it prints.

mod complete;
mod pager;
mod runner;

pub use complete::{flag_candidates, merge_completions, Candidate, CompleteOutput};
pub use pager::Pager;
pub use runner::{print_streams, run};

use std::process::ExitStatus;

/// kubectl exited unsuccessfully; kubecolor exits with the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("kubectl exited with code {code}")]
pub struct KubectlExit {
    pub code: i32,
}

impl KubectlExit {
    /// Killed-by-signal statuses have no code and map to 1.
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code().unwrap_or(1),
        }
    }
}

/// `Err` carrying the exit code when `status` is not a success.
pub(crate) fn check_status(status: ExitStatus) -> Result<(), KubectlExit> {
    if status.success() {
        Ok(())
    } else {
        Err(KubectlExit::from_status(status))
    }
}
