//! Lifecycle guard for the wrapped kubectl process.
//!
//! Ctrl+C reaches the whole foreground process group, so kubectl receives
//! SIGINT on its own. kubecolor keeps running long enough to colorize
//! whatever kubectl prints while shutting down, and only kills it when:
//! - kubectl ignores the interrupt for longer than the grace period
//! - SIGHUP arrives (terminal closed)
//! - kubecolor's own parent dies (reparented to init or a subreaper)

use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long kubectl may keep running after an interrupt.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(3);

pub struct ProcessGuard {
    interrupted: Arc<AtomicBool>,
    hangup: Arc<AtomicBool>,
    grace_period: Duration,
    #[cfg(unix)]
    initial_ppid: u32,
}

impl Default for ProcessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGuard {
    /// Snapshot the current parent PID for later orphan detection.
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            hangup: Arc::new(AtomicBool::new(false)),
            grace_period: DEFAULT_GRACE_PERIOD,
            #[cfg(unix)]
            initial_ppid: unsafe { libc::getppid() as u32 },
        }
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Register SIGINT (Ctrl+C) and SIGHUP handlers.
    ///
    /// Registering replaces the default handlers, so kubecolor itself is
    /// not killed by Ctrl+C. Duplicate registrations are ignored.
    pub fn register_signal_handlers(&self) {
        let flag = self.interrupted.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .ok();

        #[cfg(unix)]
        {
            use signal_hook::flag::register;
            if let Err(err) = register(libc::SIGHUP, self.hangup.clone()) {
                tracing::debug!(%err, "could not register SIGHUP handler");
            }
        }
    }

    /// Whether SIGINT or SIGHUP was received.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst) || self.hangup.load(Ordering::SeqCst)
    }

    /// Wait for `child`, killing it on hangup, orphaning, or when it
    /// outlives the grace period after an interrupt.
    pub fn wait_or_kill(&self, child: &mut Child) -> Result<ExitStatus> {
        let mut interrupted_at: Option<Instant> = None;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }

            if interrupted_at.is_none() && self.interrupted.load(Ordering::SeqCst) {
                tracing::debug!("interrupted, waiting for kubectl to exit");
                interrupted_at = Some(Instant::now());
            }
            let overdue = interrupted_at.is_some_and(|at| at.elapsed() >= self.grace_period);

            if overdue || self.hangup.load(Ordering::SeqCst) || self.is_orphaned() {
                tracing::debug!(pid = child.id(), "killing kubectl");
                let _ = child.kill();
                return child.wait().map_err(Into::into);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Any ppid change means the parent died.
    #[cfg(unix)]
    fn is_orphaned(&self) -> bool {
        let current_ppid = unsafe { libc::getppid() as u32 };
        current_ppid != self.initial_ppid
    }

    #[cfg(not(unix))]
    fn is_orphaned(&self) -> bool {
        false
    }
}
