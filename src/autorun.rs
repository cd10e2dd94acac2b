//! Auto-run: a cancellable task that performs one bootstrap step per period.
//!
//! The session is shared behind a mutex. The worker holds the lock for a
//! whole step, so manual actions and timed steps never interleave and a
//! reset is never observed half-applied.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{BootstrapError, Result};
use crate::session::Session;

/// A session shared between the host and an auto-run worker.
pub type SharedSession = Arc<Mutex<Session>>;

/// Wraps a session for sharing with [`AutoRun`].
pub fn shared(session: Session) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// Locks a shared session, recovering the guard if a previous holder
/// panicked. Session operations never leave partial state behind.
pub fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(|poisoned| {
        warn!("session lock was poisoned; recovering");
        PoisonError::into_inner(poisoned)
    })
}

#[derive(Debug)]
struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Handle to the auto-run worker. At most one worker runs per handle.
///
/// Dropping the handle stops the worker.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bootstrap_lab::autorun::{lock, shared, AutoRun};
/// use bootstrap_lab::distributions::Distribution;
/// use bootstrap_lab::session::Session;
///
/// let session = shared(Session::with_seed(1));
/// lock(&session).generate_sample(Distribution::Normal, 20).unwrap();
///
/// let mut auto = AutoRun::new();
/// assert!(auto.start(&session, Duration::from_millis(5)).unwrap());
/// std::thread::sleep(Duration::from_millis(50));
/// assert!(auto.stop());
/// assert!(lock(&session).resample_count() > 0);
/// ```
#[derive(Debug, Default)]
pub struct AutoRun {
    worker: Option<Worker>,
}

impl AutoRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts stepping `session` every `interval`.
    ///
    /// Returns `Ok(false)` without starting when a worker is already
    /// running or when the session has no sample.
    ///
    /// # Errors
    /// Returns [`BootstrapError::InvalidParameter`] if `interval` is zero.
    pub fn start(&mut self, session: &SharedSession, interval: Duration) -> Result<bool> {
        if self.worker.is_some() {
            return Ok(false);
        }
        if interval.is_zero() {
            return Err(BootstrapError::InvalidParameter(
                "auto-run interval must be positive".into(),
            ));
        }
        if lock(session).sample().is_empty() {
            debug!("auto-run not started: no sample");
            return Ok(false);
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let session = Arc::clone(session);
        let handle = thread::spawn(move || run_worker(&session, &stop_rx, interval));
        self.worker = Some(Worker { stop_tx, handle });
        info!(interval_ms = interval.as_millis() as u64, "auto-run started");
        Ok(true)
    }

    /// Starts with the session's configured interval.
    pub fn start_configured(&mut self, session: &SharedSession) -> Result<bool> {
        let interval = lock(session).config().auto_interval();
        self.start(session, interval)
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// Returns `false` if nothing was running. Safe to call at any time.
    pub fn stop(&mut self) -> bool {
        let Some(worker) = self.worker.take() else {
            return false;
        };
        // The worker may already have exited; a failed send is fine.
        let _ = worker.stop_tx.send(());
        if worker.handle.join().is_err() {
            warn!("auto-run worker panicked");
        }
        info!("auto-run stopped");
        true
    }
}

impl Drop for AutoRun {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(session: &SharedSession, stop_rx: &mpsc::Receiver<()>, interval: Duration) {
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if let Err(e) = lock(session).bootstrap_step() {
                    debug!(error = %e, "auto-run tick skipped");
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
