//! Running a blocking job against a deadline.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};

use crate::engine::SolverError;

/// Runs `job` on a named worker thread and waits at most `limit` for it.
///
/// A worker that delivers is joined before this returns, so nothing it
/// captured outlives the call. Returns `Ok(None)` when the deadline passes
/// first; the worker is then detached and its result dropped, so `job` must
/// bound its own running time (the microlp engine passes the same limit to
/// the backend). A worker that panics yields [`SolverError::WorkerLost`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rosterforge_solver::run_with_deadline;
///
/// let answer = run_with_deadline("adder", Some(Duration::from_secs(5)), || 40 + 2).unwrap();
/// assert_eq!(answer, Some(42));
/// ```
pub fn run_with_deadline<T, F>(
    name: &str,
    limit: Option<Duration>,
    job: F,
) -> Result<Option<T>, SolverError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = channel::bounded(1);
    let worker = thread::Builder::new().name(name.to_string()).spawn(move || {
        // The receiver is gone once the deadline has passed.
        let _ = sender.send(job());
    })?;

    let value = match limit {
        Some(limit) => match receiver.recv_timeout(limit) {
            Ok(value) => value,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => return Err(SolverError::WorkerLost),
        },
        None => receiver.recv().map_err(|_| SolverError::WorkerLost)?,
    };
    // The worker has sent; all that is left is dropping its captures.
    worker.join().map_err(|_| SolverError::WorkerLost)?;
    Ok(Some(value))
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
