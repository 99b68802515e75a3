//! Deadline-bounded execution of blocking native calls.
//!
//! Native calls cannot be cancelled. A caller that needs a timeout runs the
//! call on its own thread and stops waiting; the thread is left to finish and
//! its result is dropped.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use crate::error::{Error, Result};

/// Run `f` on a worker thread and wait at most `timeout` for its result.
///
/// On timeout the worker keeps running to completion in the background and
/// [`Error::Timeout`] is returned.
pub fn run_with_deadline<T, F>(timeout: Duration, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    thread::Builder::new()
        .name("poppler-page-worker".to_string())
        .spawn(move || {
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(f());
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            log::warn!("abandoning native call after {:?}", timeout);
            Err(Error::Timeout(timeout))
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(Error::Other("worker thread panicked".to_string()))
        }
    }
}
