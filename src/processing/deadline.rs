//! Wall-clock limit for the O(N³) eigen decompositions

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result, Stage};

/// Run `job`, giving up after `limit`.
///
/// Without a limit the job runs on the calling thread. With one it runs on a
/// worker thread; on expiry the worker is detached and left to finish on its own.
pub fn run_with_deadline<T, F>(stage: Stage, limit: Option<Duration>, job: F) -> Result<T>
where
	T: Send + 'static,
	F: FnOnce() -> Result<T> + Send + 'static,
{
	let Some(limit) = limit else {
		return job();
	};

	let (tx, rx) = mpsc::channel();
	thread::Builder::new()
		.name(format!("gocluster-{}", stage).replace(' ', "-"))
		.spawn(move || {
			// Receiver is gone after a timeout
			let _ = tx.send(job());
		})
		.map_err(|e| Error::io(stage, e))?;

	match rx.recv_timeout(limit) {
		Ok(result) => result,
		Err(mpsc::RecvTimeoutError::Timeout) => Err(Error::DeadlineExceeded { stage, limit }),
		Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::degenerate(
			stage,
			"worker thread terminated without a result",
		)),
	}
}
