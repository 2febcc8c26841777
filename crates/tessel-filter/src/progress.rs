//! Row-completion progress reporting
//!
//! Every task calls [`ProgressTracker::row_done`] after finishing a row of
//! its unit. The tracker keeps one shared counter behind a mutex and writes
//! `\r{percent}%` to its sink each time the integer percentage changes, so
//! concurrent reports never interleave and the percentage never goes
//! backwards. [`ProgressTracker::finish`] terminates the line.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
struct ProgressState<W> {
    completed: u64,
    last_reported: Option<u32>,
    sink: W,
    /// First write error; later reports are dropped once set
    error: Option<io::Error>,
}

/// Thread-safe progress counter over a fixed number of rows
#[derive(Debug)]
pub struct ProgressTracker<W: Write> {
    total: u64,
    state: Mutex<ProgressState<W>>,
}

impl<W: Write> ProgressTracker<W> {
    /// Track `total` rows, reporting to `sink`.
    pub fn new(total: u64, sink: W) -> Self {
        Self {
            total,
            state: Mutex::new(ProgressState {
                completed: 0,
                last_reported: None,
                sink,
                error: None,
            }),
        }
    }

    /// Record one finished row.
    pub fn row_done(&self) {
        let mut state = self.lock();
        state.completed += 1;

        let percent = percent(state.completed, self.total);
        if state.last_reported == Some(percent) || state.error.is_some() {
            return;
        }
        state.last_reported = Some(percent);

        let result = write!(state.sink, "\r{percent}%").and_then(|()| state.sink.flush());
        if let Err(e) = result {
            state.error = Some(e);
        }
    }

    /// End the progress line and hand back the sink.
    ///
    /// # Errors
    ///
    /// Returns the first error the sink reported, including while writing
    /// the final newline.
    pub fn finish(self) -> io::Result<W> {
        let mut state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Some(e) = state.error.take() {
            return Err(e);
        }
        state.sink.write_all(b"\n")?;
        state.sink.flush()?;
        Ok(state.sink)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProgressState<W>> {
        // A panicking task leaves the counter consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Integer percentage of `completed` out of `total`, rounded down.
fn percent(completed: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    (completed.min(total) * 100 / total) as u32
}
