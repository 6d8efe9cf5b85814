//! Fan-out/fan-in over a fixed set of concurrent probes.
//!
//! Each spawned task returns a fragment of results. [`Joiner::join`]
//! waits for every task, keeps the first error it sees, and otherwise
//! returns all fragments concatenated. Fragments arrive in completion
//! order, not spawn order.

use std::future::Future;

use fabricator_core::{Error, Result};
use tokio::task::JoinSet;

/// Structured join over a [`JoinSet`].
///
/// # Example
///
/// ```
/// # tokio_test::block_on(async {
/// use fabricator::Joiner;
///
/// let mut joiner = Joiner::new();
/// for n in 0..3u32 {
///     joiner.spawn(async move { Ok(vec![n]) });
/// }
/// let mut all = joiner.join().await.unwrap();
/// all.sort();
/// assert_eq!(all, vec![0, 1, 2]);
/// # });
/// ```
pub struct Joiner<T> {
    tasks: JoinSet<Result<Vec<T>>>,
    spawned: usize,
}

impl<T: Send + 'static> Joiner<T> {
    /// Empty joiner.
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            spawned: 0,
        }
    }

    /// Start one probe. Must be called from within a Tokio runtime.
    pub fn spawn<F>(&mut self, probe: F)
    where
        F: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        self.tasks.spawn(probe);
        self.spawned += 1;
    }

    /// Number of probes spawned so far.
    pub fn fan_out(&self) -> usize {
        self.spawned
    }

    /// Wait for every probe.
    ///
    /// All probes run to completion even after an error; the first error
    /// observed wins. A probe that panics surfaces as [`Error::Task`].
    pub async fn join(mut self) -> Result<Vec<T>> {
        let mut acc = Vec::with_capacity(self.spawned);
        let mut first_error: Option<Error> = None;
        let mut completed = 0usize;

        while let Some(joined) = self.tasks.join_next().await {
            completed += 1;
            match joined {
                Ok(Ok(fragment)) => acc.extend(fragment),
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(join_err) => {
                    first_error.get_or_insert(Error::Task(join_err.to_string()));
                }
            }
        }
        log::trace!("Joined {completed}/{} probes", self.spawned);

        match first_error {
            Some(e) => Err(e),
            None => Ok(acc),
        }
    }
}

impl<T: Send + 'static> Default for Joiner<T> {
    fn default() -> Self {
        Self::new()
    }
}
