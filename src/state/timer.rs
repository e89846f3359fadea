use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Fixed penalty for a wrong answer
pub(crate) const WRONG_ANSWER_PENALTY: Duration = Duration::from_secs(1);

/// A reduced countdown never drops below this
pub(crate) const MIN_REMAINING: Duration = Duration::from_secs(1);

/// One-shot delayed callback running on its own task.
///
/// Callbacks get the `generation` they were scheduled with and must compare
/// it against the live timer under the game lock before doing anything: a
/// timer that was superseded while its callback waited on the lock is stale.
#[derive(Debug)]
pub(crate) struct Timer {
    generation: u64,
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl Timer {
    pub fn schedule<F, Fut>(generation: u64, delay: Duration, callback: F) -> Self
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            callback(generation).await;
        });

        Self {
            generation,
            deadline,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time left before the callback fires
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Abort the task. Dropping a `Timer` without cancelling it lets the
    /// callback run, which is what a callback clearing its own slot wants.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Remaining time after a wrong answer: `remaining - penalty`, at least [`MIN_REMAINING`]
pub(crate) fn reduced(remaining: Duration) -> Duration {
    remaining
        .saturating_sub(WRONG_ANSWER_PENALTY)
        .max(MIN_REMAINING)
}
