use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// A fixed-cadence timer that calls `tick` every `period` until its token is
/// cancelled. The first tick fires one full period after `start`.
pub struct ScheduledTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Spawns the timer on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero or if called outside a Tokio runtime.
    pub fn start<F>(period: Duration, token: CancellationToken, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let loop_token = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = loop_token.cancelled() => break,
                    _ = ticker.tick() => tick(),
                }
            }
        });
        Self { token, handle }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let task = ScheduledTask::start(Duration::from_secs(10), CancellationToken::new(), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert!(task.is_active());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(21)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        task.stop();
        assert!(!task.is_active());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn parent_token_stops_child() {
        let parent = CancellationToken::new();
        let task = ScheduledTask::start(Duration::from_secs(1), parent.child_token(), || {});
        parent.cancel();
        tokio::task::yield_now().await;
        assert!(!task.is_active());
    }
}
