use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::state::{PollError, PollMsg, Snapshot, update};
use super::task::ScheduledTask;

/// Zero-argument async producer shared by every fetch of one activation.
pub type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, PollError>> + Send + Sync>;

struct Activation<D, T> {
    deps: D,
    generation: u64,
    token: CancellationToken,
    producer: Producer<T>,
    // held for its Drop; cancelling `token` also ends it
    _timer: Option<ScheduledTask>,
}

/// Keeps the latest value of an async producer fresh.
///
/// `activate` starts a cycle for a dependency value: one immediate fetch,
/// then one fetch per `interval` (a zero interval disables the timer).
/// Calling it again with equal dependencies is a no-op; different
/// dependencies cancel the running cycle first. Results of fetches started
/// by a cancelled cycle are dropped. Overlapping fetches are not
/// de-duplicated, the last to settle wins.
pub struct LivePoller<T, D> {
    interval: Duration,
    state: Arc<watch::Sender<Snapshot<T>>>,
    current: Mutex<Option<Activation<D, T>>>,
    generations: Mutex<u64>,
}

fn apply<T>(
    state: &watch::Sender<Snapshot<T>>,
    token: &CancellationToken,
    generation: u64,
    msg: PollMsg<T>,
) -> bool {
    // checked under the channel's write lock so a newer activation can't
    // interleave between the liveness check and the write
    state.send_if_modified(|snapshot| {
        if token.is_cancelled() {
            return false;
        }
        update(snapshot, generation, msg);
        true
    })
}

fn launch<T: Send + Sync + 'static>(
    state: &Arc<watch::Sender<Snapshot<T>>>,
    token: &CancellationToken,
    generation: u64,
    producer: &Producer<T>,
) {
    if !apply(state, token, generation, PollMsg::Started) {
        return;
    }
    let fetch = producer();
    let state = Arc::clone(state);
    let token = token.clone();
    tokio::spawn(async move {
        let msg = match fetch.await {
            Ok(value) => PollMsg::Resolved(value),
            Err(err) => {
                tracing::warn!(generation, error = %err, "poll fetch failed");
                PollMsg::Rejected(err)
            }
        };
        if !apply(&state, &token, generation, msg) {
            tracing::debug!(generation, "discarding result from a cancelled poll cycle");
        }
    });
}

fn lock<M>(m: &Mutex<M>) -> MutexGuard<'_, M> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T, D> LivePoller<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: PartialEq + Clone + Debug + Send + 'static,
{
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            interval,
            state: Arc::new(state),
            current: Mutex::new(None),
            generations: Mutex::new(0),
        }
    }

    /// Starts a poll cycle for `deps` unless one is already running for equal
    /// dependencies. Returns the generation of the cycle now in effect.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn activate<F, Fut, E>(&self, deps: D, producer: F) -> u64
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + 'static,
    {
        let mut current = lock(&self.current);
        if let Some(active) = current.as_ref() {
            if active.deps == deps && !active.token.is_cancelled() {
                return active.generation;
            }
        }
        if let Some(previous) = current.take() {
            previous.token.cancel();
        }

        let generation = {
            let mut g = lock(&self.generations);
            *g += 1;
            *g
        };
        tracing::info!(
            ?deps,
            generation,
            interval_ms = self.interval.as_millis() as u64,
            "poll cycle started"
        );

        let producer: Producer<T> = Arc::new(move || {
            producer()
                .map(|res| res.map_err(|e| PollError::new(e.to_string())))
                .boxed()
        });
        let token = CancellationToken::new();

        launch(&self.state, &token, generation, &producer);

        let timer = (!self.interval.is_zero()).then(|| {
            let state = Arc::clone(&self.state);
            let tick_token = token.clone();
            let tick_producer = Arc::clone(&producer);
            ScheduledTask::start(self.interval, token.child_token(), move || {
                launch(&state, &tick_token, generation, &tick_producer);
            })
        });

        *current = Some(Activation {
            deps,
            generation,
            token,
            producer,
            _timer: timer,
        });
        generation
    }

    /// Ends the running cycle. In-flight results are discarded; the last
    /// snapshot stays readable.
    pub fn deactivate(&self) {
        if let Some(previous) = lock(&self.current).take() {
            tracing::debug!(
                deps = ?previous.deps,
                generation = previous.generation,
                "poll cycle stopped"
            );
            previous.token.cancel();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        lock(&self.current)
            .as_ref()
            .is_some_and(|a| !a.token.is_cancelled())
    }

    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        lock(&self.current).as_ref().map(|a| a.generation)
    }

    #[must_use]
    pub fn dependencies(&self) -> Option<D> {
        lock(&self.current).as_ref().map(|a| a.deps.clone())
    }

    /// The producer of the running cycle. Calling it fetches without touching
    /// the snapshot or the timer.
    #[must_use]
    pub fn refetch_handle(&self) -> Option<Producer<T>> {
        lock(&self.current).as_ref().map(|a| Arc::clone(&a.producer))
    }

    /// Runs one out-of-cycle fetch whose result is applied like a timer
    /// fetch. The timer keeps its cadence.
    pub fn refresh(&self) {
        if let Some(active) = lock(&self.current).as_ref() {
            launch(&self.state, &active.token, active.generation, &active.producer);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.state.subscribe()
    }

    /// Waits up to `timeout` until the running cycle has settled and no fetch
    /// is in flight, then returns whatever the snapshot holds.
    pub async fn settled(&self, timeout: Duration) -> Snapshot<T> {
        match self.generation() {
            Some(generation) => self.settled_for(generation, timeout).await,
            None => self.snapshot(),
        }
    }

    /// Like `settled`, pinned to one activation. If that cycle is replaced
    /// meanwhile the wait runs out and the returned snapshot is not settled
    /// for `generation`; callers must check `is_settled_for` before trusting
    /// `data`.
    pub async fn settled_for(&self, generation: u64, timeout: Duration) -> Snapshot<T> {
        let mut rx = self.subscribe();
        let idle = |s: &Snapshot<T>| s.is_settled_for(generation) && !s.loading;
        let waited = tokio::time::timeout(timeout, rx.wait_for(idle)).await;
        match waited {
            Ok(Ok(snapshot)) => snapshot.clone(),
            _ => self.snapshot(),
        }
    }
}

impl<T, D> Drop for LivePoller<T, D> {
    fn drop(&mut self) {
        if let Some(active) = lock(&self.current).take() {
            active.token.cancel();
        }
    }
}
