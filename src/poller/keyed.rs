use ahash::AHashMap;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::live::LivePoller;

struct Entries<T, D> {
    pollers: AHashMap<D, Arc<LivePoller<T, D>>>,
    // least recently requested first
    recent: VecDeque<D>,
}

/// One `LivePoller` per key, so cycles for different keys never cancel each
/// other. At most `capacity` keys are polled; requesting a new key past that
/// stops the least recently requested one.
pub struct KeyedPollers<T, D> {
    interval: Duration,
    capacity: usize,
    entries: Mutex<Entries<T, D>>,
}

impl<T, D> KeyedPollers<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: PartialEq + Eq + Hash + Clone + Debug + Send + 'static,
{
    #[must_use]
    pub fn new(interval: Duration, capacity: usize) -> Self {
        Self {
            interval,
            capacity: capacity.max(1),
            entries: Mutex::new(Entries {
                pollers: AHashMap::new(),
                recent: VecDeque::new(),
            }),
        }
    }

    /// The poller for `key`, created on first request.
    pub fn poller(&self, key: &D) -> Arc<LivePoller<T, D>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.recent.retain(|k| k != key);
        entries.recent.push_back(key.clone());

        if let Some(existing) = entries.pollers.get(key) {
            return Arc::clone(existing);
        }
        let poller = Arc::new(LivePoller::new(self.interval));
        entries.pollers.insert(key.clone(), Arc::clone(&poller));

        while entries.recent.len() > self.capacity {
            let Some(oldest) = entries.recent.pop_front() else {
                break;
            };
            if let Some(evicted) = entries.pollers.remove(&oldest) {
                tracing::debug!(key = ?oldest, "polling stopped for evicted key");
                evicted.deactivate();
            }
        }
        poller
    }

    /// Keys currently polled, least recently requested first.
    #[must_use]
    pub fn keys(&self) -> Vec<D> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.recent.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reuses_poller_per_key() {
        let pollers: KeyedPollers<u8, u32> = KeyedPollers::new(Duration::ZERO, 2);
        let a = pollers.poller(&1);
        let again = pollers.poller(&1);
        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &pollers.poller(&2)));
    }

    #[tokio::test]
    async fn evicts_least_recently_requested() {
        let pollers: KeyedPollers<u8, u32> = KeyedPollers::new(Duration::ZERO, 2);
        let first = pollers.poller(&1);
        first.activate(1, || async { Ok::<_, String>(1) });
        pollers.poller(&2);
        pollers.poller(&1);
        pollers.poller(&3);

        assert_eq!(pollers.keys(), vec![1, 3]);
        assert!(first.is_active());

        pollers.poller(&4);
        assert_eq!(pollers.keys(), vec![3, 4]);
        assert!(!first.is_active());
    }
}
