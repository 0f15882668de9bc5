use thiserror::Error;

/// A failed producer call, flattened to its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PollError {
    message: String,
}

impl PollError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What a poller exposes to readers.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Last successfully fetched value. Survives later failures.
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<PollError>,
    /// Activation that produced the most recent settled fetch.
    pub settled_generation: Option<u64>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            settled_generation: None,
        }
    }
}

impl<T> Snapshot<T> {
    #[must_use]
    pub fn is_settled_for(&self, generation: u64) -> bool {
        self.settled_generation == Some(generation)
    }
}

#[derive(Debug, Clone)]
pub enum PollMsg<T> {
    Started,
    Resolved(T),
    Rejected(PollError),
}

pub fn update<T>(snapshot: &mut Snapshot<T>, generation: u64, msg: PollMsg<T>) {
    match msg {
        PollMsg::Started => {
            snapshot.loading = true;
        }
        PollMsg::Resolved(value) => {
            snapshot.data = Some(value);
            snapshot.error = None;
            snapshot.loading = false;
            snapshot.settled_generation = Some(generation);
        }
        PollMsg::Rejected(err) => {
            snapshot.error = Some(err);
            snapshot.loading = false;
            snapshot.settled_generation = Some(generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_with_nothing() {
        let s: Snapshot<u8> = Snapshot::default();
        assert!(s.loading);
        assert!(s.data.is_none());
        assert!(s.error.is_none());
    }

    #[test]
    fn success_clears_error() {
        let mut s = Snapshot::default();
        update(&mut s, 1, PollMsg::Rejected(PollError::new("boom")));
        update(&mut s, 1, PollMsg::Started);
        assert!(s.loading);
        update(&mut s, 1, PollMsg::Resolved(5));
        assert_eq!(s.data, Some(5));
        assert!(s.error.is_none());
        assert!(!s.loading);
    }

    #[test]
    fn failure_keeps_last_good_data() {
        let mut s = Snapshot::default();
        update(&mut s, 1, PollMsg::Resolved("first"));
        update(&mut s, 2, PollMsg::Started);
        update(&mut s, 2, PollMsg::Rejected(PollError::new("feed down")));
        assert_eq!(s.data, Some("first"));
        assert_eq!(s.error.as_ref().map(PollError::message), Some("feed down"));
        assert!(s.is_settled_for(2));
        assert!(!s.loading);
    }
}
