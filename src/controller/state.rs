use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use crate::controller::source::MatchSource;
use crate::model::Match;
use crate::poller::KeyedPollers;
use crate::storage::UserStore;

/// Dates whose scoreboards are kept polling at once.
pub const POLLED_DATES: usize = 4;

/// Shared by every worker; register it once with `Data::new`.
pub struct AppState {
    pub source: Arc<dyn MatchSource>,
    pub store: Arc<dyn UserStore>,
    /// Home scoreboards, one poller per requested date.
    pub scoreboard: KeyedPollers<Vec<Match>, NaiveDate>,
    /// How long a page request waits for an unsettled scoreboard fetch.
    pub settle_timeout: Duration,
    pub refresh_interval: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(
        source: Arc<dyn MatchSource>,
        store: Arc<dyn UserStore>,
        refresh_interval: Duration,
        settle_timeout: Duration,
    ) -> Self {
        Self {
            source,
            store,
            scoreboard: KeyedPollers::new(refresh_interval, POLLED_DATES),
            settle_timeout,
            refresh_interval,
        }
    }
}
