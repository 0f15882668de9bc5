use chrono::NaiveDate;
use std::sync::Arc;

use crate::controller::state::AppState;
use crate::model::Match;
use crate::poller::Snapshot;

/// Starts (or joins) polling for `date` and waits briefly for it to settle.
/// Every date has its own poller, so requests for other dates never replace
/// this one's cycle. Only a snapshot settled by the cycle this call joined is
/// returned; otherwise the board is reported as still loading.
pub async fn scoreboard_for_date(
    state: &AppState,
    date: NaiveDate,
    force_refresh: bool,
) -> Snapshot<Vec<Match>> {
    let poller = state.scoreboard.poller(&date);
    let source = Arc::clone(&state.source);
    let before = poller.generation();
    let generation = poller.activate(date, move || {
        let source = Arc::clone(&source);
        async move { source.matches_by_date(date).await }
    });
    // a fresh activation already fetched
    if force_refresh && before == Some(generation) {
        poller.refresh();
    }
    let snapshot = poller.settled_for(generation, state.settle_timeout).await;
    if snapshot.is_settled_for(generation) {
        snapshot
    } else {
        tracing::debug!(%date, generation, "scoreboard not settled in time");
        Snapshot::default()
    }
}
