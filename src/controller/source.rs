use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::controller::api::LiveScoreClient;
use crate::error::AppError;
use crate::mock::{self, GeneratorConfig};
use crate::model::{League, Match, MatchDetails, TeamDetails, TeamStats};

/// Where match-domain data comes from. Nothing behind this trait is
/// persisted.
#[async_trait]
pub trait MatchSource: Send + Sync {
    async fn leagues(&self) -> Result<Vec<League>, AppError>;
    async fn matches_by_date(&self, date: NaiveDate) -> Result<Vec<Match>, AppError>;
    async fn league_matches(
        &self,
        league_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Match>, AppError>;
    async fn live_matches(&self) -> Result<Vec<Match>, AppError>;
    async fn match_details(&self, match_id: &str) -> Result<MatchDetails, AppError>;
    async fn team_details(&self, team_id: &str) -> Result<TeamDetails, AppError>;
    async fn team_stats(&self, team_id: &str) -> Result<TeamStats, AppError>;
    async fn team_upcoming(&self, team_id: &str) -> Result<Vec<Match>, AppError>;
    async fn team_recent(&self, team_id: &str) -> Result<Vec<Match>, AppError>;
}

/// Generator-backed source. Each call sleeps for `latency` before rolling,
/// so pages behave like they sit on a slow feed.
pub struct MockSource {
    rng: Mutex<StdRng>,
    config: GeneratorConfig,
    latency: Duration,
}

impl MockSource {
    /// A fixed `seed` makes every response sequence reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>, config: GeneratorConfig, latency: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            config,
            latency,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    async fn roll<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[async_trait]
impl MatchSource for MockSource {
    async fn leagues(&self) -> Result<Vec<League>, AppError> {
        Ok(mock::popular_leagues())
    }

    async fn matches_by_date(&self, date: NaiveDate) -> Result<Vec<Match>, AppError> {
        Ok(self.roll(|rng| mock::all_matches(rng, date)).await)
    }

    async fn league_matches(
        &self,
        league_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Match>, AppError> {
        Ok(self
            .roll(|rng| mock::matches_by_league(rng, league_id, date))
            .await)
    }

    async fn live_matches(&self) -> Result<Vec<Match>, AppError> {
        let all = self.roll(|rng| mock::all_matches(rng, today())).await;
        Ok(all.into_iter().filter(|m| m.status.is_live()).collect())
    }

    async fn match_details(&self, match_id: &str) -> Result<MatchDetails, AppError> {
        let config = self.config;
        Ok(self
            .roll(|rng| mock::match_details(rng, match_id, today(), &config))
            .await)
    }

    async fn team_details(&self, team_id: &str) -> Result<TeamDetails, AppError> {
        Ok(self.roll(|rng| mock::team_details(rng, team_id)).await)
    }

    async fn team_stats(&self, _team_id: &str) -> Result<TeamStats, AppError> {
        Ok(self.roll(|rng| mock::team_stats(rng)).await)
    }

    async fn team_upcoming(&self, team_id: &str) -> Result<Vec<Match>, AppError> {
        Ok(self
            .roll(|rng| mock::team_upcoming_matches(rng, team_id, today()))
            .await)
    }

    async fn team_recent(&self, team_id: &str) -> Result<Vec<Match>, AppError> {
        Ok(self
            .roll(|rng| mock::team_recent_matches(rng, team_id, today()))
            .await)
    }
}

/// Live-score API for leagues and fixtures. The feed has no team or match
/// detail endpoints, so those come from the generator.
pub struct ApiSource {
    client: LiveScoreClient,
    fallback: MockSource,
}

impl ApiSource {
    #[must_use]
    pub fn new(client: LiveScoreClient, fallback: MockSource) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl MatchSource for ApiSource {
    async fn leagues(&self) -> Result<Vec<League>, AppError> {
        self.client.leagues().await
    }

    async fn matches_by_date(&self, date: NaiveDate) -> Result<Vec<Match>, AppError> {
        self.client.matches_by_date(date).await
    }

    async fn league_matches(
        &self,
        league_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Match>, AppError> {
        let matches = self.client.matches_by_date(date).await?;
        Ok(matches
            .into_iter()
            .filter(|m| m.league.id == league_id)
            .collect())
    }

    async fn live_matches(&self) -> Result<Vec<Match>, AppError> {
        self.client.live_matches().await
    }

    async fn match_details(&self, match_id: &str) -> Result<MatchDetails, AppError> {
        self.fallback.match_details(match_id).await
    }

    async fn team_details(&self, team_id: &str) -> Result<TeamDetails, AppError> {
        self.fallback.team_details(team_id).await
    }

    async fn team_stats(&self, team_id: &str) -> Result<TeamStats, AppError> {
        self.fallback.team_stats(team_id).await
    }

    async fn team_upcoming(&self, team_id: &str) -> Result<Vec<Match>, AppError> {
        self.fallback.team_upcoming(team_id).await
    }

    async fn team_recent(&self, team_id: &str) -> Result<Vec<Match>, AppError> {
        self.fallback.team_recent(team_id).await
    }
}
