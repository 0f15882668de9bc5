//! Synthetic football data.
//!
//! Every generator takes the random source explicitly, so a seeded
//! `StdRng` reproduces the same leagues, fixtures and timelines.

pub mod catalog;
pub mod details;
pub mod matches;
pub mod roster;

pub use catalog::{countries, default_league, find_league, news, popular_leagues};
pub use details::{halftime_score, match_details};
pub use matches::{all_matches, matches_by_league, team_recent_matches, team_upcoming_matches};
pub use roster::{generate_players, team_details, team_stats};

/// Upper bound applied to each side's full-time score to derive the
/// half-time score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalftimeCaps {
    pub home: u32,
    pub away: u32,
}

impl Default for HalftimeCaps {
    fn default() -> Self {
        Self { home: 2, away: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub halftime_caps: HalftimeCaps,
    /// Players generated per side for match details. Must be at least 11.
    pub player_pool_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            halftime_caps: HalftimeCaps::default(),
            player_pool_size: 18,
        }
    }
}
