pub mod aggregators;
pub mod data_service;
pub mod http_handlers;

pub use aggregators::{LeagueGroup, filter_matches, group_by_league};
pub use http_handlers::{health, index, league_page, match_page, team_page};
