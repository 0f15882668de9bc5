use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{League, Match, MatchStatus, Score, Team, parse_minute, placeholder_image};

/// Every feed response is wrapped in `{success, data, error}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LeaguesData {
    #[serde(default)]
    pub leagues: Vec<FeedLeague>,
}

#[derive(Debug, Deserialize)]
pub struct LiveData {
    #[serde(default, rename = "match")]
    pub matches: Vec<FeedMatch>,
}

#[derive(Debug, Deserialize)]
pub struct FixturesData {
    #[serde(default)]
    pub fixtures: Vec<FeedMatch>,
}

#[derive(Debug, Deserialize)]
pub struct FeedLeague {
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub country_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedMatch {
    pub id: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub minute: Option<Value>,
    pub home_id: Value,
    pub home_name: String,
    pub away_id: Value,
    pub away_name: String,
    #[serde(default)]
    pub score: Option<String>,
    pub competition_id: Value,
    pub competition_name: String,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// Ids arrive as numbers or strings depending on the endpoint.
fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn initial_logo(name: &str) -> Option<String> {
    let initial: String = name.chars().take(1).collect();
    Some(placeholder_image(24, 24, &initial))
}

fn country_or_international(country: Option<&String>) -> String {
    country
        .filter(|c| !c.is_empty())
        .cloned()
        .unwrap_or_else(|| "International".to_string())
}

/// `"2 - 1"` into a score pair. Missing or malformed halves count as 0.
#[must_use]
pub fn parse_score(raw: &str) -> Score {
    let mut halves = raw.split('-').map(|h| h.trim().parse::<u32>().unwrap_or(0));
    Score {
        home: halves.next().unwrap_or(0),
        away: halves.next().unwrap_or(0),
    }
}

impl From<FeedLeague> for League {
    fn from(raw: FeedLeague) -> Self {
        League {
            id: id_string(&raw.id),
            logo: initial_logo(&raw.name),
            country: country_or_international(raw.country_name.as_ref()),
            name: raw.name,
        }
    }
}

impl FeedMatch {
    /// Converts a feed row. `fallback_date` is used when the row carries no
    /// parseable date.
    #[must_use]
    pub fn into_match(self, fallback_date: NaiveDate) -> Match {
        let status = MatchStatus::from_feed(self.status.as_deref().unwrap_or_default());
        let minute = if status.is_live() {
            self.minute.as_ref().and_then(|m| match m {
                Value::String(s) => parse_minute(s),
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                _ => None,
            })
        } else {
            None
        };
        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or(fallback_date);

        Match {
            id: id_string(&self.id),
            date,
            time: self.time.unwrap_or_default(),
            status,
            minute,
            home_team: Team {
                id: id_string(&self.home_id),
                logo: initial_logo(&self.home_name),
                name: self.home_name,
            },
            away_team: Team {
                id: id_string(&self.away_id),
                logo: initial_logo(&self.away_name),
                name: self.away_name,
            },
            score: parse_score(self.score.as_deref().unwrap_or_default()),
            league: League {
                id: id_string(&self.competition_id),
                logo: initial_logo(&self.competition_name),
                country: country_or_international(self.country_name.as_ref()),
                name: self.competition_name,
            },
        }
    }
}
