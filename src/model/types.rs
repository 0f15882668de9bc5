use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub position: Position,
    pub nationality: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub country: String,
    pub founded: i32,
    pub venue: String,
    pub coach: String,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "IN PLAY")]
    InPlay,
    #[serde(rename = "FINISHED")]
    Finished,
}

impl MatchStatus {
    /// Maps a status string from the live-score feed. Breaks and added time
    /// count as in play; anything unrecognised is treated as not started.
    #[must_use]
    pub fn from_feed(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FINISHED" | "FT" => MatchStatus::Finished,
            "IN PLAY" | "HALF TIME BREAK" | "ADDED TIME" | "LIVE" => MatchStatus::InPlay,
            _ => MatchStatus::NotStarted,
        }
    }

    #[must_use]
    pub fn is_live(self) -> bool {
        self == MatchStatus::InPlay
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::NotStarted => "NOT STARTED",
            MatchStatus::InPlay => "IN PLAY",
            MatchStatus::Finished => "FINISHED",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: MatchStatus,
    /// Set while in play. Match details also report 90 once finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    pub home_team: Team,
    pub away_team: Team,
    pub score: Score,
    pub league: League,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    Var,
    Penalty,
    KickOff,
    HalfTime,
    FullTime,
}

impl EventKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Goal => "goal",
            EventKind::YellowCard => "yellow-card",
            EventKind::RedCard => "red-card",
            EventKind::Substitution => "substitution",
            EventKind::Var => "var",
            EventKind::Penalty => "penalty",
            EventKind::KickOff => "kick-off",
            EventKind::HalfTime => "half-time",
            EventKind::FullTime => "full-time",
        }
    }

    /// Whole-match markers rather than something a player did.
    #[must_use]
    pub fn is_period_marker(self) -> bool {
        matches!(
            self,
            EventKind::KickOff | EventKind::HalfTime | EventKind::FullTime
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub minute: u32,
    pub team: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assist_by: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_player: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_player: Option<Player>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLineup {
    pub team: Team,
    pub formation: String,
    #[serde(rename = "startingXI")]
    pub starting_xi: Vec<Player>,
    pub substitutes: Vec<Player>,
    pub coach: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineups {
    pub home: MatchLineup,
    pub away: MatchLineup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPair {
    pub home: u32,
    pub away: u32,
}

impl StatPair {
    #[must_use]
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Home share of the combined value as a percentage, 50 when both are zero.
    #[must_use]
    pub fn home_share(&self) -> u32 {
        let total = self.home + self.away;
        if total == 0 {
            50
        } else {
            self.home * 100 / total
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub possession: StatPair,
    pub shots: StatPair,
    pub shots_on_target: StatPair,
    pub corners: StatPair,
    pub fouls: StatPair,
    pub yellow_cards: StatPair,
    pub red_cards: StatPair,
    pub offsides: StatPair,
}

impl MatchStats {
    /// Display rows in page order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, StatPair); 8] {
        [
            ("Possession (%)", self.possession),
            ("Shots", self.shots),
            ("Shots on target", self.shots_on_target),
            ("Corners", self.corners),
            ("Fouls", self.fouls),
            ("Yellow cards", self.yellow_cards),
            ("Red cards", self.red_cards),
            ("Offsides", self.offsides),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub matches: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub draws: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    #[serde(flatten)]
    pub summary: Match,
    pub halftime: Score,
    pub venue: String,
    pub referee: String,
    pub events: Vec<MatchEvent>,
    pub lineups: Lineups,
    pub stats: MatchStats,
    pub h2h: HeadToHead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    W,
    D,
    L,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    #[serde(rename = "for")]
    pub scored: u32,
    pub against: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub matches: MatchRecord,
    pub goals: GoalRecord,
    pub clean_sheets: u32,
    pub form: Vec<FormResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub date: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub name: String,
}

/// Scoreboard filter selected by the `filter` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Live,
    Finished,
}

impl StatusFilter {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("live") => StatusFilter::Live,
            Some("finished") => StatusFilter::Finished,
            _ => StatusFilter::All,
        }
    }

    #[must_use]
    pub fn admits(self, m: &Match) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Live => m.status == MatchStatus::InPlay,
            StatusFilter::Finished => m.status == MatchStatus::Finished,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Live => "live",
            StatusFilter::Finished => "finished",
        }
    }
}
