use rand::Rng;

use crate::model::{
    FormResult, GoalRecord, MatchRecord, Player, Position, TeamDetails, TeamStats,
    placeholder_image,
};

pub const NATIONALITIES: [&str; 7] = [
    "England",
    "Spain",
    "France",
    "Germany",
    "Italy",
    "Brazil",
    "Argentina",
];

const SEASON_GAMES: u32 = 38;

/// Builds `count` players numbered from 1, cycling positions and
/// nationalities. Ages are drawn from 20 to 34 inclusive.
pub fn generate_players<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            Player {
                id: format!("player-{n}"),
                name: format!("Player {n}"),
                number: n as u32,
                position: Position::ALL[i % Position::ALL.len()],
                nationality: NATIONALITIES[i % NATIONALITIES.len()].to_string(),
                age: rng.gen_range(20..=34),
                image: Some(placeholder_image(60, 60, &format!("P{n}"))),
            }
        })
        .collect()
}

pub fn team_details<R: Rng + ?Sized>(rng: &mut R, team_id: &str) -> TeamDetails {
    TeamDetails {
        id: team_id.to_string(),
        name: format!("Team {team_id}"),
        logo: Some(placeholder_image(120, 120, "Team")),
        country: "England".to_string(),
        founded: 1892,
        venue: "Stadium Name".to_string(),
        coach: "John Smith".to_string(),
        players: generate_players(rng, 20),
    }
}

/// Season summary over a 38 game league season.
pub fn team_stats<R: Rng + ?Sized>(rng: &mut R) -> TeamStats {
    let wins = rng.gen_range(8..=26);
    let draws = rng.gen_range(0..=(SEASON_GAMES - wins).min(14));
    let losses = SEASON_GAMES - wins - draws;
    let scored = wins * 2 + rng.gen_range(0..=draws + 10);
    let against = losses * 2 + rng.gen_range(0..=draws + 10);
    let clean_sheets = rng.gen_range(0..=(wins + draws).min(20));
    let form = (0..5)
        .map(|_| match rng.gen_range(0..3) {
            0 => FormResult::W,
            1 => FormResult::D,
            _ => FormResult::L,
        })
        .collect();

    TeamStats {
        matches: MatchRecord {
            played: SEASON_GAMES,
            wins,
            draws,
            losses,
        },
        goals: GoalRecord { scored, against },
        clean_sheets,
        form,
    }
}
