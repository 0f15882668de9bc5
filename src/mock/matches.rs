use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::catalog::{default_league, find_league, popular_leagues};
use crate::model::{League, Match, MatchStatus, Score, Team, placeholder_image};

const FIXTURE_WINDOW: usize = 5;

/// Afternoon or evening kick-off on a ten minute boundary.
pub fn kickoff_time<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hour: u32 = rng.gen_range(12..24);
    let minute: u32 = rng.gen_range(0..6) * 10;
    format!("{hour:02}:{minute:02}")
}

pub fn random_score<R: Rng + ?Sized>(rng: &mut R) -> Score {
    Score {
        home: rng.gen_range(0..4),
        away: rng.gen_range(0..4),
    }
}

fn team(id: String, name: String, logo_text: &str) -> Team {
    Team {
        id,
        name,
        logo: Some(placeholder_image(24, 24, logo_text)),
    }
}

/// Three to five fixtures for one league on `date`. Unknown league ids fall
/// back to the first catalog entry but keep the requested id in match ids.
pub fn matches_by_league<R: Rng + ?Sized>(
    rng: &mut R,
    league_id: &str,
    date: NaiveDate,
) -> Vec<Match> {
    let league = find_league(league_id).unwrap_or_else(default_league);

    let count = rng.gen_range(3..=5);
    (0..count)
        .map(|i| {
            let is_live = rng.gen_bool(0.5);
            let minute = is_live.then(|| rng.gen_range(1..=90));
            let status = if is_live {
                MatchStatus::InPlay
            } else if rng.gen_bool(0.5) {
                MatchStatus::Finished
            } else {
                MatchStatus::NotStarted
            };
            let n = i + 1;

            Match {
                id: format!("{league_id}-{i}"),
                date,
                time: kickoff_time(rng),
                status,
                minute,
                home_team: team(
                    format!("home-{league_id}-{i}"),
                    format!("Home Team {n}"),
                    &format!("H{n}"),
                ),
                away_team: team(
                    format!("away-{league_id}-{i}"),
                    format!("Away Team {n}"),
                    &format!("A{n}"),
                ),
                score: random_score(rng),
                league: league.clone(),
            }
        })
        .collect()
}

/// Every catalog league's fixtures for `date`, in catalog order.
pub fn all_matches<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> Vec<Match> {
    popular_leagues()
        .iter()
        .flat_map(|league| matches_by_league(rng, &league.id, date))
        .collect()
}

fn fixture_league(i: usize) -> League {
    let n = i + 1;
    League {
        id: n.to_string(),
        name: format!("League {n}"),
        country: "England".to_string(),
        logo: Some(placeholder_image(24, 24, &format!("L{n}"))),
    }
}

/// The team side of a fixture alternates home and away, starting at home.
fn fixture_sides(team_id: &str, i: usize) -> (Team, Team) {
    let n = i + 1;
    let own = team(
        team_id.to_string(),
        format!("Team {team_id}"),
        &format!("T{team_id}"),
    );
    let opponent = team(format!("opponent-{i}"), format!("Opponent {n}"), &format!("O{n}"));
    if i % 2 == 0 {
        (own, opponent)
    } else {
        (opponent, own)
    }
}

pub fn team_upcoming_matches<R: Rng + ?Sized>(
    rng: &mut R,
    team_id: &str,
    today: NaiveDate,
) -> Vec<Match> {
    (0..FIXTURE_WINDOW)
        .map(|i| {
            let (home_team, away_team) = fixture_sides(team_id, i);
            Match {
                id: format!("upcoming-{team_id}-{i}"),
                date: today + Duration::days(i as i64 + 1),
                time: kickoff_time(rng),
                status: MatchStatus::NotStarted,
                minute: None,
                home_team,
                away_team,
                score: Score::default(),
                league: fixture_league(i),
            }
        })
        .collect()
}

pub fn team_recent_matches<R: Rng + ?Sized>(
    rng: &mut R,
    team_id: &str,
    today: NaiveDate,
) -> Vec<Match> {
    (0..FIXTURE_WINDOW)
        .map(|i| {
            let (home_team, away_team) = fixture_sides(team_id, i);
            let score = random_score(rng);
            Match {
                id: format!("recent-{team_id}-{i}"),
                date: today - Duration::days(i as i64 + 1),
                time: kickoff_time(rng),
                status: MatchStatus::Finished,
                minute: None,
                home_team,
                away_team,
                score,
                league: fixture_league(i),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 17).unwrap()
    }

    #[test]
    fn league_batch_is_three_to_five() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..40 {
            let matches = matches_by_league(&mut rng, "2", day());
            assert!((3..=5).contains(&matches.len()));
            for m in &matches {
                assert_eq!(m.league.name, "Bundesliga");
                assert!(m.score.home <= 3 && m.score.away <= 3);
                assert_eq!(m.minute.is_some(), m.status == MatchStatus::InPlay);
            }
        }
    }

    #[test]
    fn unknown_league_falls_back_to_first() {
        let mut rng = StdRng::seed_from_u64(5);
        let matches = matches_by_league(&mut rng, "nope", day());
        assert_eq!(matches[0].league.id, "1");
        assert_eq!(matches[0].id, "nope-0");
    }

    #[test]
    fn kickoff_is_zero_padded() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let t = kickoff_time(&mut rng);
            assert_eq!(t.len(), 5);
            assert!(t.ends_with('0'));
        }
    }

    #[test]
    fn fixtures_alternate_sides() {
        let mut rng = StdRng::seed_from_u64(1);
        let upcoming = team_upcoming_matches(&mut rng, "42", day());
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].home_team.id, "42");
        assert_eq!(upcoming[1].away_team.id, "42");
        assert!(upcoming.iter().all(|m| m.date > day()));

        let recent = team_recent_matches(&mut rng, "42", day());
        assert!(recent.iter().all(|m| m.status == MatchStatus::Finished));
        assert!(recent.iter().all(|m| m.date < day()));
    }
}
