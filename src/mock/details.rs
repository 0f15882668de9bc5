use chrono::NaiveDate;
use rand::Rng;

use super::catalog::{default_league, find_league};
use super::matches::{kickoff_time, random_score};
use super::roster::generate_players;
use super::{GeneratorConfig, HalftimeCaps};
use crate::model::{
    EventKind, HeadToHead, Lineups, Match, MatchDetails, MatchEvent, MatchLineup, MatchStats,
    MatchStatus, Player, Score, Side, StatPair, Team, placeholder_image,
};

const STARTERS: usize = 11;
const DEFAULT_LEAGUE_ID: &str = "3";

fn side_team(side: Side) -> Team {
    let (id, name, text) = match side {
        Side::Home => ("home-team", "Home Team", "HOME"),
        Side::Away => ("away-team", "Away Team", "AWAY"),
    };
    Team {
        id: id.to_string(),
        name: name.to_string(),
        logo: Some(placeholder_image(64, 64, text)),
    }
}

fn marker(kind: EventKind, minute: u32, description: &str) -> MatchEvent {
    MatchEvent {
        id: format!("event-{}", kind.label().replace('-', "")),
        kind,
        minute,
        team: Side::Home,
        player: None,
        assist_by: None,
        in_player: None,
        out_player: None,
        description: description.to_string(),
    }
}

fn pick_starter<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [Player]) -> &'a Player {
    &pool[rng.gen_range(0..pool.len().min(STARTERS))]
}

fn event_minute<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=90)
}

/// Rolled per-side counts that the timeline and the stats must agree on.
struct SideTally {
    goals: u32,
    yellow: u32,
    red: u32,
    subs: u32,
}

fn side_events<R: Rng + ?Sized>(
    rng: &mut R,
    side: Side,
    pool: &[Player],
    tally: &SideTally,
    events: &mut Vec<MatchEvent>,
) {
    let bench = pool.len().saturating_sub(STARTERS);

    for i in 0..tally.goals {
        let minute = event_minute(rng);
        let scorer = pick_starter(rng, pool).clone();
        let assister = pick_starter(rng, pool).clone();
        events.push(MatchEvent {
            id: format!("event-goal-{side}-{i}"),
            kind: EventKind::Goal,
            minute,
            team: side,
            description: format!(
                "Goal! {} scores for the {side} team. Assisted by {}.",
                scorer.name, assister.name
            ),
            player: Some(scorer),
            assist_by: Some(assister),
            in_player: None,
            out_player: None,
        });
    }

    for (kind, count, tag, label) in [
        (EventKind::YellowCard, tally.yellow, "yellow", "Yellow"),
        (EventKind::RedCard, tally.red, "red", "Red"),
    ] {
        for i in 0..count {
            let minute = event_minute(rng);
            let player = pick_starter(rng, pool).clone();
            events.push(MatchEvent {
                id: format!("event-{tag}-{side}-{i}"),
                kind,
                minute,
                team: side,
                description: format!("{label} card for {}.", player.name),
                player: Some(player),
                assist_by: None,
                in_player: None,
                out_player: None,
            });
        }
    }

    for i in 0..(tally.subs as usize).min(bench) {
        let minute = event_minute(rng);
        let out_player = pick_starter(rng, pool).clone();
        let in_player = pool[STARTERS + i].clone();
        events.push(MatchEvent {
            id: format!("event-sub-{side}-{i}"),
            kind: EventKind::Substitution,
            minute,
            team: side,
            description: format!(
                "Substitution for the {side} team. {} replaces {}.",
                in_player.name, out_player.name
            ),
            player: None,
            assist_by: None,
            in_player: Some(in_player),
            out_player: Some(out_player),
        });
    }
}

fn lineup(side: Side, pool: &[Player]) -> MatchLineup {
    let split = pool.len().min(STARTERS);
    let (formation, coach) = match side {
        Side::Home => ("4-3-3", "Home Coach"),
        Side::Away => ("4-2-3-1", "Away Coach"),
    };
    MatchLineup {
        team: side_team(side),
        formation: formation.to_string(),
        starting_xi: pool[..split].to_vec(),
        substitutes: pool[split..].to_vec(),
        coach: coach.to_string(),
    }
}

/// Half-time score is the full-time score clamped per side.
#[must_use]
pub fn halftime_score(full_time: Score, caps: HalftimeCaps) -> Score {
    Score {
        home: full_time.home.min(caps.home),
        away: full_time.away.min(caps.away),
    }
}

fn roll_stats<R: Rng + ?Sized>(rng: &mut R, home: &SideTally, away: &SideTally) -> MatchStats {
    let possession = rng.gen_range(35..=65);
    let shots_on_target = StatPair::new(
        home.goals + rng.gen_range(0..=5),
        away.goals + rng.gen_range(0..=5),
    );
    MatchStats {
        possession: StatPair::new(possession, 100 - possession),
        shots: StatPair::new(
            shots_on_target.home + rng.gen_range(2..=10),
            shots_on_target.away + rng.gen_range(2..=10),
        ),
        shots_on_target,
        corners: StatPair::new(rng.gen_range(0..=10), rng.gen_range(0..=10)),
        fouls: StatPair::new(rng.gen_range(5..=18), rng.gen_range(5..=18)),
        yellow_cards: StatPair::new(home.yellow, away.yellow),
        red_cards: StatPair::new(home.red, away.red),
        offsides: StatPair::new(rng.gen_range(0..=5), rng.gen_range(0..=5)),
    }
}

fn roll_h2h<R: Rng + ?Sized>(rng: &mut R) -> HeadToHead {
    let matches = rng.gen_range(0..=10);
    let home_wins = rng.gen_range(0..=matches);
    let away_wins = rng.gen_range(0..=matches - home_wins);
    HeadToHead {
        matches,
        home_wins,
        away_wins,
        draws: matches - home_wins - away_wins,
    }
}

/// Full match page data for `match_id`.
///
/// The league is taken from the id prefix when it names a catalog league
/// (`"4-2"` belongs to league 4), otherwise the Premier League is used.
pub fn match_details<R: Rng + ?Sized>(
    rng: &mut R,
    match_id: &str,
    date: NaiveDate,
    config: &GeneratorConfig,
) -> MatchDetails {
    let is_live = rng.gen_bool(0.5);
    let (status, minute) = if is_live {
        (MatchStatus::InPlay, Some(rng.gen_range(1..=90)))
    } else {
        (MatchStatus::Finished, Some(90))
    };
    let score = random_score(rng);

    let home_pool = generate_players(rng, config.player_pool_size);
    let away_pool = generate_players(rng, config.player_pool_size);

    let home = SideTally {
        goals: score.home,
        yellow: rng.gen_range(0..4),
        red: rng.gen_range(0..2),
        subs: rng.gen_range(1..=3),
    };
    let away = SideTally {
        goals: score.away,
        yellow: rng.gen_range(0..4),
        red: rng.gen_range(0..2),
        subs: rng.gen_range(1..=3),
    };

    let mut events = vec![marker(EventKind::KickOff, 0, "Kick-off")];
    side_events(rng, Side::Home, &home_pool, &home, &mut events);
    side_events(rng, Side::Away, &away_pool, &away, &mut events);
    events.push(marker(EventKind::HalfTime, 45, "Half-time"));
    if status == MatchStatus::Finished {
        events.push(marker(EventKind::FullTime, 90, "Full-time"));
    }
    // stable: ties keep insertion order
    events.sort_by_key(|e| e.minute);

    let league = match_id
        .split_once('-')
        .and_then(|(prefix, _)| find_league(prefix))
        .or_else(|| find_league(DEFAULT_LEAGUE_ID))
        .unwrap_or_else(default_league);

    let stats = roll_stats(rng, &home, &away);
    let h2h = roll_h2h(rng);

    MatchDetails {
        summary: Match {
            id: match_id.to_string(),
            date,
            time: kickoff_time(rng),
            status,
            minute,
            home_team: side_team(Side::Home),
            away_team: side_team(Side::Away),
            score,
            league,
        },
        halftime: halftime_score(score, config.halftime_caps),
        venue: "Stadium Name".to_string(),
        referee: "Referee Name".to_string(),
        events,
        lineups: Lineups {
            home: lineup(Side::Home, &home_pool),
            away: lineup(Side::Away, &away_pool),
        },
        stats,
        h2h,
    }
}
