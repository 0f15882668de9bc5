use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use matchday::mock::{GeneratorConfig, HalftimeCaps, halftime_score, match_details};
use matchday::model::{EventKind, MatchDetails, MatchStatus, Score, Side};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn details(seed: u64, config: &GeneratorConfig) -> MatchDetails {
    let mut rng = StdRng::seed_from_u64(seed);
    match_details(&mut rng, "m1", day(), config)
}

fn count(d: &MatchDetails, kind: EventKind, side: Option<Side>) -> u32 {
    d.events
        .iter()
        .filter(|e| e.kind == kind && side.is_none_or(|s| e.team == s))
        .count() as u32
}

#[test]
fn goals_match_the_score() {
    let config = GeneratorConfig::default();
    for seed in 0..200 {
        let d = details(seed, &config);
        assert_eq!(count(&d, EventKind::Goal, Some(Side::Home)), d.summary.score.home);
        assert_eq!(count(&d, EventKind::Goal, Some(Side::Away)), d.summary.score.away);
        for goal in d.events.iter().filter(|e| e.kind == EventKind::Goal) {
            assert!(goal.player.is_some());
            assert!(goal.assist_by.is_some());
        }
    }
}

#[test]
fn events_are_sorted_with_period_markers() {
    let config = GeneratorConfig::default();
    for seed in 0..200 {
        let d = details(seed, &config);
        assert!(d.events.windows(2).all(|w| w[0].minute <= w[1].minute));

        let kickoffs: Vec<_> = d.events.iter().filter(|e| e.kind == EventKind::KickOff).collect();
        assert_eq!(kickoffs.len(), 1);
        assert_eq!(kickoffs[0].minute, 0);
        assert_eq!(d.events[0].kind, EventKind::KickOff);

        let halftimes: Vec<_> = d.events.iter().filter(|e| e.kind == EventKind::HalfTime).collect();
        assert_eq!(halftimes.len(), 1);
        assert_eq!(halftimes[0].minute, 45);

        let finished = d.summary.status == MatchStatus::Finished;
        let fulltime: Vec<_> = d.events.iter().filter(|e| e.kind == EventKind::FullTime).collect();
        assert_eq!(fulltime.len(), usize::from(finished));
        if finished {
            assert_eq!(fulltime[0].minute, 90);
        }

        assert!(d.events.iter().all(|e| e.minute <= 90));
    }
}

#[test]
fn status_is_live_or_finished() {
    let config = GeneratorConfig::default();
    let mut seen_live = false;
    let mut seen_finished = false;
    for seed in 0..100 {
        let d = details(seed, &config);
        match d.summary.status {
            MatchStatus::InPlay => {
                seen_live = true;
                assert!(d.summary.minute.is_some_and(|m| (1..=90).contains(&m)));
            }
            MatchStatus::Finished => {
                seen_finished = true;
                assert_eq!(d.summary.minute, Some(90));
            }
            MatchStatus::NotStarted => panic!("match details never start unplayed"),
        }
    }
    assert!(seen_live && seen_finished);
}

#[test]
fn lineups_split_the_pool() {
    let config = GeneratorConfig::default();
    for seed in 0..50 {
        let d = details(seed, &config);
        for lineup in [&d.lineups.home, &d.lineups.away] {
            assert_eq!(lineup.starting_xi.len(), 11);
            assert_eq!(lineup.substitutes.len(), 7);
        }
    }
}

#[test]
fn substitutes_come_off_the_bench_in_order() {
    let config = GeneratorConfig::default();
    for seed in 0..100 {
        let d = details(seed, &config);
        for (side, lineup) in [(Side::Home, &d.lineups.home), (Side::Away, &d.lineups.away)] {
            let mut subs: Vec<_> = d
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Substitution && e.team == side)
                .collect();
            assert!((1..=3).contains(&subs.len()));
            subs.sort_by_key(|e| e.id.clone());
            for (i, sub) in subs.iter().enumerate() {
                assert_eq!(sub.in_player.as_ref(), Some(&lineup.substitutes[i]));
                let out = sub.out_player.as_ref().unwrap();
                assert!(lineup.starting_xi.contains(out));
            }
        }
    }
}

#[test]
fn card_stats_agree_with_events() {
    let config = GeneratorConfig::default();
    for seed in 0..100 {
        let d = details(seed, &config);
        assert_eq!(d.stats.yellow_cards.home, count(&d, EventKind::YellowCard, Some(Side::Home)));
        assert_eq!(d.stats.yellow_cards.away, count(&d, EventKind::YellowCard, Some(Side::Away)));
        assert_eq!(d.stats.red_cards.home, count(&d, EventKind::RedCard, Some(Side::Home)));
        assert_eq!(d.stats.red_cards.away, count(&d, EventKind::RedCard, Some(Side::Away)));
        assert!(d.stats.yellow_cards.home <= 3 && d.stats.red_cards.away <= 1);
        assert_eq!(d.stats.possession.home + d.stats.possession.away, 100);
        assert!(d.stats.shots_on_target.home >= d.summary.score.home);
        assert!(d.stats.shots.away >= d.stats.shots_on_target.away);

        let h2h = d.h2h;
        assert_eq!(h2h.home_wins + h2h.away_wins + h2h.draws, h2h.matches);
    }
}

#[test]
fn halftime_respects_caps() {
    let caps = HalftimeCaps { home: 1, away: 0 };
    let config = GeneratorConfig {
        halftime_caps: caps,
        ..GeneratorConfig::default()
    };
    for seed in 0..100 {
        let d = details(seed, &config);
        assert!(d.halftime.home <= caps.home.min(d.summary.score.home));
        assert!(d.halftime.away <= caps.away.min(d.summary.score.away));
    }
    assert_eq!(
        halftime_score(Score { home: 3, away: 3 }, HalftimeCaps::default()),
        Score { home: 2, away: 1 }
    );
    assert_eq!(
        halftime_score(Score { home: 0, away: 1 }, HalftimeCaps::default()),
        Score { home: 0, away: 1 }
    );
}

#[test]
fn minimal_pool_has_no_bench() {
    let config = GeneratorConfig {
        player_pool_size: 11,
        ..GeneratorConfig::default()
    };
    for seed in 0..50 {
        let d = details(seed, &config);
        assert!(d.lineups.home.substitutes.is_empty());
        assert_eq!(count(&d, EventKind::Substitution, None), 0);
    }
}

#[test]
fn league_follows_match_id_prefix() {
    let config = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(4);
    let d = match_details(&mut rng, "5-2", day(), &config);
    assert_eq!(d.summary.league.id, "5");
    assert_eq!(details(4, &config).summary.league.id, "3");
}

#[test]
fn same_seed_same_details() {
    let config = GeneratorConfig::default();
    assert_eq!(details(99, &config), details(99, &config));
}
