use ahash::AHashMap;

use crate::model::{League, Match, StatusFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueGroup {
    pub league: League,
    pub matches: Vec<Match>,
}

#[must_use]
pub fn filter_matches(matches: &[Match], filter: StatusFilter) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| filter.admits(m))
        .cloned()
        .collect()
}

/// Buckets matches by league id. Groups keep the order in which their league
/// first appears, and matches keep their order inside a group.
#[must_use]
pub fn group_by_league(matches: &[Match]) -> Vec<LeagueGroup> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<LeagueGroup> = Vec::new();

    for m in matches {
        match index.get(m.league.id.as_str()) {
            Some(&i) => groups[i].matches.push(m.clone()),
            None => {
                index.insert(m.league.id.as_str(), groups.len());
                groups.push(LeagueGroup {
                    league: m.league.clone(),
                    matches: vec![m.clone()],
                });
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::all_matches;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> Vec<Match> {
        let mut rng = StdRng::seed_from_u64(3);
        all_matches(&mut rng, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    #[test]
    fn groups_follow_catalog_order() {
        let matches = sample();
        let groups = group_by_league(&matches);
        let ids: Vec<&str> = groups.iter().map(|g| g.league.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        let total: usize = groups.iter().map(|g| g.matches.len()).sum();
        assert_eq!(total, matches.len());
    }

    #[test]
    fn live_filter_only_keeps_in_play() {
        let live = filter_matches(&sample(), StatusFilter::Live);
        assert!(live.iter().all(|m| m.status.is_live()));
        let finished = filter_matches(&sample(), StatusFilter::Finished);
        assert!(finished.iter().all(|m| m.status == crate::model::MatchStatus::Finished));
    }
}
