use chrono::{DateTime, Duration, Utc};

use crate::model::{Country, League, News, placeholder_image};

const LEAGUES: [(&str, &str, &str, &str); 10] = [
    ("1", "La Liga", "Spain", "LL"),
    ("2", "Bundesliga", "Germany", "BL"),
    ("3", "Premier League", "England", "PL"),
    ("4", "Serie A", "Italy", "SA"),
    ("5", "Ligue 1", "France", "L1"),
    ("6", "UEFA Champions League", "Europe", "UCL"),
    ("7", "UEFA Europa League", "Europe", "UEL"),
    ("8", "Major League Soccer", "USA", "MLS"),
    ("9", "Brasileirão", "Brazil", "BR"),
    ("10", "Australian League", "Australia", "AL"),
];

const COUNTRIES: [&str; 10] = [
    "Spain",
    "Germany",
    "England",
    "Italy",
    "France",
    "Netherlands",
    "Portugal",
    "Brazil",
    "Argentina",
    "USA",
];

// (title, summary, image text)
const NEWS: [(&str, &str, &str); 5] = [
    (
        "Real Sociedad 1-4 FC Barcelona: It's all starting to click!",
        "Barcelona's impressive away win shows Flick's system is working",
        "FCB",
    ),
    (
        "The squad for the trip to San Sebastian Xavi names...",
        "Barcelona announces squad for upcoming away match",
        "Squad",
    ),
    (
        "Carlo Ancelotti in the running to be named UEFA Coach of the Year",
        "Real Madrid manager among favorites for prestigious award",
        "Carlo",
    ),
    (
        "FC Barcelona leads in Golden Boy 2022 candidates",
        "Multiple Barcelona youngsters nominated for award",
        "Barca",
    ),
    (
        "Mohamed Salah can become Liverpool's outright leading scorer",
        "Egyptian star closing in on club record",
        "Salah",
    ),
];

fn league_from(&(id, name, country, short): &(&str, &str, &str, &str)) -> League {
    League {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        logo: Some(placeholder_image(24, 24, short)),
    }
}

#[must_use]
pub fn popular_leagues() -> Vec<League> {
    LEAGUES.iter().map(league_from).collect()
}

/// First catalog entry, used when a requested league is unknown.
#[must_use]
pub fn default_league() -> League {
    league_from(&LEAGUES[0])
}

#[must_use]
pub fn find_league(league_id: &str) -> Option<League> {
    popular_leagues().into_iter().find(|l| l.id == league_id)
}

#[must_use]
pub fn countries() -> Vec<Country> {
    COUNTRIES
        .iter()
        .enumerate()
        .map(|(i, name)| Country {
            id: (i + 1).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

/// Headlines dated one day apart, newest first.
#[must_use]
pub fn news(now: DateTime<Utc>) -> Vec<News> {
    NEWS.iter()
        .enumerate()
        .map(|(i, (title, summary, image))| News {
            id: (i + 1).to_string(),
            title: (*title).to_string(),
            summary: (*summary).to_string(),
            image: placeholder_image(80, 120, image),
            date: now - Duration::days(i as i64),
            url: "#".to_string(),
        })
        .collect()
}
