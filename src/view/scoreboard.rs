use chrono::{DateTime, Duration, NaiveDate, Utc};
use maud::{Markup, html};

use super::layout::{page, team_badge};
use crate::controller::scoreboard::LeagueGroup;
use crate::model::{
    Country, League, Match, News, StatusFilter, format_time_ago, minute_label,
};

const FILTERS: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Live,
    StatusFilter::Finished,
];

/// Everything the home page renders, already filtered and grouped.
pub struct ScoreboardView<'a> {
    pub date: NaiveDate,
    pub filter: StatusFilter,
    pub groups: &'a [LeagueGroup],
    /// True only while the first fetch for `date` is outstanding.
    pub loading: bool,
    pub error: Option<&'a str>,
    pub leagues: &'a [League],
    pub countries: &'a [Country],
    pub news: &'a [News],
    pub now: DateTime<Utc>,
    pub refresh_secs: u64,
}

fn filter_label(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "All",
        StatusFilter::Live => "Live",
        StatusFilter::Finished => "Finished",
    }
}

fn board_url(date: NaiveDate, filter: StatusFilter) -> String {
    format!("/?date={}&filter={}", date.format("%Y-%m-%d"), filter.as_str())
}

#[must_use]
pub fn render_filters(date: NaiveDate, active: StatusFilter) -> Markup {
    let prev = date - Duration::days(1);
    let next = date + Duration::days(1);
    html! {
        div class="filters" {
            div class="filter-pills" {
                @for filter in FILTERS {
                    a class=(if filter == active { "pill active" } else { "pill" })
                        href=(board_url(date, filter)) { (filter_label(filter)) }
                }
            }
            div class="date-picker" {
                a class="date-step" href=(board_url(prev, active)) { "<" }
                span class="date" { (date.format("%a, %d %b %Y").to_string()) }
                a class="date-step" href=(board_url(next, active)) { ">" }
            }
        }
    }
}

#[must_use]
pub fn render_match_card(m: &Match) -> Markup {
    html! {
        div class="match-card" data-status=(m.status.to_string()) {
            div class="teams" {
                a class="team" href=(format!("/teams/{}", m.home_team.id)) {
                    (team_badge(&m.home_team.name, m.home_team.logo.as_deref()))
                    span class="team-name" { (m.home_team.name) }
                }
                a class="team" href=(format!("/teams/{}", m.away_team.id)) {
                    (team_badge(&m.away_team.name, m.away_team.logo.as_deref()))
                    span class="team-name" { (m.away_team.name) }
                }
            }
            a class="score" href=(format!("/matches/{}", m.id)) {
                @if let Some(minute) = m.minute.filter(|_| m.status.is_live()) {
                    span class="minute live" { (minute_label(minute)) }
                } @else {
                    span class="kickoff" { (m.time) }
                }
                span class="score-line" { (m.score.home) " - " (m.score.away) }
            }
        }
    }
}

#[must_use]
pub fn render_league_section(group: &LeagueGroup) -> Markup {
    let league = &group.league;
    html! {
        section class="league-section" {
            div class="league-heading" {
                (team_badge(&league.name, league.logo.as_deref()))
                h2 { (league.name) }
                span class="country" { (league.country) }
                a class="view-all" href=(format!("/leagues/{}", league.id)) { "View All" }
            }
            @for m in &group.matches {
                (render_match_card(m))
            }
        }
    }
}

/// The swappable board. Under the live filter it re-requests itself every
/// refresh interval.
#[must_use]
pub fn render_scoreboard_fragment(view: &ScoreboardView<'_>) -> Markup {
    let poll_live = view.filter == StatusFilter::Live && view.refresh_secs > 0;
    let fragment_url = format!("{}&fragment=1", board_url(view.date, view.filter));
    html! {
        div id="scoreboard"
            hx-get=[poll_live.then_some(fragment_url.as_str())]
            hx-trigger=[poll_live.then(|| format!("every {}s", view.refresh_secs))]
            hx-swap=[poll_live.then_some("outerHTML")] {
            @if let Some(error) = view.error {
                div class="error-banner" { "Scores may be stale: " (error) }
            }
            @if view.loading {
                div class="loading" { "Loading matches..." }
            } @else if view.groups.is_empty() {
                div class="empty" { "No matches found" }
            } @else {
                @for group in view.groups {
                    (render_league_section(group))
                }
            }
        }
    }
}

#[must_use]
pub fn render_sidebar(leagues: &[League], countries: &[Country]) -> Markup {
    html! {
        aside class="sidebar" {
            h3 { "Popular Leagues" }
            ul {
                @for league in leagues {
                    li {
                        a href=(format!("/leagues/{}", league.id)) {
                            (team_badge(&league.name, league.logo.as_deref()))
                            span { (league.name) }
                        }
                    }
                }
            }
            h3 { "Countries" }
            ul class="countries" {
                @for country in countries {
                    li data-country=(country.id) { (country.name) }
                }
            }
        }
    }
}

#[must_use]
pub fn render_news(news: &[News], now: DateTime<Utc>) -> Markup {
    html! {
        aside class="news" {
            h3 { "Trending News" }
            @for item in news {
                article class="news-item" {
                    img src=(item.image) alt=(item.title);
                    div {
                        a href=(item.url) { h4 { (item.title) } }
                        p { (item.summary) }
                        span class="ago" { (format_time_ago(now - item.date)) }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_scoreboard_page(view: &ScoreboardView<'_>) -> Markup {
    let body = html! {
        div class="layout" {
            (render_sidebar(view.leagues, view.countries))
            div class="board" {
                (render_filters(view.date, view.filter))
                (render_scoreboard_fragment(view))
            }
            (render_news(view.news, view.now))
        }
    };
    page("Matchday - Live Scores", &body)
}

#[must_use]
pub fn render_league_page(
    league: &League,
    matches: &[Match],
    filter: StatusFilter,
    date: NaiveDate,
) -> Markup {
    let body = html! {
        div class="league-page" {
            div class="league-heading" {
                (team_badge(&league.name, league.logo.as_deref()))
                h1 { (league.name) }
                span class="country" { (league.country) }
            }
            div class="filter-pills" {
                @for f in FILTERS {
                    a class=(if f == filter { "pill active" } else { "pill" })
                        href=(format!("/leagues/{}?date={}&filter={}", league.id, date.format("%Y-%m-%d"), f.as_str())) {
                        (filter_label(f))
                    }
                }
            }
            @if matches.is_empty() {
                div class="empty" { "No matches found" }
            } @else {
                @for m in matches {
                    (render_match_card(m))
                }
            }
        }
    };
    page(&league.name, &body)
}
