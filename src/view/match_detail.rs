use maud::{Markup, html};

use super::layout::{page, team_badge};
use crate::model::{
    EventKind, HeadToHead, Lineups, MatchDetails, MatchEvent, MatchLineup, MatchStats, Side,
    minute_label,
};

fn render_header(details: &MatchDetails) -> Markup {
    let m = &details.summary;
    html! {
        div class="match-header" {
            div class="match-meta" {
                a href=(format!("/leagues/{}", m.league.id)) { (m.league.name) }
                span { (m.date.format("%d %b %Y").to_string()) " " (m.time) }
            }
            div class="match-teams" {
                a class="team" href=(format!("/teams/{}", m.home_team.id)) {
                    (team_badge(&m.home_team.name, m.home_team.logo.as_deref()))
                    span { (m.home_team.name) }
                }
                div class="match-score" {
                    span class="score-line" { (m.score.home) " - " (m.score.away) }
                    @if m.status.is_live() {
                        @if let Some(minute) = m.minute {
                            span class="minute live" { (minute_label(minute)) }
                        }
                    } @else {
                        span class="status" { (m.status.to_string()) }
                    }
                    span class="halftime" { "HT " (details.halftime.home) " - " (details.halftime.away) }
                }
                a class="team" href=(format!("/teams/{}", m.away_team.id)) {
                    (team_badge(&m.away_team.name, m.away_team.logo.as_deref()))
                    span { (m.away_team.name) }
                }
            }
            div class="match-officials" {
                span { "Venue: " (details.venue) }
                span { "Referee: " (details.referee) }
            }
        }
    }
}

fn event_row(event: &MatchEvent) -> Markup {
    let side = if event.kind.is_period_marker() {
        "marker"
    } else {
        match event.team {
            Side::Home => "home",
            Side::Away => "away",
        }
    };
    html! {
        li class=(format!("event {side} {}", event.kind.label())) {
            span class="event-minute" { (event.minute) "'" }
            @if event.kind.is_period_marker() {
                span class="event-marker" { (event.description) }
            } @else {
                span class="event-kind" { (event.kind.label()) }
                span class="event-text" { (event.description) }
            }
        }
    }
}

#[must_use]
pub fn render_timeline(events: &[MatchEvent]) -> Markup {
    html! {
        section class="timeline" {
            h3 { "Timeline" }
            @if events.is_empty() {
                p class="empty" { "No events yet" }
            } @else {
                ol {
                    @for event in events {
                        (event_row(event))
                    }
                }
            }
        }
    }
}

fn lineup_column(lineup: &MatchLineup) -> Markup {
    html! {
        div class="lineup" {
            h4 { (lineup.team.name) " (" (lineup.formation) ")" }
            ol class="starting-xi" {
                @for p in &lineup.starting_xi {
                    li { span class="shirt" { (p.number) } " " (p.name) " " small { (p.position.to_string()) } }
                }
            }
            h5 { "Substitutes" }
            ul class="substitutes" {
                @for p in &lineup.substitutes {
                    li { span class="shirt" { (p.number) } " " (p.name) }
                }
            }
            p class="coach" { "Coach: " (lineup.coach) }
        }
    }
}

#[must_use]
pub fn render_lineups(lineups: &Lineups) -> Markup {
    html! {
        section class="lineups" {
            h3 { "Lineups" }
            div class="lineup-columns" {
                (lineup_column(&lineups.home))
                (lineup_column(&lineups.away))
            }
        }
    }
}

#[must_use]
pub fn render_stats(stats: &MatchStats) -> Markup {
    html! {
        section class="stats" {
            h3 { "Statistics" }
            @for (label, pair) in stats.rows() {
                div class="stat-row" {
                    span class="stat-home" { (pair.home) }
                    div class="stat-bar" {
                        span class="stat-label" { (label) }
                        div class="bar" {
                            div class="bar-home" style=(format!("width: {}%", pair.home_share())) {}
                        }
                    }
                    span class="stat-away" { (pair.away) }
                }
            }
        }
    }
}

fn render_h2h(h2h: &HeadToHead) -> Markup {
    html! {
        section class="h2h" {
            h3 { "Head to head" }
            p { (h2h.matches) " matches: " (h2h.home_wins) " home wins, " (h2h.draws) " draws, " (h2h.away_wins) " away wins" }
        }
    }
}

#[must_use]
pub fn render_match_page(details: &MatchDetails) -> Markup {
    let m = &details.summary;
    let goals = details
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Goal)
        .count();
    let body = html! {
        div class="match-page" data-goals=(goals) {
            (render_header(details))
            (render_timeline(&details.events))
            (render_lineups(&details.lineups))
            (render_stats(&details.stats))
            (render_h2h(&details.h2h))
        }
    };
    page(&format!("{} vs {}", m.home_team.name, m.away_team.name), &body)
}
