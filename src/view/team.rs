use maud::{Markup, html};

use super::layout::{page, team_badge};
use super::scoreboard::render_match_card;
use crate::model::{FormResult, Match, Position, TeamDetails, TeamStats};

fn form_class(result: FormResult) -> (&'static str, &'static str) {
    match result {
        FormResult::W => ("form win", "W"),
        FormResult::D => ("form draw", "D"),
        FormResult::L => ("form loss", "L"),
    }
}

fn render_team_header(team: &TeamDetails) -> Markup {
    html! {
        div class="team-header" {
            (team_badge(&team.name, team.logo.as_deref()))
            div {
                h1 { (team.name) }
                p { (team.country) " · Founded " (team.founded) }
                p { "Venue: " (team.venue) " · Coach: " (team.coach) }
            }
        }
    }
}

/// Players grouped by position in squad order.
fn render_roster(team: &TeamDetails) -> Markup {
    html! {
        section class="roster" {
            h3 { "Squad" }
            @for position in Position::ALL {
                @let players: Vec<_> = team.players.iter().filter(|p| p.position == position).collect();
                @if !players.is_empty() {
                    h4 { (position.to_string()) "s" }
                    table class="styled-table" {
                        thead { tr { th { "#" } th { "Name" } th { "Nationality" } th { "Age" } } }
                        tbody {
                            @for p in players {
                                tr { td { (p.number) } td { (p.name) } td { (p.nationality) } td { (p.age) } }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_team_stats(stats: &TeamStats) -> Markup {
    html! {
        section class="team-stats" {
            h3 { "Season" }
            table class="styled-table" {
                tbody {
                    tr { th { "Played" } td { (stats.matches.played) } }
                    tr { th { "Won" } td { (stats.matches.wins) } }
                    tr { th { "Drawn" } td { (stats.matches.draws) } }
                    tr { th { "Lost" } td { (stats.matches.losses) } }
                    tr { th { "Goals for" } td { (stats.goals.scored) } }
                    tr { th { "Goals against" } td { (stats.goals.against) } }
                    tr { th { "Clean sheets" } td { (stats.clean_sheets) } }
                }
            }
            div class="form-strip" {
                @for result in &stats.form {
                    @let (class, letter) = form_class(*result);
                    span class=(class) { (letter) }
                }
            }
        }
    }
}

fn match_list(title: &str, matches: &[Match]) -> Markup {
    html! {
        section class="team-matches" {
            h3 { (title) }
            @for m in matches {
                (render_match_card(m))
            }
        }
    }
}

#[must_use]
pub fn render_team_page(
    team: &TeamDetails,
    stats: &TeamStats,
    upcoming: &[Match],
    recent: &[Match],
) -> Markup {
    let body = html! {
        div class="team-page" {
            (render_team_header(team))
            (render_team_stats(stats))
            (match_list("Upcoming matches", upcoming))
            (match_list("Recent matches", recent))
            (render_roster(team))
        }
    };
    page(&team.name, &body)
}
