use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::collections::HashMap;

use super::aggregators::{filter_matches, group_by_league};
use super::data_service::scoreboard_for_date;
use crate::controller::state::AppState;
use crate::error::AppError;
use crate::mock;
use crate::model::StatusFilter;
use crate::view::match_detail::render_match_page;
use crate::view::scoreboard::{
    ScoreboardView, render_league_page, render_scoreboard_fragment, render_scoreboard_page,
};
use crate::view::team::render_team_page;

fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map_or("", |s| s.trim())
}

fn flag(query: &HashMap<String, String>, key: &str) -> bool {
    match get_param_str(query, key) {
        "1" => true,
        "0" | "" => false,
        other => other.parse().unwrap_or(false),
    }
}

fn date_param(query: &HashMap<String, String>) -> Result<NaiveDate, AppError> {
    match get_param_str(query, "date") {
        "" => Ok(Utc::now().date_naive()),
        raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::validation("date must be YYYY-MM-DD")),
    }
}

fn html(markup: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

/// Home scoreboard. `date` selects the polled day, `filter` narrows by
/// status, `refresh=1` forces an out-of-cycle fetch and `fragment=1` returns
/// only the board for htmx swaps.
///
/// # Errors
///
/// Will return `Err` for a malformed date.
pub async fn index(
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let date = date_param(&query)?;
    let filter = StatusFilter::parse(query.get("filter").map(String::as_str));
    let json = flag(&query, "json");

    let snapshot = scoreboard_for_date(&state, date, flag(&query, "refresh")).await;
    let matches = snapshot
        .data
        .as_deref()
        .map(|all| filter_matches(all, filter))
        .unwrap_or_default();
    let error = snapshot.error.as_ref().map(|e| e.message().to_string());

    if json {
        return Ok(HttpResponse::Ok().json(json!({
            "date": date,
            "filter": filter.as_str(),
            "loading": snapshot.loading,
            "error": error,
            "matches": matches,
        })));
    }

    let groups = group_by_league(&matches);
    let leagues = mock::popular_leagues();
    let countries = mock::countries();
    let news = mock::news(Utc::now());
    let view = ScoreboardView {
        date,
        filter,
        groups: &groups,
        loading: snapshot.loading && snapshot.data.is_none(),
        error: error.as_deref(),
        leagues: &leagues,
        countries: &countries,
        news: &news,
        now: Utc::now(),
        refresh_secs: state.refresh_interval.as_secs(),
    };

    if flag(&query, "fragment") {
        Ok(html(render_scoreboard_fragment(&view)))
    } else {
        Ok(html(render_scoreboard_page(&view)))
    }
}

/// # Errors
///
/// Will return `Err` for an unknown league or a failing source.
pub async fn league_page(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let league_id = path.into_inner();
    let date = date_param(&query)?;
    let filter = StatusFilter::parse(query.get("filter").map(String::as_str));

    let leagues = state.source.leagues().await?;
    let league = leagues
        .into_iter()
        .find(|l| l.id == league_id)
        .ok_or_else(|| AppError::NotFound(format!("league {league_id}")))?;
    let matches = state.source.league_matches(&league_id, date).await?;
    let matches = filter_matches(&matches, filter);

    if flag(&query, "json") {
        return Ok(HttpResponse::Ok().json(json!({ "league": league, "matches": matches })));
    }
    Ok(html(render_league_page(&league, &matches, filter, date)))
}

/// # Errors
///
/// Will return `Err` if the source fails.
pub async fn match_page(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = path.into_inner();
    let details = state.source.match_details(&match_id).await?;
    if flag(&query, "json") {
        return Ok(HttpResponse::Ok().json(details));
    }
    Ok(html(render_match_page(&details)))
}

/// # Errors
///
/// Will return `Err` if any of the team lookups fail.
pub async fn team_page(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = path.into_inner();
    let source = &state.source;
    let (team, stats, upcoming, recent) = futures::try_join!(
        source.team_details(&team_id),
        source.team_stats(&team_id),
        source.team_upcoming(&team_id),
        source.team_recent(&team_id),
    )?;

    if flag(&query, "json") {
        return Ok(HttpResponse::Ok().json(json!({
            "team": team,
            "stats": stats,
            "upcoming": upcoming,
            "recent": recent,
        })));
    }
    Ok(html(render_team_page(&team, &stats, &upcoming, &recent)))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
