use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;

use super::validation::{check_login, check_register};
use crate::auth::{
    SESSION_COOKIE, current_user, hash_password, require_admin, require_user, session_cookie,
    verify_password,
};
use crate::controller::state::AppState;
use crate::error::AppError;
use crate::model::{FavoriteRequest, LoginRequest, NotificationPrefs, RegisterRequest, Role};
use crate::storage::NewUser;

fn parse_body<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::validation("Invalid fields"))
}

fn email_in_use() -> AppError {
    AppError::validation("Email already in use")
}

fn team_id_required() -> AppError {
    AppError::validation("Team ID is required")
}

/// # Errors
///
/// Will return `Err` for invalid fields, a taken email, or a store failure.
pub async fn register(body: web::Bytes, state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let req = check_register(parse_body::<RegisterRequest>(&body)?)?;
    let store = state.store.as_ref();

    if store.find_user_by_email(&req.email).await?.is_some() {
        return Err(email_in_use());
    }

    // a concurrent registration can still win the insert
    let user = store
        .create_user(NewUser {
            name: Some(req.name),
            email: req.email,
            password_hash: hash_password(&req.password),
            role: Role::User,
        })
        .await
        .map_err(|e| {
            if e.is_conflict() {
                email_in_use()
            } else {
                AppError::from(e)
            }
        })?;
    store.notification_prefs(&user.id).await?;
    tracing::info!(user_id = %user.id, "registered user");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": { "id": user.id, "name": user.name, "email": user.email },
    })))
}

/// # Errors
///
/// Will return `Err(AppError::Unauthorized)` for unknown credentials.
pub async fn login(body: web::Bytes, state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let req = check_login(parse_body::<LoginRequest>(&body)?)?;
    let store = state.store.as_ref();

    let user = store
        .find_user_by_email(&req.email)
        .await?
        .filter(|u| {
            u.password_hash
                .as_deref()
                .is_some_and(|hash| verify_password(&req.password, hash))
        })
        .ok_or(AppError::Unauthorized)?;

    let token = store.create_session(&user.id).await?;
    tracing::debug!(user_id = %user.id, "session opened");
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(json!({ "success": true, "user": user })))
}

/// # Errors
///
/// Will return `Err` if the session cannot be deleted.
pub async fn logout(req: HttpRequest, state: Data<AppState>) -> Result<HttpResponse, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.store.delete_session(cookie.value()).await?;
    }
    let mut removal = session_cookie("");
    removal.make_removal();
    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "success": true })))
}

/// # Errors
///
/// Will return `Err(AppError::Unauthorized)` without a session.
pub async fn list_favorites(
    req: HttpRequest,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, state.store.as_ref()).await?;
    let favorites = state.store.favorite_teams(&user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "favorites": favorites })))
}

/// # Errors
///
/// Will return `Err` without a session or a `teamId`.
pub async fn add_favorite(
    req: HttpRequest,
    body: web::Bytes,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, state.store.as_ref()).await?;
    let request: FavoriteRequest = parse_body(&body)?;
    let team_id = request
        .team_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(team_id_required)?;

    let favorite = state.store.add_favorite_team(&user.id, &team_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "favorite": favorite })))
}

/// # Errors
///
/// Will return `Err` without a session or a `teamId` query parameter.
pub async fn remove_favorite(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, state.store.as_ref()).await?;
    let team_id = query
        .get("teamId")
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(team_id_required)?;

    state.store.remove_favorite_team(&user.id, team_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// # Errors
///
/// Will return `Err(AppError::Unauthorized)` without a session.
pub async fn get_notifications(
    req: HttpRequest,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, state.store.as_ref()).await?;
    let prefs = state.store.notification_prefs(&user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "prefs": prefs })))
}

/// Replaces all six switches; a body missing any of them is rejected.
///
/// # Errors
///
/// Will return `Err` without a session or for an incomplete body.
pub async fn update_notifications(
    req: HttpRequest,
    body: web::Bytes,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, state.store.as_ref()).await?;
    let prefs: NotificationPrefs = parse_body(&body)?;
    let prefs = state
        .store
        .update_notification_prefs(&user.id, prefs)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "prefs": prefs })))
}

/// # Errors
///
/// Will return `Err(AppError::Forbidden)` unless an admin is signed in.
pub async fn admin_users(req: HttpRequest, state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let admin = require_admin(&req, state.store.as_ref()).await?;
    let users = state.store.list_users().await?;
    tracing::debug!(admin_id = %admin.id, count = users.len(), "listed users");
    Ok(HttpResponse::Ok().json(users))
}

/// The signed-in user, or `null`.
///
/// # Errors
///
/// Will return `Err` if the session lookup fails.
pub async fn me(req: HttpRequest, state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let user = current_user(&req, state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
