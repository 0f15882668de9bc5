use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};

use crate::error::AppError;
use crate::model::{Role, User};
use crate::storage::UserStore;

pub const SESSION_COOKIE: &str = "session";

#[must_use]
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// The user owning the request's session cookie, if any.
///
/// # Errors
///
/// Will return `Err` if the store lookup fails.
pub async fn current_user(
    req: &HttpRequest,
    store: &dyn UserStore,
) -> Result<Option<User>, AppError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };
    Ok(store.find_session_user(cookie.value()).await?)
}

/// # Errors
///
/// Will return `Err(AppError::Unauthorized)` without a valid session.
pub async fn require_user(req: &HttpRequest, store: &dyn UserStore) -> Result<User, AppError> {
    current_user(req, store).await?.ok_or(AppError::Unauthorized)
}

/// Admin routes answer 403 whether the session is missing or just lacks the
/// role.
///
/// # Errors
///
/// Will return `Err(AppError::Forbidden)` unless the session user is an admin.
pub async fn require_admin(req: &HttpRequest, store: &dyn UserStore) -> Result<User, AppError> {
    match current_user(req, store).await? {
        Some(user) if user.role == Role::Admin => Ok(user),
        Some(user) => {
            tracing::warn!(user_id = %user.id, "non-admin requested an admin route");
            Err(AppError::Forbidden)
        }
        None => Err(AppError::Forbidden),
    }
}
