use actix_files::Files;
use actix_web::web;

use super::{scoreboard, user};

/// Every route except static files.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(scoreboard::index))
        .route("/leagues/{id}", web::get().to(scoreboard::league_page))
        .route("/matches/{id}", web::get().to(scoreboard::match_page))
        .route("/teams/{id}", web::get().to(scoreboard::team_page))
        .route("/health", web::get().to(scoreboard::health))
        .route("/api/auth/register", web::post().to(user::register))
        .route("/api/auth/login", web::post().to(user::login))
        .route("/api/auth/logout", web::post().to(user::logout))
        .route("/api/auth/session", web::get().to(user::me))
        .route("/api/user/favorites", web::get().to(user::list_favorites))
        .route("/api/user/favorites", web::post().to(user::add_favorite))
        .route("/api/user/favorites", web::delete().to(user::remove_favorite))
        .route("/api/user/notifications", web::get().to(user::get_notifications))
        .route("/api/user/notifications", web::put().to(user::update_notifications))
        .route("/api/admin/users", web::get().to(user::admin_users));
}

pub fn static_files(dir: &str) -> Files {
    Files::new("/static", dir)
}
