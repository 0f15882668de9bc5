mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, test};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use matchday::AppState;
use matchday::auth::SESSION_COOKIE;
use matchday::controller::routes;
use matchday::controller::source::MockSource;
use matchday::mock::GeneratorConfig;
use matchday::model::{FavoriteTeam, NotificationPrefs, Role, User};
use matchday::storage::{NewUser, SqliteStore, StorageError, UserStore};

use common::{TEST_SEED, seed_user, setup_test_context};

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .configure(routes::configure),
        )
        .await
    };
}

fn session_from<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

#[actix_web::test]
async fn favorites_need_a_session() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/user/favorites").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let req = test::TestRequest::get()
        .uri("/api/user/notifications")
        .cookie(Cookie::new(SESSION_COOKIE, "not-a-session"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[actix_web::test]
async fn register_login_and_manage_favorites() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": "Ada", "email": "Ada@Example.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("ada@example.com"));

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session = session_from(&resp).ok_or("no session cookie")?;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["user"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/user/favorites")
        .cookie(session.clone())
        .set_json(json!({ "teamId": "33" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["favorite"]["teamId"], json!("33"));

    let req = test::TestRequest::post()
        .uri("/api/user/favorites")
        .cookie(session.clone())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Team ID is required"));

    let req = test::TestRequest::get()
        .uri("/api/user/favorites")
        .cookie(session.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["favorites"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri("/api/user/favorites?teamId=33")
        .cookie(session.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/user/favorites")
        .cookie(session.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["favorites"], json!([]));

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(session.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/user/favorites")
        .cookie(session)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[actix_web::test]
async fn registration_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    seed_user(&ctx.store, "taken@example.com", "secret1", Role::User).await?;
    let app = init_app!(ctx);

    for (payload, message) in [
        (json!({ "name": "A", "email": "nope", "password": "secret1" }), "Invalid fields"),
        (json!({ "name": "A", "email": "a@b.co", "password": "123" }), "Invalid fields"),
        (json!({ "email": "a@b.co" }), "Invalid fields"),
        (
            json!({ "name": "A", "email": "taken@example.com", "password": "secret1" }),
            "Email already in use",
        ),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], json!(message));
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "taken@example.com", "password": "wrong-one" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

/// Store whose email lookup always misses, as when another registration
/// for the same address lands between the lookup and the insert.
struct LateLookupStore(Arc<SqliteStore>);

#[async_trait]
impl UserStore for LateLookupStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        self.0.create_user(user).await
    }
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, StorageError> {
        Ok(None)
    }
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, StorageError> {
        self.0.find_user_by_id(user_id).await
    }
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.0.list_users().await
    }
    async fn set_role(&self, user_id: &str, role: Role) -> Result<(), StorageError> {
        self.0.set_role(user_id, role).await
    }
    async fn create_session(&self, user_id: &str) -> Result<String, StorageError> {
        self.0.create_session(user_id).await
    }
    async fn find_session_user(&self, token: &str) -> Result<Option<User>, StorageError> {
        self.0.find_session_user(token).await
    }
    async fn delete_session(&self, token: &str) -> Result<(), StorageError> {
        self.0.delete_session(token).await
    }
    async fn favorite_teams(&self, user_id: &str) -> Result<Vec<FavoriteTeam>, StorageError> {
        self.0.favorite_teams(user_id).await
    }
    async fn add_favorite_team(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<FavoriteTeam, StorageError> {
        self.0.add_favorite_team(user_id, team_id).await
    }
    async fn remove_favorite_team(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<bool, StorageError> {
        self.0.remove_favorite_team(user_id, team_id).await
    }
    async fn notification_prefs(&self, user_id: &str) -> Result<NotificationPrefs, StorageError> {
        self.0.notification_prefs(user_id).await
    }
    async fn update_notification_prefs(
        &self,
        user_id: &str,
        prefs: NotificationPrefs,
    ) -> Result<NotificationPrefs, StorageError> {
        self.0.update_notification_prefs(user_id, prefs).await
    }
}

#[actix_web::test]
async fn registration_losing_the_insert_race_is_a_bad_request()
-> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(SqliteStore::open_in_memory()?);
    seed_user(&store, "race@example.com", "secret1", Role::User).await?;
    let source = Arc::new(MockSource::new(
        Some(TEST_SEED),
        GeneratorConfig::default(),
        Duration::ZERO,
    ));
    let state = Data::new(AppState::new(
        source,
        Arc::new(LateLookupStore(store)),
        Duration::ZERO,
        Duration::from_secs(2),
    ));
    let app = test::init_service(App::new().app_data(state).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": "Race", "email": "race@example.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Email already in use" }));
    Ok(())
}

#[actix_web::test]
async fn notifications_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let user = seed_user(&ctx.store, "n@example.com", "secret1", Role::User).await?;
    let token = ctx.store.create_session(&user.id).await?;
    let session = Cookie::new(SESSION_COOKIE, token);
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/user/notifications")
        .cookie(session.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["prefs"]["redCards"], json!(false));
    assert_eq!(body["prefs"]["favoriteTeamsOnly"], json!(true));

    let req = test::TestRequest::put()
        .uri("/api/user/notifications")
        .cookie(session.clone())
        .set_json(json!({ "goals": false }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let all_on = json!({
        "matchStart": true,
        "goals": true,
        "halfTime": true,
        "fullTime": true,
        "redCards": true,
        "favoriteTeamsOnly": false
    });
    let req = test::TestRequest::put()
        .uri("/api/user/notifications")
        .cookie(session.clone())
        .set_json(all_on.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["prefs"], all_on);

    let req = test::TestRequest::get()
        .uri("/api/user/notifications")
        .cookie(session)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["prefs"], all_on);
    Ok(())
}

#[actix_web::test]
async fn admin_list_is_forbidden_to_users() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let user = seed_user(&ctx.store, "user@example.com", "secret1", Role::User).await?;
    let admin = seed_user(&ctx.store, "admin@example.com", "secret1", Role::Admin).await?;
    let user_token = ctx.store.create_session(&user.id).await?;
    let admin_token = ctx.store.create_session(&admin.id).await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/admin/users").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(Cookie::new(SESSION_COOKIE, user_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(Cookie::new(SESSION_COOKIE, admin_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let users = body.as_array().ok_or("expected an array")?;
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    assert!(users.iter().any(|u| u["role"] == json!("ADMIN")));
    Ok(())
}

#[actix_web::test]
async fn scoreboard_json_honours_filter() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/?json=1&date=2024-05-01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["date"], json!("2024-05-01"));
    assert_eq!(body["loading"], json!(false));
    let all = body["matches"].as_array().ok_or("matches missing")?.len();
    assert!((30..=50).contains(&all));

    let req = test::TestRequest::get()
        .uri("/?json=1&date=2024-05-01&filter=live")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let live = body["matches"].as_array().ok_or("matches missing")?;
    assert!(live.iter().all(|m| m["status"] == json!("IN PLAY")));
    assert!(live.len() <= all);

    let req = test::TestRequest::get().uri("/?date=01-05-2024").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[actix_web::test]
async fn scoreboard_html_groups_by_league() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/?date=2024-05-01").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec())?;
    let doc = Html::parse_document(&body);

    let sections = Selector::parse("section.league-section").unwrap();
    assert_eq!(doc.select(&sections).count(), 10);
    let cards = Selector::parse("div.match-card").unwrap();
    assert!(doc.select(&cards).count() >= 30);
    let news = Selector::parse("article.news-item").unwrap();
    assert_eq!(doc.select(&news).count(), 5);

    let req = test::TestRequest::get()
        .uri("/?date=2024-05-01&filter=live&fragment=1")
        .to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec())?;
    let doc = Html::parse_fragment(&body);
    let board = Selector::parse("div#scoreboard").unwrap();
    let board = doc.select(&board).next().ok_or("no board")?;
    // periodic refresh is off in the test context
    assert!(board.value().attr("hx-trigger").is_none());
    Ok(())
}

#[actix_web::test]
async fn match_and_team_pages_render() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context().await?;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/matches/4-1?json=1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], json!("4-1"));
    assert_eq!(body["league"]["id"], json!("4"));
    assert_eq!(body["lineups"]["home"]["startingXI"].as_array().map(Vec::len), Some(11));

    let req = test::TestRequest::get().uri("/matches/m1").to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec())?;
    let doc = Html::parse_document(&body);
    let stat_rows = Selector::parse("div.stat-row").unwrap();
    assert_eq!(doc.select(&stat_rows).count(), 8);
    let markers = Selector::parse("li.event.marker").unwrap();
    assert!(doc.select(&markers).count() >= 2);

    let req = test::TestRequest::get().uri("/teams/33").to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec())?;
    let doc = Html::parse_document(&body);
    let heading = Selector::parse("div.team-header h1").unwrap();
    let name: String = doc.select(&heading).next().ok_or("no heading")?.text().collect();
    assert_eq!(name, "Team 33");
    let form = Selector::parse("span.form").unwrap();
    assert_eq!(doc.select(&form).count(), 5);

    let req = test::TestRequest::get().uri("/leagues/99").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/leagues/2?json=1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["league"]["name"], json!("Bundesliga"));

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    Ok(())
}
