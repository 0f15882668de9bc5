use actix_web::web::Data;
use std::sync::Arc;
use std::time::Duration;

use matchday::AppState;
use matchday::auth::password::hash_with_rounds;
use matchday::controller::source::MockSource;
use matchday::mock::GeneratorConfig;
use matchday::model::{Role, User};
use matchday::storage::{NewUser, SqliteStore, UserStore};

pub const TEST_SEED: u64 = 42;

pub struct TestContext {
    pub state: Data<AppState>,
    pub store: Arc<SqliteStore>,
}

/// Fresh in-memory store, a seeded mock source without latency, and a
/// scoreboard poller with periodic refresh disabled.
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error>> {
    let store = Arc::new(SqliteStore::open_in_memory()?);
    store.reset().await?;

    let source = Arc::new(MockSource::new(
        Some(TEST_SEED),
        GeneratorConfig::default(),
        Duration::ZERO,
    ));
    let state = Data::new(AppState::new(
        source,
        store.clone(),
        Duration::ZERO,
        Duration::from_secs(2),
    ));
    Ok(TestContext { state, store })
}

/// Inserts an account directly, with a cheap hash.
pub async fn seed_user(
    store: &SqliteStore,
    email: &str,
    password: &str,
    role: Role,
) -> Result<User, Box<dyn std::error::Error>> {
    Ok(store
        .create_user(NewUser {
            name: Some(email.split('@').next().unwrap_or_default().to_string()),
            email: email.to_string(),
            password_hash: hash_with_rounds(password, 100),
            role,
        })
        .await?)
}
