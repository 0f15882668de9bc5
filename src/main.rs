use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use matchday::AppState;
use matchday::args::{self, CleanArgs, DataSource};
use matchday::controller::api::LiveScoreClient;
use matchday::controller::source::{ApiSource, MatchSource, MockSource};
use matchday::controller::routes;
use matchday::model::Role;
use matchday::storage::{SqliteStore, UserStore};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "matchday=info".into()))
        .with(fmt::layer())
        .init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let store = SqliteStore::open(&args.db_path)?;
    promote_admin(&store, args.admin_email.as_deref()).await?;

    let state = Data::new(AppState::new(
        build_source(&args),
        Arc::new(store),
        args.refresh_interval,
        args.settle_timeout,
    ));

    tracing::info!(
        bind = %args.bind,
        port = args.port,
        source = ?args.source,
        db = %args.db_path,
        "starting server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
            .service(routes::static_files("./static"))
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}

fn build_source(args: &CleanArgs) -> Arc<dyn MatchSource> {
    let mock = MockSource::new(args.seed, args.generator, args.latency);
    match (&args.source, &args.api) {
        (DataSource::Api, Some(creds)) => Arc::new(ApiSource::new(
            LiveScoreClient::new(creds.key.clone(), creds.secret.clone()),
            mock,
        )),
        _ => Arc::new(mock),
    }
}

async fn promote_admin(
    store: &SqliteStore,
    email: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(email) = email else {
        return Ok(());
    };
    match store.find_user_by_email(email).await? {
        Some(user) if user.role != Role::Admin => {
            store.set_role(&user.id, Role::Admin).await?;
            tracing::info!(%email, "promoted admin");
        }
        Some(_) => {}
        None => tracing::warn!(%email, "admin email has no account yet"),
    }
    Ok(())
}
