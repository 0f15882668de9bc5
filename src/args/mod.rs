use clap::Parser;
use std::time::Duration;

pub mod types;
pub mod validation;

pub use types::{ApiCredentials, Args, CleanArgs, DataSource};

use crate::mock::{GeneratorConfig, HalftimeCaps};

pub const API_KEY_VAR: &str = "LIVESCORE_API_KEY";
pub const API_SECRET_VAR: &str = "LIVESCORE_API_SECRET";

/// Parses the command line and reads API credentials from the environment.
///
/// # Errors
///
/// Will return `Err` if the arguments do not describe a runnable server.
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    CleanArgs::new(
        args,
        std::env::var(API_KEY_VAR).ok(),
        std::env::var(API_SECRET_VAR).ok(),
    )
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if `--source api` is chosen without both
    /// credentials, or the admin email is blank.
    pub fn new(
        args: Args,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Self, String> {
        let api = validation::check_api_credentials(args.source, api_key, api_secret)?;
        let admin_email = match args.admin_email {
            Some(email) if email.trim().is_empty() => {
                return Err("--admin-email must not be blank".to_string());
            }
            Some(email) => Some(email.trim().to_ascii_lowercase()),
            None => None,
        };

        Ok(CleanArgs {
            bind: args.bind,
            port: args.port,
            db_path: args.db_path,
            source: args.source,
            api,
            seed: args.seed,
            refresh_interval: Duration::from_secs(args.refresh_secs),
            latency: Duration::from_millis(args.latency_ms),
            settle_timeout: Duration::from_millis(args.settle_timeout_ms),
            generator: GeneratorConfig {
                halftime_caps: HalftimeCaps {
                    home: args.halftime_cap_home,
                    away: args.halftime_cap_away,
                },
                player_pool_size: args.player_pool,
            },
            admin_email,
        })
    }
}
