use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::mock::GeneratorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// Seeded generator.
    Mock,
    /// livescore-api.com, credentials from the environment.
    Api,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "ADDRESS", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value_t = 8081)]
    pub port: u16,
    /// SQLite file holding accounts, sessions and preferences. `:memory:` keeps them in memory.
    #[arg(
        short = 'n',
        long,
        value_name = "DATABASE_PATH",
        default_value = "matchday.db",
        value_parser = crate::args::validation::check_db_path
    )]
    pub db_path: String,
    #[arg(long, value_enum, default_value_t = DataSource::Mock)]
    pub source: DataSource,
    /// Fixes the generator's random sequence.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Scoreboard poll interval. 0 disables periodic refresh.
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub refresh_secs: u64,
    /// Simulated delay of the mock source.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 500)]
    pub latency_ms: u64,
    /// How long a page waits for a scoreboard fetch before rendering.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 3000)]
    pub settle_timeout_ms: u64,
    #[arg(long, default_value_t = 2)]
    pub halftime_cap_home: u32,
    #[arg(long, default_value_t = 1)]
    pub halftime_cap_away: u32,
    /// Players generated per side for match details.
    #[arg(long, default_value_t = 18, value_parser = crate::args::validation::check_player_pool)]
    pub player_pool: usize,
    /// Account promoted to ADMIN at startup once it exists.
    #[arg(long, value_name = "EMAIL")]
    pub admin_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub bind: String,
    pub port: u16,
    pub db_path: String,
    pub source: DataSource,
    pub api: Option<ApiCredentials>,
    pub seed: Option<u64>,
    pub refresh_interval: Duration,
    pub latency: Duration,
    pub settle_timeout: Duration,
    pub generator: GeneratorConfig,
    pub admin_email: Option<String>,
}
