pub mod args;
pub mod auth;
pub mod controller {
    pub mod api;
    pub mod routes;
    pub mod scoreboard;
    pub mod source;
    pub mod state;
    pub mod user;
}
pub mod error;
pub mod mock;
pub mod model;
pub mod poller;
pub mod storage;
pub mod view {
    pub mod layout;
    pub mod match_detail;
    pub mod scoreboard;
    pub mod team;
}

pub use controller::state::AppState;
pub use error::AppError;

const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";
