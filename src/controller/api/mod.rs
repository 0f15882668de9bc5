//! Client for the livescore-api.com feed.

pub mod client;
pub mod feed;

pub use client::LiveScoreClient;
