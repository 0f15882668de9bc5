use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::feed::{Envelope, FixturesData, LeaguesData, LiveData};
use crate::error::AppError;
use crate::model::{League, Match};

pub const DEFAULT_BASE_URL: &str = "https://livescore-api.com/api-client";

pub struct LiveScoreClient {
    http: Client,
    base_url: String,
    key: String,
    secret: String,
}

impl LiveScoreClient {
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            key: key.into(),
            secret: secret.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str, extra: &[(&str, String)]) -> Result<Url, AppError> {
        let mut params = vec![("key", self.key.clone()), ("secret", self.secret.clone())];
        params.extend(extra.iter().cloned());
        Url::parse_with_params(&format!("{}/{path}", self.base_url), &params)
            .map_err(|e| AppError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = self.url(path, extra)?;
        tracing::debug!(path, "livescore request");
        let envelope: Envelope<T> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !envelope.success {
            let reason = envelope
                .error
                .map(|e| match e {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_else(|| format!("livescore request to {path} failed"));
            return Err(AppError::Network(reason));
        }
        envelope
            .data
            .ok_or_else(|| AppError::Parse(format!("livescore response for {path} has no data")))
    }

    /// # Errors
    ///
    /// Will return `Err` if the request fails or the feed reports failure.
    pub async fn leagues(&self) -> Result<Vec<League>, AppError> {
        let data: LeaguesData = self.get("leagues", &[]).await?;
        Ok(data.leagues.into_iter().map(League::from).collect())
    }

    /// # Errors
    ///
    /// Will return `Err` if the request fails or the feed reports failure.
    pub async fn live_matches(&self) -> Result<Vec<Match>, AppError> {
        let data: LiveData = self.get("scores/live.json", &[]).await?;
        let today = chrono::Utc::now().date_naive();
        Ok(data
            .matches
            .into_iter()
            .map(|m| m.into_match(today))
            .collect())
    }

    /// # Errors
    ///
    /// Will return `Err` if the request fails or the feed reports failure.
    pub async fn matches_by_date(&self, date: NaiveDate) -> Result<Vec<Match>, AppError> {
        let data: FixturesData = self
            .get(
                "fixtures/matches.json",
                &[("date", date.format("%Y-%m-%d").to_string())],
            )
            .await?;
        Ok(data
            .fixtures
            .into_iter()
            .map(|m| m.into_match(date))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_carry_credentials() {
        let client = LiveScoreClient::new("k1", "s 2").with_base_url("http://localhost:9/api/");
        let url = client
            .url("fixtures/matches.json", &[("date", "2024-05-01".to_string())])
            .unwrap();
        assert_eq!(url.path(), "/api/fixtures/matches.json");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "k1".to_string()),
                ("secret".to_string(), "s 2".to_string()),
                ("date".to_string(), "2024-05-01".to_string()),
            ]
        );
    }
}
