use super::GamesSource;
use crate::config::BallDontLieConfig;
use crate::domain::{NbaGame, NbaTeam};
use crate::error::{PropError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

const SOURCE: &str = "balldontlie";

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMeta {
    #[serde(default)]
    next_cursor: Option<u64>,
}

/// BallDontLie NBA API client
pub struct BallDontLieClient {
    client: Client,
    api_key: String,
    config: BallDontLieConfig,
}

impl BallDontLieClient {
    pub fn new(config: BallDontLieConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PropError::MissingConfiguration(
                    "balldontlie.api_key (BALLDONTLIE_KEY) not set".into(),
                )
            })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            config,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("Fetching from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PropError::upstream(
                SOURCE,
                format!("status {}: {}", status, text),
            ));
        }

        let body = response.text().await?;
        let page: Page<T> = serde_json::from_str(&body)
            .map_err(|e| PropError::upstream(SOURCE, format!("parse error: {}", e)))?;

        if page.meta.and_then(|m| m.next_cursor).is_some() {
            warn!(path, "more pages available; result may be incomplete");
        }
        Ok(page.data)
    }
}

#[async_trait]
impl GamesSource for BallDontLieClient {
    async fn teams(&self) -> Result<Vec<NbaTeam>> {
        let teams: Vec<NbaTeam> = self.get_page("teams", &[]).await?;
        let current: Vec<NbaTeam> = teams.into_iter().filter(NbaTeam::is_current).collect();
        info!(teams = current.len(), "fetched current NBA teams");
        Ok(current)
    }

    async fn games_on(&self, date: NaiveDate) -> Result<Vec<NbaGame>> {
        let query = [
            ("per_page", "25".to_string()),
            ("seasons[]", self.config.season.to_string()),
            ("dates[]", date.format("%Y-%m-%d").to_string()),
        ];
        let games: Vec<NbaGame> = self.get_page("games", &query).await?;
        info!(%date, games = games.len(), "fetched NBA games");
        Ok(games)
    }

    async fn team_games(
        &self,
        team_id: u64,
        season: i32,
        end_date: NaiveDate,
    ) -> Result<Vec<NbaGame>> {
        let query = [
            ("per_page", "100".to_string()),
            ("team_ids[]", team_id.to_string()),
            ("seasons[]", season.to_string()),
            ("end_date", end_date.format("%Y-%m-%d").to_string()),
        ];
        self.get_page("games", &query).await
    }
}
