use super::{RosterSource, WeeklyStatsSource};
use crate::config::NflverseConfig;
use crate::domain::RawRow;
use crate::error::{PropError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, info};

const SOURCE: &str = "nflverse";

/// nflverse release-asset downloader
pub struct NflverseClient {
    client: Client,
    config: NflverseConfig,
}

impl NflverseClient {
    pub fn new(config: NflverseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn roster_url(&self, season: i32) -> String {
        format!(
            "{}/roster_{}.csv",
            self.config.roster_base_url.trim_end_matches('/'),
            season
        )
    }

    pub fn weekly_stats_url(&self, season: i32) -> String {
        format!(
            "{}/stats_player_week_{}.csv",
            self.config.stats_base_url.trim_end_matches('/'),
            season
        )
    }

    async fn download(&self, url: &str) -> Result<Vec<RawRow>> {
        debug!("Fetching CSV from: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PropError::upstream(
                SOURCE,
                format!("{} returned {}", url, response.status()),
            ));
        }

        let body = response.bytes().await?;
        let rows = parse_csv(body.as_ref())?;
        info!(url, rows = rows.len(), "downloaded nflverse table");
        Ok(rows)
    }
}

#[async_trait]
impl RosterSource for NflverseClient {
    async fn fetch_roster(&self, season: i32) -> Result<Vec<RawRow>> {
        self.download(&self.roster_url(season)).await
    }
}

#[async_trait]
impl WeeklyStatsSource for NflverseClient {
    async fn fetch_weekly_stats(&self, season: i32) -> Result<Vec<RawRow>> {
        self.download(&self.weekly_stats_url(season)).await
    }
}

/// Parse a headed CSV table into header -> cell rows.
///
/// Ragged records are accepted; missing trailing cells are simply absent.
pub fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(RawRow::new(cells));
    }
    Ok(rows)
}
