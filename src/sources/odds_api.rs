// The Odds API v4 client: free event listings, metered per-event and
// per-sport odds

use super::OddsSource;
use crate::config::OddsApiConfig;
use crate::domain::{CreditHeaders, EventOdds, OddsEvent, ProviderResponse};
use crate::error::{PropError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const SOURCE: &str = "the-odds-api";

pub struct OddsApiClient {
    client: Client,
    api_key: String,
    config: OddsApiConfig,
}

impl OddsApiClient {
    /// Fails fast when no API key is configured.
    pub fn new(config: OddsApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PropError::MissingConfiguration("odds_api.api_key (ODDS_API_KEY) not set".into())
            })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            config,
        })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<ProviderResponse<T>> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PropError::upstream(
                SOURCE,
                format!("status {}: {}", status, text),
            ));
        }

        let credits = credit_headers(response.headers());
        debug!(
            remaining = credits.requests_remaining.as_deref().unwrap_or("-"),
            used = credits.requests_used.as_deref().unwrap_or("-"),
            last = credits.requests_last.as_deref().unwrap_or("-"),
            "odds provider credits"
        );

        let body = response.text().await?;
        let payload = serde_json::from_str(&body)
            .map_err(|e| PropError::upstream(SOURCE, format!("parse error: {}", e)))?;
        Ok(ProviderResponse { payload, credits })
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn list_events(&self, sport: &str) -> Result<ProviderResponse<Vec<OddsEvent>>> {
        let url = format!("{}/sports/{}/events", self.base(), sport);
        debug!("Fetching events from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let events: ProviderResponse<Vec<OddsEvent>> = Self::decode(response).await?;
        info!(sport, events = events.payload.len(), "fetched event listing");
        Ok(events)
    }

    async fn get_event_odds(
        &self,
        sport: &str,
        event_id: &str,
        market: &str,
        regions: &str,
    ) -> Result<ProviderResponse<EventOdds>> {
        let url = format!("{}/sports/{}/events/{}/odds", self.base(), sport, event_id);
        debug!("Fetching odds from: {}", url);

        let mut query = vec![
            ("apiKey", self.api_key.clone()),
            ("regions", regions.to_string()),
            ("markets", market.to_string()),
            ("oddsFormat", self.config.odds_format.clone()),
        ];
        if !self.config.bookmakers.is_empty() {
            query.push(("bookmakers", self.config.bookmakers.join(",")));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let odds: ProviderResponse<EventOdds> = Self::decode(response).await?;
        info!(
            event_id,
            market,
            bookmakers = odds.payload.bookmakers.len(),
            "fetched event odds (1 credit)"
        );
        Ok(odds)
    }

    async fn list_odds(
        &self,
        sport: &str,
        market: &str,
        regions: &str,
        bookmakers: &str,
    ) -> Result<ProviderResponse<Vec<EventOdds>>> {
        let url = format!("{}/sports/{}/odds", self.base(), sport);
        debug!("Fetching sport odds from: {}", url);

        let mut query = vec![
            ("apiKey", self.api_key.clone()),
            ("regions", regions.to_string()),
            ("markets", market.to_string()),
            ("oddsFormat", self.config.odds_format.clone()),
        ];
        if !bookmakers.trim().is_empty() {
            query.push(("bookmakers", bookmakers.to_string()));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let odds: ProviderResponse<Vec<EventOdds>> = Self::decode(response).await?;
        info!(
            sport,
            market,
            events = odds.payload.len(),
            "fetched sport odds (1 credit)"
        );
        Ok(odds)
    }
}

/// Copy the provider's usage headers verbatim.
pub fn credit_headers(headers: &HeaderMap) -> CreditHeaders {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    CreditHeaders {
        requests_last: read("x-requests-last"),
        requests_used: read("x-requests-used"),
        requests_remaining: read("x-requests-remaining"),
    }
}
