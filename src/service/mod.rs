//! Request orchestration: cache lookups, upstream loads, joins and summaries.
//!
//! Metered resources (per-event odds, NBA game lines) are seeded on first use and then held
//! until a caller asks for a refresh. Free resources (event listings, season
//! tables, NBA schedules) are refetched once older than their TTL. Every
//! resource goes through a [`CachedResource`], so concurrent requests for
//! one key share a single upstream call.

mod nba;
mod nfl;
mod types;

pub use types::*;

use crate::cache::{CachedResource, Lookup};
use crate::config::AppConfig;
use crate::domain::{EventOdds, NbaGame, OddsEvent, ProviderResponse, RawRow};
use crate::error::{PropError, Result};
use crate::sources::{GamesSource, OddsSource, RosterSource, WeeklyStatsSource};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Fixed cache key of the NBA mascot -> team id map
pub const TEAM_IDS_KEY: &str = "balldontlie:team-ids";

type Rows = Arc<Vec<RawRow>>;

/// Tunables the service reads from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub sport: String,
    pub regions: String,
    pub player_market: String,
    pub nba_sport: String,
    pub totals_market: String,
    /// Comma-separated bookmaker filter for NBA game lines
    pub totals_bookmakers: String,
    pub floor_season: i32,
    pub career_seasons: u32,
    pub season: Option<i32>,
    pub nba_season: i32,
    pub events_ttl: Duration,
    pub csv_ttl: Duration,
}

impl From<&AppConfig> for ServiceSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            sport: cfg.odds_api.sport.clone(),
            regions: cfg.odds_api.regions.clone(),
            player_market: cfg.odds_api.player_market.clone(),
            nba_sport: cfg.odds_api.nba_sport.clone(),
            totals_market: cfg.odds_api.totals_market.clone(),
            totals_bookmakers: cfg.odds_api.totals_bookmakers.join(","),
            floor_season: cfg.nflverse.floor_season,
            career_seasons: cfg.nflverse.career_seasons,
            season: cfg.nflverse.season,
            nba_season: cfg.balldontlie.season,
            events_ttl: cfg.cache.events_ttl(),
            csv_ttl: cfg.cache.csv_ttl(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// NFL season in progress on `now`: January and February belong to the
/// season that started the previous autumn.
pub fn season_for(now: DateTime<Utc>) -> i32 {
    if now.month() >= 3 {
        now.year()
    } else {
        now.year() - 1
    }
}

/// The aggregator. Shared as `Arc<LineService>` across request tasks.
pub struct LineService {
    settings: ServiceSettings,
    roster_source: Arc<dyn RosterSource>,
    stats_source: Arc<dyn WeeklyStatsSource>,
    odds_source: Option<Arc<dyn OddsSource>>,
    games_source: Option<Arc<dyn GamesSource>>,
    rosters: CachedResource<String, Rows>,
    weekly_stats: CachedResource<String, Rows>,
    events: CachedResource<String, Arc<ProviderResponse<Vec<OddsEvent>>>>,
    event_odds: CachedResource<String, Arc<ProviderResponse<EventOdds>>>,
    game_lines: CachedResource<String, Arc<ProviderResponse<Vec<EventOdds>>>>,
    team_ids: CachedResource<String, Arc<HashMap<String, u64>>>,
    nba_games: CachedResource<String, Arc<Vec<NbaGame>>>,
}

impl LineService {
    pub fn new(
        settings: ServiceSettings,
        roster_source: Arc<dyn RosterSource>,
        stats_source: Arc<dyn WeeklyStatsSource>,
    ) -> Self {
        Self {
            settings,
            roster_source,
            stats_source,
            odds_source: None,
            games_source: None,
            rosters: CachedResource::new(),
            weekly_stats: CachedResource::new(),
            events: CachedResource::new(),
            event_odds: CachedResource::new(),
            game_lines: CachedResource::new(),
            team_ids: CachedResource::new(),
            nba_games: CachedResource::new(),
        }
    }

    pub fn with_odds_source(mut self, source: Arc<dyn OddsSource>) -> Self {
        self.odds_source = Some(source);
        self
    }

    pub fn with_games_source(mut self, source: Arc<dyn GamesSource>) -> Self {
        self.games_source = Some(source);
        self
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Pinned season, else the one in progress today.
    pub fn current_season(&self) -> i32 {
        self.settings.season.unwrap_or_else(|| season_for(Utc::now()))
    }

    fn odds_source(&self) -> Result<Arc<dyn OddsSource>> {
        self.odds_source.clone().ok_or_else(|| {
            PropError::MissingConfiguration("odds_api.api_key (ODDS_API_KEY) not set".into())
        })
    }

    fn games_source(&self) -> Result<Arc<dyn GamesSource>> {
        self.games_source.clone().ok_or_else(|| {
            PropError::MissingConfiguration("balldontlie.api_key (BALLDONTLIE_KEY) not set".into())
        })
    }

    /// One season's roster table, cached for the CSV TTL.
    async fn roster_rows(&self, season: i32) -> Result<Rows> {
        let source = Arc::clone(&self.roster_source);
        let lookup = self
            .rosters
            .get_or_fetch(
                format!("roster:{season}"),
                Some(self.settings.csv_ttl),
                false,
                move || async move { Ok(Arc::new(source.fetch_roster(season).await?)) },
            )
            .await?;
        Ok(lookup.value)
    }

    /// One season's weekly stat table, cached for the CSV TTL.
    async fn weekly_rows(&self, season: i32) -> Result<Rows> {
        let source = Arc::clone(&self.stats_source);
        let lookup = self
            .weekly_stats
            .get_or_fetch(
                format!("stats:{season}"),
                Some(self.settings.csv_ttl),
                false,
                move || async move { Ok(Arc::new(source.fetch_weekly_stats(season).await?)) },
            )
            .await?;
        Ok(lookup.value)
    }

    /// Free event listing, refetched once older than the events TTL.
    async fn event_listing(&self) -> Result<Arc<ProviderResponse<Vec<OddsEvent>>>> {
        let source = self.odds_source()?;
        let sport = self.settings.sport.clone();
        let lookup = self
            .events
            .get_or_fetch(
                format!("events:{sport}"),
                Some(self.settings.events_ttl),
                false,
                move || async move { Ok(Arc::new(source.list_events(&sport).await?)) },
            )
            .await?;
        Ok(lookup.value)
    }

    /// Metered odds: no TTL, fetched only on first use or explicit refresh.
    async fn odds_for_event(
        &self,
        event_id: &str,
        refresh: bool,
    ) -> Result<(String, Lookup<Arc<ProviderResponse<EventOdds>>>)> {
        let source = self.odds_source()?;
        let sport = self.settings.sport.clone();
        let market = self.settings.player_market.clone();
        let regions = self.settings.regions.clone();
        let key = format!("odds:{event_id}:{market}:{regions}");
        let event_id = event_id.to_string();

        let lookup = self
            .event_odds
            .get_or_fetch(key.clone(), None, refresh, move || async move {
                let odds = source
                    .get_event_odds(&sport, &event_id, &market, &regions)
                    .await?;
                Ok(Arc::new(odds))
            })
            .await?;
        Ok((key, lookup))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_season_rolls_over_in_march() {
        let feb = Utc.with_ymd_and_hms(2026, 2, 9, 0, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let oct = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        assert_eq!(season_for(feb), 2025);
        assert_eq!(season_for(mar), 2026);
        assert_eq!(season_for(oct), 2026);
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.player_market, "player_pass_yds");
        assert_eq!(settings.events_ttl, Duration::from_secs(1800));
        assert_eq!(settings.career_seasons, 6);
    }
}
