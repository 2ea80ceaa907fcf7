//! Upstream collaborators.
//!
//! The service only sees these traits; the reqwest clients below are the
//! production implementations.

mod balldontlie;
mod nflverse;
mod odds_api;

pub use balldontlie::BallDontLieClient;
pub use nflverse::{parse_csv, NflverseClient};
pub use odds_api::OddsApiClient;

use crate::domain::{EventOdds, NbaGame, NbaTeam, OddsEvent, ProviderResponse, RawRow};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Season roster table (may be unpublished for the newest season)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(&self, season: i32) -> Result<Vec<RawRow>>;
}

/// Season table of per-player weekly stat lines
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeeklyStatsSource: Send + Sync {
    async fn fetch_weekly_stats(&self, season: i32) -> Result<Vec<RawRow>>;
}

/// Odds provider. Event listings are free; odds calls cost one credit per
/// market and region.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsSource: Send + Sync {
    async fn list_events(&self, sport: &str) -> Result<ProviderResponse<Vec<OddsEvent>>>;

    async fn get_event_odds(
        &self,
        sport: &str,
        event_id: &str,
        market: &str,
        regions: &str,
    ) -> Result<ProviderResponse<EventOdds>>;

    /// Game-level odds for every upcoming event of `sport`.
    /// `bookmakers` is a comma-separated filter; empty means every book.
    async fn list_odds(
        &self,
        sport: &str,
        market: &str,
        regions: &str,
        bookmakers: &str,
    ) -> Result<ProviderResponse<Vec<EventOdds>>>;
}

/// NBA schedule and results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamesSource: Send + Sync {
    /// Current franchises only
    async fn teams(&self) -> Result<Vec<NbaTeam>>;

    async fn games_on(&self, date: NaiveDate) -> Result<Vec<NbaGame>>;

    /// A team's games in `season` up to and including `end_date`
    async fn team_games(&self, team_id: u64, season: i32, end_date: NaiveDate)
        -> Result<Vec<NbaGame>>;
}
