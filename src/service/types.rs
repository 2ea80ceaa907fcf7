use crate::domain::{CanonicalPlayer, CreditHeaders, NbaGame, NbaTeam, OddsEvent, OddsLine};
use crate::stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Roster query options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterFilters {
    pub active_only: bool,
    pub starters_only: bool,
    /// Zero means no cap
    pub limit: usize,
}

impl Default for RosterFilters {
    fn default() -> Self {
        Self {
            active_only: true,
            starters_only: false,
            limit: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    /// Season asked for
    pub season: i32,
    /// Season whose roster file was used (differs after a fallback)
    pub roster_season: i32,
    pub players: Vec<CanonicalPlayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    Cache,
    Provider,
}

/// Where a metered payload came from and how old it is
#[derive(Debug, Clone, Serialize)]
pub struct CacheMeta {
    pub key: String,
    pub source: CacheSource,
    /// RFC 3339
    pub fetched_at: String,
    pub age_secs: u64,
    pub refreshed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLineResponse {
    pub player: CanonicalPlayer,
    pub event: OddsEvent,
    pub market: String,
    pub consensus_line: Option<f64>,
    pub books: Vec<OddsLine>,
    pub cache: CacheMeta,
    /// Usage headers of the provider call that produced the odds payload
    pub provider_credits: CreditHeaders,
}

/// Summary of one season range
#[derive(Debug, Clone, Serialize)]
pub struct ScopeSummary {
    pub seasons: Vec<i32>,
    #[serde(flatten)]
    pub summary: SummaryStatistics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionScopes {
    pub current_season: ScopeSummary,
    pub last_season: ScopeSummary,
    pub career: ScopeSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResponse {
    pub player: CanonicalPlayer,
    pub line: Option<f64>,
    pub min_attempts: f64,
    pub scopes: DistributionScopes,
}

/// One side of an NBA matchup with its recent results
#[derive(Debug, Clone, Serialize)]
pub struct TeamRecent {
    pub team: NbaTeam,
    pub recent: Vec<NbaGame>,
    pub summary: SummaryStatistics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTotalsResponse {
    pub game: NbaGame,
    /// Requested line, else the posted consensus
    pub line: Option<f64>,
    pub posted_line: Option<f64>,
    pub books: Vec<OddsLine>,
    pub home: TeamRecent,
    pub away: TeamRecent,
    pub combined: SummaryStatistics,
}
