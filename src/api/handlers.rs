use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{state::AppState, ApiError};
use crate::service::{
    DistributionResponse, PlayerLineResponse, RosterFilters, RosterResponse, TeamTotalsResponse,
};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Query values are parsed leniently: anything unparseable falls back to
/// the default instead of rejecting the request.
fn number<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|v| v.trim().parse().ok())
}

fn flag(raw: &Option<String>) -> Option<bool> {
    match raw.as_deref().map(str::trim) {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    pub season: Option<String>,
    pub active: Option<String>,
    pub starters_only: Option<String>,
    pub limit: Option<String>,
}

impl RosterQuery {
    /// Requested season; missing, zero or garbage means the current one.
    pub fn season(&self) -> Option<i32> {
        number::<i32>(&self.season).filter(|s| *s > 0)
    }

    pub fn filters(&self) -> RosterFilters {
        let defaults = RosterFilters::default();
        RosterFilters {
            active_only: flag(&self.active).unwrap_or(defaults.active_only),
            starters_only: flag(&self.starters_only).unwrap_or(defaults.starters_only),
            // negative or non-numeric limits mean "no limit"
            limit: number::<f64>(&self.limit)
                .filter(|l| l.is_finite() && *l > 0.0)
                .map(|l| l as usize)
                .unwrap_or(defaults.limit),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LineQuery {
    pub refresh: Option<String>,
}

impl LineQuery {
    pub fn refresh(&self) -> bool {
        flag(&self.refresh).unwrap_or(false)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionQuery {
    pub line: Option<String>,
    pub min_attempts: Option<String>,
}

impl DistributionQuery {
    pub fn line(&self) -> Option<f64> {
        number::<f64>(&self.line).filter(|l| l.is_finite())
    }

    pub fn min_attempts(&self) -> Option<f64> {
        number::<f64>(&self.min_attempts).filter(|m| m.is_finite())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TotalsQuery {
    pub line: Option<String>,
}

impl TotalsQuery {
    pub fn line(&self) -> Option<f64> {
        number::<f64>(&self.line).filter(|l| l.is_finite())
    }
}

/// GET /api/nfl/health
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// GET /api/nfl/qbs?season=2025&active=true&startersOnly=false&limit=0
pub async fn list_qbs(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> ApiResult<RosterResponse> {
    let roster = state
        .service
        .get_qb_roster(query.season(), query.filters())
        .await?;
    Ok(Json(roster))
}

/// GET /api/nfl/qbs/:id/line?refresh=true
pub async fn player_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LineQuery>,
) -> ApiResult<PlayerLineResponse> {
    let line = state
        .service
        .get_player_line(&id, query.refresh())
        .await?;
    Ok(Json(line))
}

/// GET /api/nfl/qbs/:id/distribution?line=250.5&minAttempts=10
pub async fn player_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DistributionQuery>,
) -> ApiResult<DistributionResponse> {
    let dist = state
        .service
        .get_player_stat_distribution(&id, query.line(), query.min_attempts())
        .await?;
    Ok(Json(dist))
}

/// GET /api/nba/totals/:home_team?line=221.5
pub async fn team_totals(
    State(state): State<AppState>,
    Path(home_team): Path<String>,
    Query(query): Query<TotalsQuery>,
) -> ApiResult<TeamTotalsResponse> {
    let totals = state.service.get_team_totals(&home_team, query.line()).await?;
    Ok(Json(totals))
}
