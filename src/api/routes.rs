use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // NFL
        .route("/api/nfl/health", get(handlers::health))
        .route("/api/nfl/qbs", get(handlers::list_qbs))
        .route("/api/nfl/qbs/:id/line", get(handlers::player_line))
        .route("/api/nfl/qbs/:id/distribution", get(handlers::player_distribution))
        // NBA
        .route("/api/nba/totals/:home_team", get(handlers::team_totals))
        .with_state(state)
        .layer(cors)
}
