//! Thin HTTP surface over [`LineService`](crate::service::LineService).

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use crate::error::PropError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Service error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub PropError);

impl From<PropError> for ApiError {
    fn from(err: PropError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        let err = &self.0;
        if err.is_not_found() {
            (StatusCode::NOT_FOUND, "not_found")
        } else if err.is_missing_configuration() {
            (StatusCode::INTERNAL_SERVER_ERROR, "missing_configuration")
        } else if err.is_upstream() {
            (StatusCode::BAD_GATEWAY, "upstream_error")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self.0, code, "request failed");
        } else {
            warn!(error = %self.0, code, "request failed");
        }

        let body = json!({
            "error": code,
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PropError::not_found("player x"), StatusCode::NOT_FOUND),
            (
                PropError::NoRosterData {
                    season: 1999,
                    floor: 1999,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                PropError::MissingConfiguration("odds_api.api_key".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                PropError::upstream("the-odds-api", "status 429"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PropError::Shared(Arc::new(PropError::upstream("nflverse", "status 500"))),
                StatusCode::BAD_GATEWAY,
            ),
            (PropError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status_and_code().0, expected);
        }
    }
}
