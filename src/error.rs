use std::sync::Arc;
use thiserror::Error;

/// Main error type for the aggregator
#[derive(Error, Debug)]
pub enum PropError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {source_name} error: {message}")]
    Upstream {
        source_name: &'static str,
        message: String,
    },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Resolution errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No roster data available for season {season} (floor {floor})")]
    NoRosterData { season: i32, floor: i32 },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error of a de-duplicated fetch, handed to every waiter of that round
    #[error(transparent)]
    Shared(Arc<PropError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PropError {
    pub fn upstream(source_name: &'static str, message: impl Into<String>) -> Self {
        PropError::Upstream {
            source_name,
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        PropError::NotFound(what.into())
    }

    /// True for any error a caller should surface as "not found".
    pub fn is_not_found(&self) -> bool {
        match self {
            PropError::NotFound(_) | PropError::NoRosterData { .. } => true,
            PropError::Shared(inner) => inner.is_not_found(),
            _ => false,
        }
    }

    pub fn is_missing_configuration(&self) -> bool {
        match self {
            PropError::MissingConfiguration(_) => true,
            PropError::Shared(inner) => inner.is_missing_configuration(),
            _ => false,
        }
    }

    /// True when an upstream collaborator (network, status, decode) failed.
    pub fn is_upstream(&self) -> bool {
        match self {
            PropError::Http(_)
            | PropError::Upstream { .. }
            | PropError::Csv(_)
            | PropError::Json(_) => true,
            PropError::Shared(inner) => inner.is_upstream(),
            _ => false,
        }
    }
}

impl From<Arc<PropError>> for PropError {
    fn from(err: Arc<PropError>) -> Self {
        PropError::Shared(err)
    }
}

/// Result type alias for PropError
pub type Result<T> = std::result::Result<T, PropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_error_keeps_classification() {
        let inner = Arc::new(PropError::not_found("player mahomes-patrick"));
        let err = PropError::from(inner);
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
        assert_eq!(err.to_string(), "Not found: player mahomes-patrick");
    }

    #[test]
    fn test_no_roster_data_is_not_found() {
        let err = PropError::NoRosterData {
            season: 1999,
            floor: 1999,
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_upstream_classification() {
        let err = PropError::upstream("the-odds-api", "status 500");
        assert!(err.is_upstream());
        assert!(!err.is_missing_configuration());
        assert_eq!(err.to_string(), "Upstream the-odds-api error: status 500");
    }
}
