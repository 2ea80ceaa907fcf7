use crate::service::LineService;
use std::sync::Arc;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LineService>,
}

impl AppState {
    pub fn new(service: Arc<LineService>) -> Self {
        Self { service }
    }
}
