pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod join;
pub mod loaders;
pub mod logging;
pub mod matching;
pub mod service;
pub mod sources;
pub mod stats;

pub use cache::{CachedResource, InFlight, TimedCache};
pub use crate::config::AppConfig;
pub use error::{PropError, Result};
pub use matching::{normalize, same_entity, NameKey};
pub use service::{LineService, RosterFilters, ServiceSettings};
pub use stats::SummaryStatistics;
