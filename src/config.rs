use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub nflverse: NflverseConfig,
    #[serde(default)]
    pub balldontlie: BallDontLieConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OddsApiConfig {
    /// The Odds API key; every odds call fails fast without it
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Sport key (e.g., "americanfootball_nfl")
    pub sport: String,
    pub regions: String,
    /// Player prop market used for QB lines
    pub player_market: String,
    pub odds_format: String,
    /// Optional bookmaker filter; empty means every book in the region
    #[serde(default)]
    pub bookmakers: Vec<String>,
    /// Sport key for NBA game lines
    pub nba_sport: String,
    /// Game market posted next to NBA team totals
    pub totals_market: String,
    #[serde(default)]
    pub totals_bookmakers: Vec<String>,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.the-odds-api.com/v4".to_string(),
            sport: "americanfootball_nfl".to_string(),
            regions: "us".to_string(),
            player_market: "player_pass_yds".to_string(),
            odds_format: "american".to_string(),
            bookmakers: Vec::new(),
            nba_sport: "basketball_nba".to_string(),
            totals_market: "totals".to_string(),
            totals_bookmakers: vec![
                "betmgm".to_string(),
                "draftkings".to_string(),
                "fanduel".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NflverseConfig {
    pub roster_base_url: String,
    pub stats_base_url: String,
    /// Oldest season the roster fallback may reach
    pub floor_season: i32,
    /// Seasons covered by the "career" scope, current season included
    pub career_seasons: u32,
    /// Pins the current season; derived from today's date when absent
    #[serde(default)]
    pub season: Option<i32>,
}

impl Default for NflverseConfig {
    fn default() -> Self {
        Self {
            roster_base_url: "https://github.com/nflverse/nflverse-data/releases/download/rosters"
                .to_string(),
            stats_base_url:
                "https://github.com/nflverse/nflverse-data/releases/download/player_stats"
                    .to_string(),
            floor_season: 1999,
            career_seasons: 6,
            season: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BallDontLieConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub season: i32,
}

impl Default for BallDontLieConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.balldontlie.io/v1".to_string(),
            season: 2023,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Staleness window for free event listings
    pub events_ttl_secs: u64,
    /// Staleness window for season CSV downloads
    pub csv_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            events_ttl_secs: 30 * 60,
            csv_ttl_secs: 12 * 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn events_ttl(&self) -> Duration {
        Duration::from_secs(self.events_ttl_secs)
    }

    pub fn csv_ttl(&self) -> Duration {
        Duration::from_secs(self.csv_ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for the daily rolling log file
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            odds_api: OddsApiConfig::default(),
            nflverse: NflverseConfig::default(),
            balldontlie: BallDontLieConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
                dir: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific overrides (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("PROPLINE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // PROPLINE_ODDS_API__API_KEY, PROPLINE_SERVER__PORT, ...
            .add_source(
                Environment::with_prefix("PROPLINE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: AppConfig = builder.build()?.try_deserialize()?;
        cfg.apply_key_fallbacks();
        Ok(cfg)
    }

    /// Pick up API keys from the conventional bare variable names.
    fn apply_key_fallbacks(&mut self) {
        if self.odds_api.api_key.as_deref().map_or(true, str::is_empty) {
            self.odds_api.api_key = std::env::var("ODDS_API_KEY")
                .or_else(|_| std::env::var("THE_ODDS_API_KEY"))
                .ok()
                .filter(|k| !k.is_empty());
        }
        if self.balldontlie.api_key.as_deref().map_or(true, str::is_empty) {
            self.balldontlie.api_key = std::env::var("BALLDONTLIE_KEY")
                .ok()
                .filter(|k| !k.is_empty());
        }
        if self.logging.dir.is_none() {
            self.logging.dir = std::env::var("PROPLINE_LOG_DIR").ok();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.cache.events_ttl_secs == 0 {
            errors.push("cache.events_ttl_secs must be positive".to_string());
        }
        if self.cache.csv_ttl_secs == 0 {
            errors.push("cache.csv_ttl_secs must be positive".to_string());
        }
        if self.nflverse.career_seasons == 0 {
            errors.push("nflverse.career_seasons must be at least 1".to_string());
        }
        for (name, url) in [
            ("odds_api.base_url", &self.odds_api.base_url),
            ("nflverse.roster_base_url", &self.nflverse.roster_base_url),
            ("nflverse.stats_base_url", &self.nflverse.stats_base_url),
            ("balldontlie.base_url", &self.balldontlie.base_url),
        ] {
            if url.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
