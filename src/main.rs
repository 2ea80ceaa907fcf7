use anyhow::Context;
use clap::Parser;
use propline::api::{create_router, AppState};
use propline::cli::{Cli, Commands};
use propline::logging::init_logging;
use propline::sources::{BallDontLieClient, NflverseClient, OddsApiClient, OddsSource, GamesSource};
use propline::{AppConfig, LineService, RosterFilters, ServiceSettings};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir)
        .with_context(|| format!("loading configuration from {}", cli.config_dir))?;
    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            tracing::error!("config: {}", e);
        }
        anyhow::bail!("invalid configuration ({} problems)", errors.len());
    }

    let service = Arc::new(build_service(&config));

    match cli.command {
        Commands::Serve => serve(&config, service).await?,
        Commands::Roster {
            season,
            all,
            starters,
            limit,
        } => {
            let filters = RosterFilters {
                active_only: !all,
                starters_only: starters,
                limit,
            };
            print_json(&service.get_qb_roster(season, filters).await?)?;
        }
        Commands::Line { player, refresh } => {
            print_json(&service.get_player_line(&player, refresh).await?)?;
        }
        Commands::Distribution {
            player,
            line,
            min_attempts,
        } => {
            print_json(
                &service
                    .get_player_stat_distribution(&player, line, min_attempts)
                    .await?,
            )?;
        }
    }

    Ok(())
}

/// Wire the production clients. A missing odds or NBA key only disables
/// the operations that need it.
fn build_service(config: &AppConfig) -> LineService {
    let nflverse = Arc::new(NflverseClient::new(config.nflverse.clone()));
    let mut service = LineService::new(ServiceSettings::from(config), nflverse.clone(), nflverse);

    match OddsApiClient::new(config.odds_api.clone()) {
        Ok(client) => service = service.with_odds_source(Arc::new(client) as Arc<dyn OddsSource>),
        Err(e) => warn!("odds endpoints disabled: {}", e),
    }
    match BallDontLieClient::new(config.balldontlie.clone()) {
        Ok(client) => service = service.with_games_source(Arc::new(client) as Arc<dyn GamesSource>),
        Err(e) => warn!("NBA endpoints disabled: {}", e),
    }
    service
}

async fn serve(config: &AppConfig, service: Arc<LineService>) -> anyhow::Result<()> {
    let app = create_router(AppState::new(service));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
