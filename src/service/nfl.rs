use super::{
    CacheMeta, CacheSource, DistributionResponse, DistributionScopes, LineService,
    PlayerLineResponse, RosterFilters, RosterResponse, ScopeSummary,
};
use crate::domain::{CanonicalPlayer, StatRow};
use crate::error::{PropError, Result};
use crate::join::{consensus_line, extract_player_lines, find_event_for_team};
use crate::loaders::{collect_player_rows, extract_qbs, load_roster_prefer_current};
use crate::matching::nfl_team_name;
use crate::stats::SummaryStatistics;
use chrono::{SecondsFormat, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

impl LineService {
    /// Quarterbacks of `season` (default: current), filtered and sorted
    /// starters first, then team, then name.
    pub async fn get_qb_roster(
        &self,
        season: Option<i32>,
        filters: RosterFilters,
    ) -> Result<RosterResponse> {
        let season = season.unwrap_or_else(|| self.current_season());
        let (roster_season, mut players) = self.load_qbs(season).await?;

        if filters.active_only {
            players.retain(|p| p.is_active);
        }
        if filters.starters_only {
            players.retain(|p| p.is_starter);
        }
        players.sort_by(|a, b| {
            b.is_starter
                .cmp(&a.is_starter)
                .then_with(|| a.team_abbr.cmp(&b.team_abbr))
                .then_with(|| a.name.cmp(&b.name))
        });
        if filters.limit > 0 {
            players.truncate(filters.limit);
        }

        info!(season, roster_season, players = players.len(), "qb roster");
        Ok(RosterResponse {
            season,
            roster_season,
            players,
        })
    }

    /// Current posted lines for a quarterback's next game.
    ///
    /// The odds payload costs one provider credit; it is fetched on first
    /// use and reused until `refresh` is set.
    pub async fn get_player_line(
        &self,
        player_id: &str,
        refresh: bool,
    ) -> Result<PlayerLineResponse> {
        // No key, no roster download either
        self.odds_source()?;

        let player = self.resolve_player(player_id).await?;
        let team_name = nfl_team_name(&player.team_abbr).ok_or_else(|| {
            PropError::not_found(format!("team for abbreviation {:?}", player.team_abbr))
        })?;

        let listing = self.event_listing().await?;
        let event = find_event_for_team(&listing.payload, team_name, Utc::now())
            .cloned()
            .ok_or_else(|| PropError::not_found(format!("upcoming event for {team_name}")))?;
        debug!(event_id = %event.id, team = team_name, "resolved event");

        let (key, lookup) = self.odds_for_event(&event.id, refresh).await?;
        let market = self.settings.player_market.clone();
        let books = extract_player_lines(&lookup.value.payload, &player.name, &market);
        let consensus = consensus_line(&books);

        let fetched_at = Utc::now()
            - chrono::Duration::from_std(lookup.age).unwrap_or_else(|_| chrono::Duration::zero());
        let cache = CacheMeta {
            key,
            source: if lookup.from_cache {
                CacheSource::Cache
            } else {
                CacheSource::Provider
            },
            fetched_at: fetched_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            age_secs: lookup.age.as_secs(),
            refreshed: refresh,
        };

        info!(
            player = %player.id,
            event_id = %event.id,
            books = books.len(),
            consensus = ?consensus,
            source = ?cache.source,
            "player line"
        );
        Ok(PlayerLineResponse {
            player,
            event,
            market,
            consensus_line: consensus,
            books,
            cache,
            provider_credits: lookup.value.credits.clone(),
        })
    }

    /// Weekly passing-yard distributions for the current season, the prior
    /// season and the career window, relative to an optional line.
    pub async fn get_player_stat_distribution(
        &self,
        player_id: &str,
        line: Option<f64>,
        min_attempts: Option<f64>,
    ) -> Result<DistributionResponse> {
        let player = self.resolve_player(player_id).await?;
        let min_attempts = min_attempts.unwrap_or(0.0);

        let current = self.current_season();
        let span = self.settings.career_seasons.max(1) as i32;
        let seasons: Vec<i32> = (current - span + 1..=current).collect();

        let (loaded, rows) = self.load_player_weeks(&player, &seasons).await;
        let rows: Vec<StatRow> = rows
            .into_iter()
            .filter(|r| r.attempts >= min_attempts)
            .collect();

        let scope = |from: i32, to: i32| {
            let sample: Vec<f64> = rows
                .iter()
                .filter(|r| (from..=to).contains(&r.season))
                .map(|r| r.yards)
                .collect();
            ScopeSummary {
                seasons: loaded
                    .iter()
                    .copied()
                    .filter(|s| (from..=to).contains(s))
                    .collect(),
                summary: SummaryStatistics::compute(&sample, line).for_display(),
            }
        };

        let scopes = DistributionScopes {
            current_season: scope(current, current),
            last_season: scope(current - 1, current - 1),
            career: scope(current - span + 1, current),
        };
        info!(
            player = %player.id,
            career_weeks = scopes.career.summary.n,
            "stat distribution"
        );

        Ok(DistributionResponse {
            player,
            line,
            min_attempts,
            scopes,
        })
    }

    /// QBs from the requested season's roster, or the prior season's.
    async fn load_qbs(&self, season: i32) -> Result<(i32, Vec<CanonicalPlayer>)> {
        let (loaded, rows) =
            load_roster_prefer_current(season, self.settings.floor_season, |s| {
                self.roster_rows(s)
            })
            .await?;
        Ok((loaded, extract_qbs(&rows)))
    }

    async fn resolve_player(&self, player_id: &str) -> Result<CanonicalPlayer> {
        let (_, players) = self.load_qbs(self.current_season()).await?;
        players
            .into_iter()
            .find(|p| p.is_identified_by(player_id))
            .ok_or_else(|| PropError::not_found(format!("player {player_id}")))
    }

    /// Matched weekly rows across `seasons`. A season that fails to load is
    /// skipped; returns the seasons that loaded alongside the rows.
    async fn load_player_weeks(
        &self,
        player: &CanonicalPlayer,
        seasons: &[i32],
    ) -> (Vec<i32>, Vec<StatRow>) {
        let tables = join_all(seasons.iter().map(|&s| async move { (s, self.weekly_rows(s).await) })).await;

        let mut loaded = Vec::new();
        let mut rows = Vec::new();
        for (season, table) in tables {
            match table {
                Ok(table) => {
                    loaded.push(season);
                    rows.extend(collect_player_rows(&table, player));
                }
                Err(err) => warn!(season, error = %err, "skipping weekly stats season"),
            }
        }
        (loaded, rows)
    }
}
