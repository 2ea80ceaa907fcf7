use super::{LineService, TeamRecent, TeamTotalsResponse, TEAM_IDS_KEY};
use crate::domain::{NbaGame, NbaTeam, OddsLine};
use crate::error::{PropError, Result};
use crate::join::{consensus_line, extract_total_lines, find_game_by_home_team, find_odds_for_home_team};
use crate::loaders::last_final_games;
use crate::matching::mascot;
use crate::stats::SummaryStatistics;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const RECENT_GAMES: usize = 3;

/// Schedule date on the US east coast (fixed UTC-5).
fn schedule_date() -> NaiveDate {
    (Utc::now() - ChronoDuration::hours(5)).date_naive()
}

fn point_totals(games: &[NbaGame]) -> Vec<f64> {
    games.iter().map(|g| f64::from(g.total_points())).collect()
}

impl LineService {
    /// Mascot -> team id map, built on first use and then held.
    pub async fn team_ids(&self) -> Result<Arc<HashMap<String, u64>>> {
        self.load_team_ids(false).await
    }

    /// Rebuild the team id map from the provider.
    pub async fn refresh_team_ids(&self) -> Result<Arc<HashMap<String, u64>>> {
        self.load_team_ids(true).await
    }

    async fn load_team_ids(&self, refresh: bool) -> Result<Arc<HashMap<String, u64>>> {
        let source = self.games_source()?;
        let lookup = self
            .team_ids
            .get_or_fetch(TEAM_IDS_KEY.to_string(), None, refresh, move || async move {
                let teams = source.teams().await?;
                let map: HashMap<String, u64> = teams
                    .iter()
                    .filter(|t| t.is_current())
                    .map(|t| (mascot(&t.full_name).to_string(), t.id))
                    .collect();
                info!(teams = map.len(), "built team id map");
                Ok(Arc::new(map))
            })
            .await?;
        Ok(lookup.value)
    }

    /// Point totals of both teams' last three final games around today's
    /// matchup hosted by `home_team`.
    pub async fn get_team_totals(
        &self,
        home_team: &str,
        line: Option<f64>,
    ) -> Result<TeamTotalsResponse> {
        let source = self.games_source()?;
        let today = schedule_date();

        let todays = self
            .cached_games(format!("balldontlie:games:{today}"), {
                let source = Arc::clone(&source);
                move || async move { source.games_on(today).await }
            })
            .await?;
        let game = find_game_by_home_team(&todays, home_team)
            .cloned()
            .ok_or_else(|| PropError::not_found(format!("game hosted by {home_team} on {today}")))?;
        debug!(game_id = game.id, "resolved game");

        let books = self.posted_totals(today, &game.home_team.full_name).await;
        let posted_line = consensus_line(&books);
        let line = line.or(posted_line);

        let ids = self.team_ids().await?;
        let team_id = |team: &NbaTeam| {
            ids.get(mascot(&team.full_name))
                .copied()
                .ok_or_else(|| PropError::not_found(format!("team id for {}", team.full_name)))
        };
        let (home_id, away_id) = (team_id(&game.home_team)?, team_id(&game.visitor_team)?);

        let end_date = Utc::now().date_naive() - ChronoDuration::days(1);
        let (home_games, away_games) = futures::try_join!(
            self.recent_games(&source, home_id, end_date),
            self.recent_games(&source, away_id, end_date),
        )?;

        let combined: Vec<f64> = point_totals(&home_games)
            .into_iter()
            .chain(point_totals(&away_games))
            .collect();
        let side = |team: &NbaTeam, recent: Vec<NbaGame>| TeamRecent {
            team: team.clone(),
            summary: SummaryStatistics::compute(&point_totals(&recent), line).for_display(),
            recent,
        };

        info!(game_id = game.id, home_id, away_id, "team totals");
        Ok(TeamTotalsResponse {
            home: side(&game.home_team, home_games),
            away: side(&game.visitor_team, away_games),
            combined: SummaryStatistics::compute(&combined, line).for_display(),
            line,
            posted_line,
            books,
            game,
        })
    }

    /// Bookmaker totals posted for the game hosted by `home_team`. Without
    /// an odds key, or when the provider call fails, no books are reported.
    async fn posted_totals(&self, date: NaiveDate, home_team: &str) -> Vec<OddsLine> {
        let Ok(source) = self.odds_source() else {
            return Vec::new();
        };
        let sport = self.settings.nba_sport.clone();
        let market = self.settings.totals_market.clone();
        let regions = self.settings.regions.clone();
        let bookmakers = self.settings.totals_bookmakers.clone();
        // metered: one fetch per schedule date
        let key = format!("odds:{sport}:{market}:{regions}:{date}");

        let lookup = self
            .game_lines
            .get_or_fetch(key, None, false, move || async move {
                let odds = source.list_odds(&sport, &market, &regions, &bookmakers).await?;
                Ok(Arc::new(odds))
            })
            .await;
        match lookup {
            Ok(lookup) => find_odds_for_home_team(&lookup.value.payload, home_team)
                .map(|event| extract_total_lines(event, &self.settings.totals_market))
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, home_team, "posted totals unavailable");
                Vec::new()
            }
        }
    }

    async fn recent_games(
        &self,
        source: &Arc<dyn crate::sources::GamesSource>,
        team_id: u64,
        end_date: NaiveDate,
    ) -> Result<Vec<NbaGame>> {
        let season = self.settings.nba_season;
        let games = self
            .cached_games(format!("balldontlie:team-games:{team_id}:{season}:{end_date}"), {
                let source = Arc::clone(source);
                move || async move { source.team_games(team_id, season, end_date).await }
            })
            .await?;
        Ok(last_final_games(&games, RECENT_GAMES))
    }

    async fn cached_games<F, Fut>(&self, key: String, fetch: F) -> Result<Arc<Vec<NbaGame>>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<NbaGame>>> + Send + 'static,
    {
        let lookup = self
            .nba_games
            .get_or_fetch(key, Some(self.settings.events_ttl), false, move || {
                let pending = fetch();
                async move { Ok(Arc::new(pending.await?)) }
            })
            .await?;
        Ok(lookup.value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{LineService, ServiceSettings};
    use super::*;
    use crate::domain::{BookmakerOdds, CreditHeaders, EventOdds, MarketOdds, Outcome, ProviderResponse};
    use crate::error::PropError;
    use crate::sources::{MockGamesSource, MockOddsSource, MockRosterSource, MockWeeklyStatsSource};

    fn team(id: u64, full_name: &str, conference: &str) -> NbaTeam {
        NbaTeam {
            id,
            abbreviation: String::new(),
            city: String::new(),
            conference: conference.to_string(),
            full_name: full_name.to_string(),
            name: mascot(full_name).to_string(),
        }
    }

    fn game(id: u64, date: &str, status: &str, home: NbaTeam, away: NbaTeam, scores: (u32, u32)) -> NbaGame {
        NbaGame {
            id,
            date: date.to_string(),
            season: 2023,
            status: status.to_string(),
            home_team: home,
            visitor_team: away,
            home_team_score: scores.0,
            visitor_team_score: scores.1,
        }
    }

    fn lakers() -> NbaTeam {
        team(14, "Los Angeles Lakers", "West")
    }

    fn celtics() -> NbaTeam {
        team(2, "Boston Celtics", "East")
    }

    fn service(games: MockGamesSource) -> LineService {
        LineService::new(
            ServiceSettings::default(),
            Arc::new(MockRosterSource::new()),
            Arc::new(MockWeeklyStatsSource::new()),
        )
        .with_games_source(Arc::new(games))
    }

    fn games_source() -> MockGamesSource {
        let mut games = MockGamesSource::new();
        games
            .expect_teams()
            .times(1)
            .returning(|| Ok(vec![lakers(), celtics(), team(37, "Chicago Stags", "")]));
        games.expect_games_on().times(1).returning(|_| {
            Ok(vec![game(900, "2026-10-16", "7:30 pm ET", lakers(), celtics(), (0, 0))])
        });
        games.expect_team_games().returning(|team_id, _, _| {
            let opp = team(5, "Chicago Bulls", "East");
            Ok(if team_id == 14 {
                vec![
                    game(1, "2026-10-10", "Final", lakers(), opp.clone(), (110, 100)),
                    game(2, "2026-10-12", "Final", opp.clone(), lakers(), (105, 115)),
                    game(3, "2026-10-14", "Final", lakers(), opp.clone(), (120, 108)),
                    game(4, "2026-10-08", "Final", lakers(), opp, (90, 90)),
                ]
            } else {
                vec![
                    game(5, "2026-10-13", "Final", celtics(), opp.clone(), (101, 99)),
                    game(6, "2026-10-15", "4th Qtr", celtics(), opp, (80, 70)),
                ]
            })
        });
        games
    }

    #[tokio::test]
    async fn test_team_totals() {
        let service = service(games_source());

        let resp = service
            .get_team_totals("Los Angeles Lakers", Some(215.5))
            .await
            .unwrap();

        assert_eq!(resp.game.id, 900);
        let recent: Vec<u64> = resp.home.recent.iter().map(|g| g.id).collect();
        assert_eq!(recent, vec![3, 2, 1]);
        // 228, 220, 210
        assert_eq!(resp.home.summary.median, Some(220.0));
        assert_eq!(resp.home.summary.p_over, Some(0.667));

        // the in-progress game is not final
        assert_eq!(resp.away.recent.len(), 1);
        assert_eq!(resp.combined.n, 4);
        assert_eq!(resp.combined.max, Some(228.0));
    }

    #[tokio::test]
    async fn test_team_id_map_built_once_and_excludes_defunct() {
        let mut games = MockGamesSource::new();
        games
            .expect_teams()
            .times(1)
            .returning(|| Ok(vec![lakers(), celtics(), team(37, "Chicago Stags", "")]));
        let service = service(games);

        let ids = service.team_ids().await.unwrap();
        assert_eq!(ids.get("Lakers"), Some(&14));
        assert!(!ids.contains_key("Stags"));

        // second build served from the cache (teams() expects one call)
        let again = service.team_ids().await.unwrap();
        assert!(Arc::ptr_eq(&ids, &again));
    }

    #[tokio::test]
    async fn test_refresh_team_ids_refetches() {
        let mut games = MockGamesSource::new();
        games
            .expect_teams()
            .times(2)
            .returning(|| Ok(vec![lakers(), celtics()]));
        let service = service(games);

        let first = service.team_ids().await.unwrap();
        let rebuilt = service.refresh_team_ids().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(rebuilt.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_home_team_is_not_found() {
        let mut games = MockGamesSource::new();
        games.expect_games_on().returning(|_| Ok(Vec::new()));
        let service = service(games);

        let err = service.get_team_totals("Boston Celtics", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_key_is_missing_configuration() {
        let service = LineService::new(
            ServiceSettings::default(),
            Arc::new(MockRosterSource::new()),
            Arc::new(MockWeeklyStatsSource::new()),
        );
        let err = service.get_team_totals("Los Angeles Lakers", None).await.unwrap_err();
        assert!(err.is_missing_configuration());
    }

    fn totals_book(key: &str, point: f64) -> BookmakerOdds {
        let side = |name: &str| Outcome {
            name: name.to_string(),
            description: None,
            price: Some(-110.0),
            point: Some(point),
        };
        BookmakerOdds {
            key: key.to_string(),
            title: key.to_string(),
            last_update: None,
            markets: vec![MarketOdds {
                key: "totals".to_string(),
                last_update: Some("2026-10-16T15:00:00Z".to_string()),
                outcomes: vec![side("Over"), side("Under")],
            }],
        }
    }

    #[tokio::test]
    async fn test_team_totals_report_posted_lines() {
        let mut odds = MockOddsSource::new();
        odds.expect_list_odds()
            .withf(|sport, market, regions, books| {
                sport == "basketball_nba"
                    && market == "totals"
                    && regions == "us"
                    && books == "betmgm,draftkings,fanduel"
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(ProviderResponse {
                    payload: vec![EventOdds {
                        id: "nba-1".to_string(),
                        commence_time: "2026-10-16T23:30:00Z".to_string(),
                        home_team: "Los Angeles Lakers".to_string(),
                        away_team: "Boston Celtics".to_string(),
                        bookmakers: vec![totals_book("betmgm", 227.5), totals_book("fanduel", 228.5)],
                    }],
                    credits: CreditHeaders::default(),
                })
            });
        let service = service(games_source()).with_odds_source(Arc::new(odds));

        let resp = service.get_team_totals("Los Angeles Lakers", None).await.unwrap();
        assert_eq!(resp.books.len(), 2);
        assert_eq!(resp.posted_line, Some(228.0));
        // no requested line: the posted consensus is summarized against
        assert_eq!(resp.line, Some(228.0));

        // the metered listing is held; an explicit line wins over the posted one
        let again = service.get_team_totals("Los Angeles Lakers", Some(215.5)).await.unwrap();
        assert_eq!(again.posted_line, Some(228.0));
        assert_eq!(again.line, Some(215.5));
    }

    #[tokio::test]
    async fn test_failed_lines_do_not_fail_team_totals() {
        let mut odds = MockOddsSource::new();
        odds.expect_list_odds()
            .returning(|_, _, _, _| Err(PropError::upstream("the-odds-api", "status 503")));
        let service = service(games_source()).with_odds_source(Arc::new(odds));

        let resp = service.get_team_totals("Los Angeles Lakers", None).await.unwrap();
        assert!(resp.books.is_empty());
        assert_eq!(resp.posted_line, None);
        assert_eq!(resp.line, None);
        assert_eq!(resp.combined.n, 4);
    }
}
