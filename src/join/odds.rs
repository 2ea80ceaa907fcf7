use crate::domain::{EventOdds, OddsLine, Outcome};
use crate::matching::{same_entity, same_team};
use crate::stats::median;

/// Outcomes of one bookmaker market sharing a point value
struct PointGroup<'a> {
    point: f64,
    over: Option<&'a Outcome>,
    under: Option<&'a Outcome>,
}

impl PointGroup<'_> {
    fn is_paired(&self) -> bool {
        self.over.is_some() && self.under.is_some()
    }
}

fn group_by_point<'a>(outcomes: impl Iterator<Item = &'a Outcome>) -> Vec<PointGroup<'a>> {
    let mut groups: Vec<PointGroup<'a>> = Vec::new();
    for outcome in outcomes {
        let Some(point) = outcome.point else {
            continue;
        };
        if outcome.price.is_none() {
            continue;
        }
        let idx = match groups.iter().position(|g| g.point == point) {
            Some(idx) => idx,
            None => {
                groups.push(PointGroup {
                    point,
                    over: None,
                    under: None,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        if outcome.is_over() && group.over.is_none() {
            group.over = Some(outcome);
        } else if outcome.is_under() && group.under.is_none() {
            group.under = Some(outcome);
        }
    }
    groups
}

/// One over/under line per bookmaker for `player_name` in `market`.
///
/// Outcomes are matched to the player by loose name and grouped by point;
/// outcomes without a point or price are ignored.
/// The first group carrying both sides wins; otherwise the first group.
/// Bookmakers without the market or without a matching outcome are dropped.
pub fn extract_player_lines(payload: &EventOdds, player_name: &str, market: &str) -> Vec<OddsLine> {
    extract_lines(payload, market, |o| {
        o.description
            .as_deref()
            .is_some_and(|d| same_entity(d, player_name))
    })
}

/// One game-level over/under line per bookmaker in `market` (e.g. "totals").
pub fn extract_total_lines(payload: &EventOdds, market: &str) -> Vec<OddsLine> {
    extract_lines(payload, market, |_| true)
}

fn extract_lines<F>(payload: &EventOdds, market: &str, keep: F) -> Vec<OddsLine>
where
    F: Fn(&Outcome) -> bool,
{
    payload
        .bookmakers
        .iter()
        .filter_map(|book| {
            let market_odds = book.markets.iter().find(|m| m.key == market)?;
            let groups = group_by_point(market_odds.outcomes.iter().filter(|o| keep(*o)));
            let chosen = groups
                .iter()
                .find(|g| g.is_paired())
                .or_else(|| groups.first())?;

            Some(OddsLine {
                book: book.key.clone(),
                point: chosen.point,
                price_over: chosen.over.and_then(|o| o.price),
                price_under: chosen.under.and_then(|o| o.price),
                last_update: market_odds
                    .last_update
                    .clone()
                    .or_else(|| book.last_update.clone()),
            })
        })
        .collect()
}

/// Earliest game in `events` hosted by `home_team` (mascot match).
pub fn find_odds_for_home_team<'a>(events: &'a [EventOdds], home_team: &str) -> Option<&'a EventOdds> {
    events
        .iter()
        .filter(|e| same_team(&e.home_team, home_team))
        .min_by(|a, b| a.commence_time.cmp(&b.commence_time))
}

/// Median posted point across books; `None` when no book posted.
pub fn consensus_line(lines: &[OddsLine]) -> Option<f64> {
    let points: Vec<f64> = lines.iter().map(|l| l.point).collect();
    median(&points)
}
