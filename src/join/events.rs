use crate::domain::OddsEvent;
use crate::matching::same_team;
use chrono::{DateTime, Utc};

/// Earliest upcoming event involving `full_team_name` (home or away).
///
/// Events with an unparseable commence time, or one before `now`, never
/// qualify.
pub fn find_event_for_team<'a>(
    events: &'a [OddsEvent],
    full_team_name: &str,
    now: DateTime<Utc>,
) -> Option<&'a OddsEvent> {
    events
        .iter()
        .filter(|e| same_team(&e.home_team, full_team_name) || same_team(&e.away_team, full_team_name))
        .filter_map(|e| e.commence_at().map(|t| (t, e)))
        .filter(|(t, _)| *t >= now)
        .min_by_key(|(t, _)| *t)
        .map(|(_, e)| e)
}
