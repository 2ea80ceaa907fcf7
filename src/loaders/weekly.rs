use crate::domain::{CanonicalPlayer, RawRow, StatRow};
use crate::loaders::fields;
use crate::matching::same_entity;
use tracing::debug;

const REGULAR_SEASON: [&str; 3] = ["REG", "R", "REGULAR"];

/// Regular-season rows only; a row without a season type is accepted.
pub fn is_regular_season(row: &RawRow) -> bool {
    match fields::SEASON_TYPE.text(row) {
        None => true,
        Some(st) => REGULAR_SEASON
            .iter()
            .any(|reg| st.eq_ignore_ascii_case(reg)),
    }
}

fn row_name(row: &RawRow) -> String {
    match fields::PLAYER_NAME.text(row) {
        Some(name) => name.to_string(),
        None => format!(
            "{} {}",
            fields::FIRST_NAME.text(row).unwrap_or_default(),
            fields::LAST_NAME.text(row).unwrap_or_default()
        ),
    }
}

/// Flatten one weekly stat row for `player`, or `None` when it does not apply.
///
/// Fails closed unless the row is regular season, identifies the player by
/// id or loose name, and carries numeric season, week and yards.
pub fn match_weekly_row_to_player(row: &RawRow, player: &CanonicalPlayer) -> Option<StatRow> {
    if !is_regular_season(row) {
        return None;
    }

    let same_id = !player.id.is_empty()
        && fields::PLAYER_IDS
            .all_text(row)
            .iter()
            .any(|id| *id == player.id.trim());
    if !same_id && !same_entity(&row_name(row), &player.name) {
        return None;
    }

    let yards = fields::PASS_YARDS.number(row)?;
    let season = fields::SEASON.number(row)?;
    let week = fields::WEEK.number(row)?;
    if week < 0.0 {
        return None;
    }

    Some(StatRow {
        season: season as i32,
        week: week as u32,
        attempts: fields::PASS_ATTEMPTS.number(row).unwrap_or(0.0),
        yards,
    })
}

/// Every row of `rows` that belongs to `player`, in file order.
pub fn collect_player_rows(rows: &[RawRow], player: &CanonicalPlayer) -> Vec<StatRow> {
    let matched: Vec<StatRow> = rows
        .iter()
        .filter_map(|r| match_weekly_row_to_player(r, player))
        .collect();
    debug!(
        player = %player.id,
        scanned = rows.len(),
        matched = matched.len(),
        "weekly rows matched"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mahomes() -> CanonicalPlayer {
        CanonicalPlayer {
            id: "00-0033873".to_string(),
            slug: "mahomes-patrick".to_string(),
            name: "Patrick Mahomes".to_string(),
            team_abbr: "KC".to_string(),
            is_active: true,
            is_starter: false,
        }
    }

    fn week_row(extra: &[(&str, &str)]) -> RawRow {
        let mut pairs = vec![
            ("season", "2024"),
            ("week", "3"),
            ("season_type", "REG"),
            ("passing_yards", "245"),
            ("attempts", "33"),
        ];
        pairs.extend_from_slice(extra);
        RawRow::from_pairs(pairs)
    }

    #[test]
    fn test_matches_by_id() {
        let row = week_row(&[("player_id", "00-0033873"), ("player_name", "Somebody Else")]);
        let stat = match_weekly_row_to_player(&row, &mahomes()).unwrap();
        assert_eq!(
            stat,
            StatRow {
                season: 2024,
                week: 3,
                attempts: 33.0,
                yards: 245.0
            }
        );
    }

    #[test]
    fn test_matches_by_loose_name() {
        let row = week_row(&[("player_id", "00-0099999"), ("player_name", "P.Mahomes")]);
        assert!(match_weekly_row_to_player(&row, &mahomes()).is_some());
    }

    #[test]
    fn test_name_from_first_last_columns() {
        let row = week_row(&[("first_name", "Pat"), ("last_name", "Mahomes")]);
        assert!(match_weekly_row_to_player(&row, &mahomes()).is_some());
    }

    #[test]
    fn test_rejects_postseason_and_other_players() {
        let post = RawRow::from_pairs([
            ("season", "2024"),
            ("week", "19"),
            ("season_type", "POST"),
            ("passing_yards", "300"),
            ("player_id", "00-0033873"),
        ]);
        assert!(!is_regular_season(&post));
        assert!(match_weekly_row_to_player(&post, &mahomes()).is_none());

        let other = week_row(&[("player_name", "J.Allen")]);
        assert!(match_weekly_row_to_player(&other, &mahomes()).is_none());
    }

    #[test]
    fn test_season_type_synonyms_and_absence() {
        for st in ["REG", "r", "Regular"] {
            assert!(is_regular_season(&RawRow::from_pairs([("game_type", st)])));
        }
        assert!(is_regular_season(&RawRow::default()));
    }

    #[test]
    fn test_malformed_numbers_are_excluded() {
        let row = RawRow::from_pairs([
            ("season", "2024"),
            ("week", "NA"),
            ("passing_yards", "245"),
            ("player_id", "00-0033873"),
        ]);
        assert!(match_weekly_row_to_player(&row, &mahomes()).is_none());

        let no_attempts = RawRow::from_pairs([
            ("season", "2024"),
            ("week", "5"),
            ("pass_yds", "199"),
            ("player_id", "00-0033873"),
        ]);
        let stat = match_weekly_row_to_player(&no_attempts, &mahomes()).unwrap();
        assert_eq!(stat.attempts, 0.0);
        assert_eq!(stat.yards, 199.0);
    }

    #[test]
    fn test_collect_player_rows_keeps_order() {
        let rows = vec![
            week_row(&[("player_id", "00-0033873")]),
            week_row(&[("player_name", "J.Allen")]),
            RawRow::from_pairs([
                ("season", "2024"),
                ("week", "4"),
                ("passing_yards", "310"),
                ("player_name", "P.Mahomes"),
            ]),
        ];
        let out = collect_player_rows(&rows, &mahomes());
        assert_eq!(out.iter().map(|r| r.week).collect::<Vec<_>>(), vec![3, 4]);
    }
}
