//! Column-name fallbacks per canonical field.
//!
//! Upstream files rename columns between seasons. Each canonical field has
//! an ordered list of candidate columns, evaluated first-match-wins.

use crate::domain::RawRow;

/// Ordered candidate columns for one canonical field
#[derive(Debug, Clone, Copy)]
pub struct FieldCandidates {
    pub field: &'static str,
    pub columns: &'static [&'static str],
}

impl FieldCandidates {
    /// First non-blank text among the candidates.
    pub fn text<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        self.columns.iter().find_map(|c| row.text(c))
    }

    /// First candidate that coerces to a finite number.
    pub fn number(&self, row: &RawRow) -> Option<f64> {
        self.columns.iter().find_map(|c| row.number(c))
    }

    /// Every non-blank candidate value, in candidate order.
    pub fn all_text<'a>(&self, row: &'a RawRow) -> Vec<&'a str> {
        self.columns.iter().filter_map(|c| row.text(c)).collect()
    }
}

pub const ROSTER_ID: FieldCandidates = FieldCandidates {
    field: "id",
    columns: &["gsis_id", "pfr_id"],
};

pub const ROSTER_TEAM: FieldCandidates = FieldCandidates {
    field: "team_abbr",
    columns: &["team", "team_abbr"],
};

pub const POSITION: FieldCandidates = FieldCandidates {
    field: "position",
    columns: &["position"],
};

pub const STATUS: FieldCandidates = FieldCandidates {
    field: "status",
    columns: &["status"],
};

pub const FIRST_NAME: FieldCandidates = FieldCandidates {
    field: "first_name",
    columns: &["first_name"],
};

pub const LAST_NAME: FieldCandidates = FieldCandidates {
    field: "last_name",
    columns: &["last_name"],
};

pub const FULL_NAME: FieldCandidates = FieldCandidates {
    field: "full_name",
    columns: &["full_name"],
};

pub const SEASON_TYPE: FieldCandidates = FieldCandidates {
    field: "season_type",
    columns: &["season_type", "game_type"],
};

pub const PLAYER_IDS: FieldCandidates = FieldCandidates {
    field: "player_id",
    columns: &[
        "gsis_id",
        "player_id",
        "gsis",
        "player_gsis_id",
        "player_gsis",
        "playerid_gsis",
    ],
};

pub const PLAYER_NAME: FieldCandidates = FieldCandidates {
    field: "player_name",
    columns: &["player_name", "name"],
};

pub const PASS_ATTEMPTS: FieldCandidates = FieldCandidates {
    field: "attempts",
    columns: &["pass_att", "att", "pass_attempts", "attempts"],
};

pub const PASS_YARDS: FieldCandidates = FieldCandidates {
    field: "yards",
    columns: &["pass_yds", "passing_yards", "yards_gained_passing", "yds"],
};

pub const SEASON: FieldCandidates = FieldCandidates {
    field: "season",
    columns: &["season"],
};

pub const WEEK: FieldCandidates = FieldCandidates {
    field: "week",
    columns: &["week"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let row = RawRow::from_pairs([("pass_att", ""), ("att", "31"), ("attempts", "40")]);
        assert_eq!(PASS_ATTEMPTS.number(&row), Some(31.0));
    }

    #[test]
    fn test_number_skips_unparseable_candidate() {
        let row = RawRow::from_pairs([("pass_yds", "n/a"), ("passing_yards", "287")]);
        assert_eq!(PASS_YARDS.number(&row), Some(287.0));
    }

    #[test]
    fn test_all_text_keeps_candidate_order() {
        let row = RawRow::from_pairs([("player_id", "00-1"), ("gsis_id", "00-2"), ("gsis", " ")]);
        assert_eq!(PLAYER_IDS.all_text(&row), vec!["00-2", "00-1"]);
    }
}
