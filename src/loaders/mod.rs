//! Typed accessors that flatten raw upstream rows into canonical shapes.
//!
//! Loaders fail closed: a row missing a required field or failing numeric
//! coercion is dropped, never raised.

pub mod fields;
pub mod games;
pub mod roster;
pub mod weekly;

pub use fields::FieldCandidates;
pub use games::last_final_games;
pub use roster::{extract_qbs, load_roster_prefer_current, slugify};
pub use weekly::{collect_player_rows, is_regular_season, match_weekly_row_to_player};
