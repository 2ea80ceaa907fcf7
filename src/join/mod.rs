//! Locate the record matching a canonical player or team inside
//! heterogeneous upstream result sets.
//!
//! Every lookup returns `Option`; callers branch on absence explicitly.

pub mod events;
pub mod games;
pub mod odds;

pub use events::find_event_for_team;
pub use games::find_game_by_home_team;
pub use odds::{consensus_line, extract_player_lines, extract_total_lines, find_odds_for_home_team};
