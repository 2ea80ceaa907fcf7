use super::lenient::score_or_zero;
use serde::{Deserialize, Serialize};

/// NBA franchise as listed by BallDontLie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NbaTeam {
    pub id: u64,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub city: String,
    /// Empty for defunct franchises
    #[serde(default)]
    pub conference: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub name: String,
}

impl NbaTeam {
    /// Defunct franchises carry an empty conference.
    pub fn is_current(&self) -> bool {
        !self.conference.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbaGame {
    pub id: u64,
    /// `YYYY-MM-DD` (older payloads send a full timestamp)
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub season: i32,
    #[serde(default)]
    pub status: String,
    pub home_team: NbaTeam,
    pub visitor_team: NbaTeam,
    #[serde(default, deserialize_with = "score_or_zero")]
    pub home_team_score: u32,
    #[serde(default, deserialize_with = "score_or_zero")]
    pub visitor_team_score: u32,
}

impl NbaGame {
    pub fn is_final(&self) -> bool {
        self.status == "Final"
    }

    /// Combined points scored by both teams
    pub fn total_points(&self) -> u32 {
        self.home_team_score + self.visitor_team_score
    }
}
