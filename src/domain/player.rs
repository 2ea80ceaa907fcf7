use serde::{Deserialize, Serialize};

/// A rostered player as resolved from one season's roster file.
///
/// Re-derived on every roster load; never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPlayer {
    /// Stable external id (GSIS, then PFR) or the slug when neither exists
    pub id: String,
    /// `last-first`, lower-case, non-alphanumerics collapsed to `-`
    pub slug: String,
    pub name: String,
    pub team_abbr: String,
    pub is_active: bool,
    /// Always false: the roster feed carries no depth chart
    pub is_starter: bool,
}

impl CanonicalPlayer {
    /// Whether `key` names this player by id or slug.
    pub fn is_identified_by(&self, key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && (self.id == key || self.slug == key.to_lowercase())
    }
}

/// One regular-season week of passing for one player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub season: i32,
    pub week: u32,
    pub attempts: f64,
    pub yards: f64,
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

    #[test]
    fn test_identified_by_id_or_slug() {
        let p = mahomes();
        assert!(p.is_identified_by("00-0033873"));
        assert!(p.is_identified_by("Mahomes-Patrick"));
        assert!(!p.is_identified_by(""));
        assert!(!p.is_identified_by("allen-josh"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(mahomes()).unwrap();
        assert_eq!(json["teamAbbr"], "KC");
        assert_eq!(json["isStarter"], false);
    }
}
