use super::lenient::{optional_number, skip_malformed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event listing entry from the odds provider (free endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    /// RFC 3339 as sent by the provider; parsed at join time
    #[serde(default)]
    pub commence_time: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
}

impl OddsEvent {
    pub fn commence_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.commence_time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Single outcome inside a bookmaker market.
///
/// For player props `name` is "Over"/"Under" and `description` carries
/// the player's name. A missing or non-numeric price or point reads as
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub point: Option<f64>,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        self.name.eq_ignore_ascii_case("over")
    }

    pub fn is_under(&self) -> bool {
        self.name.eq_ignore_ascii_case("under")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    pub key: String,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerOdds {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub markets: Vec<MarketOdds>,
}

/// Per-event odds payload (metered endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOdds {
    pub id: String,
    #[serde(default)]
    pub commence_time: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub bookmakers: Vec<BookmakerOdds>,
}

/// One bookmaker's over/under line for a player in one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsLine {
    pub book: String,
    pub point: f64,
    pub price_over: Option<f64>,
    pub price_under: Option<f64>,
    pub last_update: Option<String>,
}

/// Provider usage headers, passed through verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditHeaders {
    pub requests_last: Option<String>,
    pub requests_used: Option<String>,
    pub requests_remaining: Option<String>,
}

/// Provider payload together with the credit headers of the call that produced it
#[derive(Debug, Clone)]
pub struct ProviderResponse<T> {
    pub payload: T,
    pub credits: CreditHeaders,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_odds_deserializes_provider_shape() {
        let json = r#"{
            "id": "evt1",
            "sport_key": "americanfootball_nfl",
            "commence_time": "2026-10-18T17:00:00Z",
            "home_team": "Kansas City Chiefs",
            "away_team": "Las Vegas Raiders",
            "bookmakers": [{
                "key": "draftkings",
                "title": "DraftKings",
                "last_update": "2026-10-16T12:00:00Z",
                "markets": [{
                    "key": "player_pass_yds",
                    "last_update": "2026-10-16T12:00:00Z",
                    "outcomes": [
                        {"name": "Over", "description": "Patrick Mahomes", "price": -115, "point": 262.5},
                        {"name": "Under", "description": "Patrick Mahomes", "price": -105, "point": 262.5}
                    ]
                }]
            }]
        }"#;
        let odds: EventOdds = serde_json::from_str(json).unwrap();
        let outcome = &odds.bookmakers[0].markets[0].outcomes[0];
        assert!(outcome.is_over());
        assert_eq!(outcome.point, Some(262.5));
        assert_eq!(outcome.description.as_deref(), Some("Patrick Mahomes"));
    }

    #[test]
    fn test_commence_at_rejects_garbage() {
        let mut event = OddsEvent {
            id: "e".into(),
            sport_key: String::new(),
            commence_time: "soon".into(),
            home_team: String::new(),
            away_team: String::new(),
        };
        assert!(event.commence_at().is_none());
        event.commence_time = "2026-10-18T17:00:00Z".into();
        assert!(event.commence_at().is_some());
    }
}
