//! Team identity: mascot-token matching and the NFL franchise directory.

/// Roster abbreviation -> full franchise name as the odds provider spells it.
///
/// Includes relocated/legacy abbreviations still present in older rosters.
const NFL_TEAMS: &[(&str, &str)] = &[
    ("ARI", "Arizona Cardinals"),
    ("ATL", "Atlanta Falcons"),
    ("BAL", "Baltimore Ravens"),
    ("BUF", "Buffalo Bills"),
    ("CAR", "Carolina Panthers"),
    ("CHI", "Chicago Bears"),
    ("CIN", "Cincinnati Bengals"),
    ("CLE", "Cleveland Browns"),
    ("DAL", "Dallas Cowboys"),
    ("DEN", "Denver Broncos"),
    ("DET", "Detroit Lions"),
    ("GB", "Green Bay Packers"),
    ("HOU", "Houston Texans"),
    ("IND", "Indianapolis Colts"),
    ("JAX", "Jacksonville Jaguars"),
    ("KC", "Kansas City Chiefs"),
    ("LAC", "Los Angeles Chargers"),
    ("LA", "Los Angeles Rams"),
    ("LAR", "Los Angeles Rams"),
    ("LV", "Las Vegas Raiders"),
    ("MIA", "Miami Dolphins"),
    ("MIN", "Minnesota Vikings"),
    ("NE", "New England Patriots"),
    ("NO", "New Orleans Saints"),
    ("NYG", "New York Giants"),
    ("NYJ", "New York Jets"),
    ("PHI", "Philadelphia Eagles"),
    ("PIT", "Pittsburgh Steelers"),
    ("SF", "San Francisco 49ers"),
    ("SEA", "Seattle Seahawks"),
    ("TB", "Tampa Bay Buccaneers"),
    ("TEN", "Tennessee Titans"),
    ("WAS", "Washington Commanders"),
    ("WSH", "Washington Commanders"),
    ("OAK", "Las Vegas Raiders"),
    ("SD", "Los Angeles Chargers"),
    ("STL", "Los Angeles Rams"),
];

/// Trailing word of a full team name ("Chiefs" in "Kansas City Chiefs").
pub fn mascot(full_name: &str) -> &str {
    full_name.split_whitespace().last().unwrap_or_default()
}

/// Exact, case-sensitive mascot comparison.
pub fn same_team(a: &str, b: &str) -> bool {
    let (a, b) = (mascot(a), mascot(b));
    !a.is_empty() && a == b
}

/// Full franchise name for a roster abbreviation.
pub fn nfl_team_name(abbr: &str) -> Option<&'static str> {
    let abbr = abbr.trim();
    NFL_TEAMS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(abbr))
        .map(|(_, name)| *name)
}
