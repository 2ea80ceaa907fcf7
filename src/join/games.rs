use crate::domain::NbaGame;
use crate::matching::same_team;

/// First game whose home team shares the mascot token of `home_team_full_name`.
pub fn find_game_by_home_team<'a>(
    games: &'a [NbaGame],
    home_team_full_name: &str,
) -> Option<&'a NbaGame> {
    games
        .iter()
        .find(|g| same_team(&g.home_team.full_name, home_team_full_name))
}
