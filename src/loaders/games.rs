use crate::domain::NbaGame;

/// The `n` most recent final games, most recent first.
pub fn last_final_games(games: &[NbaGame], n: usize) -> Vec<NbaGame> {
    let mut finals: Vec<NbaGame> = games.iter().filter(|g| g.is_final()).cloned().collect();
    // ISO dates (with or without a time part) order lexicographically
    finals.sort_by(|a, b| b.date.cmp(&a.date));
    finals.truncate(n);
    finals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NbaTeam;

    fn team(id: u64, full_name: &str) -> NbaTeam {
        NbaTeam {
            id,
            abbreviation: String::new(),
            city: String::new(),
            conference: "West".to_string(),
            full_name: full_name.to_string(),
            name: String::new(),
        }
    }

    fn game(id: u64, date: &str, status: &str) -> NbaGame {
        NbaGame {
            id,
            date: date.to_string(),
            season: 2023,
            status: status.to_string(),
            home_team: team(14, "Los Angeles Lakers"),
            visitor_team: team(2, "Boston Celtics"),
            home_team_score: 110,
            visitor_team_score: 104,
        }
    }

    #[test]
    fn test_last_final_games_sorted_desc() {
        let games = vec![
            game(1, "2024-01-02", "Final"),
            game(2, "2024-01-09", "Final"),
            game(3, "2024-01-11", "7:30 pm ET"),
            game(4, "2024-01-05", "Final"),
            game(5, "2023-12-30", "Final"),
        ];
        let recent = last_final_games(&games, 3);
        assert_eq!(recent.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2, 4, 1]);
        assert_eq!(recent[0].total_points(), 214);
    }
}
