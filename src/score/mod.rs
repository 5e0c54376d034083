use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::player::Player;

const MINIMUM_PLAYERS_PER_TEAM: usize = 2;

/// Derived, never persisted. One entry per team, in ascending team order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamScore {
    pub team_number: u32,
    pub total_points: i64,
}

/// Sums player points per team. The result always has exactly
/// `number_of_teams` entries, teams without players total zero. Players with
/// a team outside `[1, number_of_teams]` are excluded, that is not an error.
pub fn calculate_team_scores(players: &[Player], number_of_teams: u32) -> Vec<TeamScore> {
    let mut team_scores: Vec<TeamScore> = (1..=number_of_teams)
        .map(|team_number| TeamScore {
            team_number,
            total_points: 0,
        })
        .collect();

    for player in players {
        if player.team >= 1 && player.team <= number_of_teams {
            team_scores[(player.team - 1) as usize].total_points += player.points;
        }
    }

    team_scores
}

/// Gate before a round may start: every team in range needs at least 2
/// assigned players. Does not mutate anything.
pub fn validate_team_assignment(
    players: &[Player],
    number_of_teams: u32,
) -> Result<(), DomainError> {
    if number_of_teams < 1 {
        return Err(DomainError::InvalidNumberOfTeams(number_of_teams));
    }

    for team in 1..=number_of_teams {
        let assigned = players.iter().filter(|player| player.is_on_team(team)).count();
        if assigned < MINIMUM_PLAYERS_PER_TEAM {
            return Err(DomainError::NotEnoughPlayersInTeam {
                team,
                actual: assigned,
                minimum: MINIMUM_PLAYERS_PER_TEAM,
            });
        }
    }

    Ok(())
}
