use thiserror::Error;

use crate::game::round_fsm::RoundFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The number of teams must be at least 1. NumberOfTeams: '{0}'.")]
    InvalidNumberOfTeams(u32),
    #[error("Invalid stage for starting a round. ActualStage: '{0:?}', ExpectedStage: '{1:?}'.")]
    InvalidStageForStartingRound(RoundFsmState, RoundFsmState),
    #[error("Each team must have at least 2 players. Team: '{team}', ActualPlayers: '{actual}', MinimumPlayers: '{minimum}'.")]
    NotEnoughPlayersInTeam {
        team: u32,
        actual: usize,
        minimum: usize,
    },
    #[error("Player name must be at least {minimum} characters long. Name: '{name}'.")]
    PlayerNameTooShort { name: String, minimum: usize },
    #[error("Team number must be between 1 and {number_of_teams}. Team: '{team}'.")]
    TeamOutOfRange { team: u32, number_of_teams: u32 },
}
