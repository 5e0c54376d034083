use serde::{Deserialize, Serialize};

use crate::error::domain_error::DomainError;

pub const UNASSIGNED_TEAM: u32 = 0;

const MINIMUM_NAME_LENGTH: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub points: i64,
    pub team: u32,
}

impl Player {
    pub fn new(id: u32, name: &str) -> Result<Self, DomainError> {
        validate_name(name)?;
        Ok(Player {
            id,
            name: name.trim().to_string(),
            points: 0,
            team: UNASSIGNED_TEAM,
        })
    }

    pub fn is_on_team(&self, team: u32) -> bool {
        self.team == team
    }
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().len() < MINIMUM_NAME_LENGTH {
        return Err(DomainError::PlayerNameTooShort {
            name: name.to_string(),
            minimum: MINIMUM_NAME_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_team(team: u32, number_of_teams: u32) -> Result<(), DomainError> {
    if team < 1 || team > number_of_teams {
        return Err(DomainError::TeamOutOfRange {
            team,
            number_of_teams,
        });
    }
    Ok(())
}
