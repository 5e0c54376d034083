use crate::error::domain_error::DomainError;
use crate::error::Error;

/// Cyclic turn assignment: team `current` hands over to `(current % n) + 1`.
/// A single team always keeps the turn. Fails fast on a team count below 1,
/// that is a setup bug rather than user input.
pub fn next_team(current: u32, number_of_teams: u32) -> Result<u32, Error> {
    if number_of_teams < 1 {
        return Err(Error::Domain(DomainError::InvalidNumberOfTeams(
            number_of_teams,
        )));
    }
    Ok(current % number_of_teams + 1)
}

#[cfg(test)]
mod tests {
    use super::next_team;
    use crate::error::{domain_error::DomainError, Error};

    #[test]
    fn rotation_cycles_through_all_teams() {
        assert_eq!(next_team(1, 3), Ok(2));
        assert_eq!(next_team(2, 3), Ok(3));
        assert_eq!(next_team(3, 3), Ok(1));
    }

    #[test]
    fn single_team_always_keeps_the_turn() {
        assert_eq!(next_team(1, 1), Ok(1));
    }

    #[test]
    fn rotation_has_period_equal_to_the_number_of_teams() {
        for number_of_teams in 1..=6 {
            for start in 1..=number_of_teams {
                let mut current = start;
                for step in 1..=number_of_teams {
                    current = next_team(current, number_of_teams).unwrap();
                    assert!((1..=number_of_teams).contains(&current));
                    if step < number_of_teams {
                        assert_ne!(current, start);
                    }
                }
                assert_eq!(current, start);
            }
        }
    }

    #[test]
    fn zero_teams_is_an_invalid_configuration() {
        assert_eq!(
            next_team(1, 0),
            Err(Error::Domain(DomainError::InvalidNumberOfTeams(0)))
        );
    }
}
