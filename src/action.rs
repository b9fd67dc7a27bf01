use thiserror::Error;

use crate::model::condition::Score;
use crate::model::group::{Table, TeamMember};

pub type Index = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Assign { member: TeamMember, team_index: Index },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid team index {0}")]
    InvalidTeam(Index),
    #[error("No team to place into")]
    EmptyTable,
}

impl Table {
    /// Applies `action` and returns the receiving team's new total.
    pub fn act(&mut self, action: Action) -> Result<Score, ActionError> {
        match action {
            Action::Assign { member, team_index } => {
                let team = self
                    .teams
                    .get_mut(team_index)
                    .ok_or(ActionError::InvalidTeam(team_index))?;
                team.add(member);
                Ok(team.total_score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::condition;
    use crate::model::entity::{Gender, Participant, SkillTier};

    fn member(id: &str) -> TeamMember {
        let participant = Participant::new(id, id, Gender::Female, SkillTier::Fit);
        let score = condition::score(&participant);
        TeamMember { participant, score }
    }

    #[test]
    fn assign_updates_total_and_counts() {
        let mut table = Table::new(2);
        let total = table
            .act(Action::Assign { member: member("a"), team_index: 1 })
            .unwrap();

        assert_eq!(total, 4);
        assert!(table.teams[0].is_empty());
        assert_eq!(table.teams[1].len(), 1);
        assert_eq!(table.teams[1].counts.genders.get(&Gender::Female), 1);
    }

    #[test]
    fn assign_to_missing_team_fails() {
        let mut table = Table::new(2);
        let result = table.act(Action::Assign { member: member("a"), team_index: 2 });

        assert_eq!(result, Err(ActionError::InvalidTeam(2)));
        assert!(table.teams.iter().all(|team| team.is_empty()));
    }
}
