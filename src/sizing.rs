use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// How the number of teams is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamCount {
    /// A fixed number of teams.
    Teams(usize),
    /// Teams of roughly this many members: `ceil(participants / size)` teams.
    Size(usize),
}

impl TeamCount {
    pub fn resolve(self, participant_count: usize) -> Result<usize, AllocationError> {
        match self {
            TeamCount::Teams(0) => Err(AllocationError::invalid("number of teams must be at least 1")),
            TeamCount::Teams(n) => Ok(n),
            TeamCount::Size(0) => Err(AllocationError::invalid("team size must be at least 1")),
            TeamCount::Size(size) => Ok(participant_count.div_ceil(size)),
        }
    }
}
