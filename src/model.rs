pub mod entity {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    pub type Id = String;

    /// Participant category. Male is category A, female is category B.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Gender {
        Male,
        Female,
    }

    /// Skill level, lowest first.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SkillTier {
        Beginner,
        Intermediate,
        Fit,
        VeryFit,
    }

    impl SkillTier {
        pub const ALL: [SkillTier; 4] = [
            SkillTier::Beginner,
            SkillTier::Intermediate,
            SkillTier::Fit,
            SkillTier::VeryFit,
        ];
    }

    impl fmt::Display for Gender {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Gender::Male => write!(f, "male"),
                Gender::Female => write!(f, "female"),
            }
        }
    }

    impl fmt::Display for SkillTier {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                SkillTier::Beginner => write!(f, "beginner"),
                SkillTier::Intermediate => write!(f, "intermediate"),
                SkillTier::Fit => write!(f, "fit"),
                SkillTier::VeryFit => write!(f, "very fit"),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Participant {
        pub id: Id,
        pub display_name: String,
        pub gender: Gender,
        pub tier: SkillTier,
    }

    impl Participant {
        pub fn new(
            id: impl Into<Id>,
            display_name: impl Into<String>,
            gender: Gender,
            tier: SkillTier,
        ) -> Participant {
            Participant {
                id: id.into(),
                display_name: display_name.into(),
                gender,
                tier,
            }
        }
    }

    /// Roster entry as supplied upstream, before gender and tier are known to be set.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ParticipantRecord {
        pub id: Id,
        #[serde(default)]
        pub display_name: String,
        #[serde(default)]
        pub gender: Option<Gender>,
        #[serde(default)]
        pub tier: Option<SkillTier>,
    }
}

pub mod group {
    use serde::{Deserialize, Serialize};

    use super::condition::Score;
    use super::entity::{Id, Participant};
    use crate::action::Index;
    use crate::tally::TeamCounts;

    /// A participant together with the score computed for the current run.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TeamMember {
        pub participant: Participant,
        pub score: Score,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Team {
        pub id: usize,
        pub members: Vec<TeamMember>,
        pub total_score: Score,
        pub counts: TeamCounts,
    }

    impl Team {
        pub fn new(id: usize) -> Team {
            Team {
                id,
                members: Vec::new(),
                total_score: 0,
                counts: TeamCounts::default(),
            }
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }

        pub fn average_score(&self) -> f64 {
            if self.members.is_empty() {
                0.0
            } else {
                f64::from(self.total_score) / self.members.len() as f64
            }
        }

        pub fn ids(&self) -> impl Iterator<Item = &Id> {
            self.members.iter().map(|member| &member.participant.id)
        }

        pub(crate) fn add(&mut self, member: TeamMember) {
            self.total_score += member.score;
            self.counts.record(&member.participant);
            self.members.push(member);
        }
    }

    /// Working set of teams for one allocation run.
    pub struct Table {
        pub teams: Vec<Team>,
    }

    impl Table {
        pub fn new(n_teams: usize) -> Table {
            Table {
                teams: (1..=n_teams).map(Team::new).collect(),
            }
        }

        /// Team with the lowest total score, earliest team on ties.
        pub fn least_loaded(&self) -> Option<Index> {
            self.teams
                .iter()
                .enumerate()
                .min_by_key(|(_, team)| team.total_score)
                .map(|(index, _)| index)
        }

        /// Team with the fewest members, earliest team on ties.
        pub fn least_filled(&self) -> Option<Index> {
            self.teams
                .iter()
                .enumerate()
                .min_by_key(|(_, team)| team.len())
                .map(|(index, _)| index)
        }

        pub fn into_teams(self) -> Vec<Team> {
            self.teams
        }
    }
}

pub mod condition {
    use std::fmt;
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use super::entity::{Gender, Participant, SkillTier};
    use crate::error::AllocationError;

    pub type Score = u32;

    /// How participants are spread across teams.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Policy {
        /// Similar scores grouped together: strongest team first.
        #[default]
        Tiered,
        /// Team totals as equal as the greedy assignment allows.
        Balanced,
    }

    impl fmt::Display for Policy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Policy::Tiered => write!(f, "tiered"),
                Policy::Balanced => write!(f, "balanced"),
            }
        }
    }

    impl FromStr for Policy {
        type Err = AllocationError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "tiered" => Ok(Policy::Tiered),
                "balanced" => Ok(Policy::Balanced),
                other => Err(AllocationError::InvalidInput(format!(
                    "unknown policy '{other}', expected 'tiered' or 'balanced'"
                ))),
            }
        }
    }

    pub fn tier_points(tier: SkillTier) -> Score {
        match tier {
            SkillTier::Beginner => 1,
            SkillTier::Intermediate => 2,
            SkillTier::Fit => 3,
            SkillTier::VeryFit => 4,
        }
    }

    pub fn category_points(gender: Gender) -> Score {
        match gender {
            Gender::Male => 2,
            Gender::Female => 1,
        }
    }

    pub fn score(participant: &Participant) -> Score {
        tier_points(participant.tier) + category_points(participant.gender)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
