use std::collections::BTreeMap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::model::entity::{Gender, Participant, SkillTier};

/// Occurrence count per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally<K: Ord>(BTreeMap<K, usize>);

impl<K: Ord> Default for Tally<K> {
    fn default() -> Self {
        Tally(BTreeMap::new())
    }
}

impl<K: Ord> Tally<K> {
    pub fn increment(&mut self, key: K) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &K) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl<K: Ord> Add for Tally<K> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut counter = self.0;
        for (key, count) in rhs.0 {
            *counter.entry(key).or_insert(0) += count;
        }
        Tally(counter)
    }
}

/// Per-team breakdown shown next to each roster. Never consulted during allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    pub genders: Tally<Gender>,
    pub tiers: Tally<SkillTier>,
}

impl TeamCounts {
    pub fn record(&mut self, participant: &Participant) {
        self.genders.increment(participant.gender);
        self.tiers.increment(participant.tier);
    }

    pub fn of<'a>(participants: impl IntoIterator<Item = &'a Participant>) -> TeamCounts {
        let mut counts = TeamCounts::default();
        participants.into_iter().for_each(|p| counts.record(p));
        counts
    }

    pub fn males(&self) -> usize {
        self.genders.get(&Gender::Male)
    }

    pub fn females(&self) -> usize {
        self.genders.get(&Gender::Female)
    }
}

impl Add for TeamCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        TeamCounts {
            genders: self.genders + rhs.genders,
            tiers: self.tiers + rhs.tiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_repeated_keys() {
        let mut tally = Tally::default();
        for tier in [SkillTier::Fit, SkillTier::Beginner, SkillTier::Fit] {
            tally.increment(tier);
        }

        assert_eq!(tally.get(&SkillTier::Fit), 2);
        assert_eq!(tally.get(&SkillTier::Beginner), 1);
        assert_eq!(tally.get(&SkillTier::VeryFit), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn counts_add_merges_both_sides() {
        let left = TeamCounts::of(&[
            Participant::new("1", "Ana", Gender::Female, SkillTier::Fit),
            Participant::new("2", "Ben", Gender::Male, SkillTier::Fit),
        ]);
        let right = TeamCounts::of(&[Participant::new("3", "Cid", Gender::Male, SkillTier::VeryFit)]);

        let merged = left + right;

        assert_eq!(merged.males(), 2);
        assert_eq!(merged.females(), 1);
        assert_eq!(merged.tiers.get(&SkillTier::Fit), 2);
        assert_eq!(merged.tiers.get(&SkillTier::VeryFit), 1);
    }

    #[test]
    fn counts_serialize_as_plain_maps() {
        let counts = TeamCounts::of(&[Participant::new("1", "Ana", Gender::Female, SkillTier::VeryFit)]);
        let json = serde_json::to_value(&counts).unwrap();

        assert_eq!(json["genders"]["female"], 1);
        assert_eq!(json["tiers"]["very_fit"], 1);
    }
}
