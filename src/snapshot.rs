use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TeamSettings;
use crate::model::group::Team;
use crate::store::{self, StoreError};

pub const SNAPSHOT_KIND: &str = "team_builder";

/// A chosen allocation kept for a later display mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub settings: TeamSettings,
    pub teams: Vec<Team>,
}

impl Snapshot {
    pub fn new(teams: Vec<Team>, settings: TeamSettings) -> Snapshot {
        Snapshot {
            kind: SNAPSHOT_KIND.to_string(),
            created_at: Utc::now(),
            settings,
            teams,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        store::write_json(path, self)
    }

    pub fn load(path: &Path) -> Result<Snapshot, StoreError> {
        let snapshot: Snapshot = store::read_json(path)?;
        if snapshot.kind != SNAPSHOT_KIND {
            return Err(StoreError::UnexpectedKind(snapshot.kind));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::Allocator;
    use crate::model::condition::Policy;
    use crate::model::entity::{Gender, Participant, SkillTier};

    #[test]
    fn snapshot_survives_a_file_round_trip() {
        let participants = vec![
            Participant::new("1", "Ana", Gender::Female, SkillTier::Fit),
            Participant::new("2", "Ben", Gender::Male, SkillTier::Intermediate),
            Participant::new("3", "Cid", Gender::Male, SkillTier::VeryFit),
        ];
        let teams = Allocator::seeded(11)
            .allocate(&participants, 2, Policy::Balanced)
            .unwrap();
        let snapshot = Snapshot::new(teams, TeamSettings::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.kind, SNAPSHOT_KIND);
    }

    #[test]
    fn foreign_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let mut snapshot = Snapshot::new(Vec::new(), TeamSettings::default());
        snapshot.kind = "workout".to_string();
        snapshot.save(&path).unwrap();

        assert!(matches!(
            Snapshot::load(&path),
            Err(StoreError::UnexpectedKind(kind)) if kind == "workout"
        ));
    }
}
