use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AllocationError;
use crate::model::condition::Policy;
use crate::sizing::TeamCount;
use crate::store::{self, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMode {
    #[default]
    Teams,
    Size,
}

/// Saved team builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    pub mode: TeamMode,
    pub number_of_teams: usize,
    pub team_size: usize,
    pub policy: Policy,
}

impl Default for TeamSettings {
    fn default() -> Self {
        TeamSettings {
            mode: TeamMode::Teams,
            number_of_teams: 2,
            team_size: 4,
            policy: Policy::Tiered,
        }
    }
}

impl TeamSettings {
    pub fn team_count(&self) -> TeamCount {
        match self.mode {
            TeamMode::Teams => TeamCount::Teams(self.number_of_teams),
            TeamMode::Size => TeamCount::Size(self.team_size),
        }
    }

    /// Rejects a team count or team size of zero, whichever mode is active.
    pub fn validate(&self) -> Result<(), AllocationError> {
        TeamCount::Teams(self.number_of_teams).resolve(1)?;
        TeamCount::Size(self.team_size).resolve(1)?;
        Ok(())
    }

    /// Loads settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "no saved settings, using defaults");
            return Ok(TeamSettings::default());
        }
        store::read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        store::write_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = TeamSettings::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(settings, TeamSettings::default());
        assert_eq!(settings.team_count(), TeamCount::Teams(2));
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = TeamSettings {
            mode: TeamMode::Size,
            number_of_teams: 3,
            team_size: 5,
            policy: Policy::Balanced,
        };

        settings.save(&path).unwrap();
        let loaded = TeamSettings::load(&path).unwrap();

        assert_eq!(loaded, settings);
        assert_eq!(loaded.team_count(), TeamCount::Size(5));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"policy": "balanced"}"#).unwrap();

        let loaded = TeamSettings::load(&path).unwrap();

        assert_eq!(loaded.policy, Policy::Balanced);
        assert_eq!(loaded.number_of_teams, 2);
        assert_eq!(loaded.mode, TeamMode::Teams);
    }

    #[test]
    fn zero_count_or_size_is_invalid() {
        let no_teams = TeamSettings {
            number_of_teams: 0,
            ..TeamSettings::default()
        };
        let no_size = TeamSettings {
            mode: TeamMode::Size,
            team_size: 0,
            ..TeamSettings::default()
        };

        assert!(TeamSettings::default().validate().is_ok());
        assert!(matches!(no_teams.validate(), Err(AllocationError::InvalidInput(_))));
        assert!(matches!(no_size.validate(), Err(AllocationError::InvalidInput(_))));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(TeamSettings::load(&path), Err(StoreError::Json { .. })));
    }
}
