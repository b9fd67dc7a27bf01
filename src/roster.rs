//! Roster boundary: upstream records become typed participants here, before
//! anything reaches the allocator.

use std::path::Path;

use tracing::warn;

use crate::error::AllocationError;
use crate::model::entity::{Participant, ParticipantRecord};
use crate::store::{self, StoreError};

impl TryFrom<ParticipantRecord> for Participant {
    type Error = AllocationError;

    fn try_from(record: ParticipantRecord) -> Result<Self, Self::Error> {
        let missing = match (record.gender, record.tier) {
            (Some(gender), Some(tier)) => {
                return Ok(Participant {
                    id: record.id,
                    display_name: record.display_name,
                    gender,
                    tier,
                })
            }
            (None, Some(_)) => "gender",
            (Some(_), None) => "skill tier",
            (None, None) => "gender and skill tier",
        };
        warn!(id = %record.id, missing, "incomplete participant record");
        Err(AllocationError::invalid(format!(
            "participant '{}' has no {missing}",
            record.id
        )))
    }
}

/// Converts every record or fails on the first incomplete one.
pub fn validate(records: Vec<ParticipantRecord>) -> Result<Vec<Participant>, AllocationError> {
    records.into_iter().map(Participant::try_from).collect()
}

/// Reads a JSON array of participant records.
pub fn load(path: &Path) -> Result<Vec<ParticipantRecord>, StoreError> {
    store::read_json(path)
}
