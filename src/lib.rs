//! Splits a roster of scored participants into teams, either grouped by
//! similar skill or balanced on total skill.

pub mod action;
pub mod allocate;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod roster;
pub mod sizing;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod tally;

pub use allocate::{allocate, regenerate, Allocator};
pub use error::AllocationError;
pub use model::condition::{Policy, Score};
pub use model::entity::{Gender, Participant, ParticipantRecord, SkillTier};
pub use model::group::{Team, TeamMember};
