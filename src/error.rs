use thiserror::Error;

use crate::action::ActionError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AllocationError {
    /// The roster or the requested team count cannot be allocated as given.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Placement failed: {0}")]
    Placement(#[from] ActionError),
}

impl AllocationError {
    pub(crate) fn invalid(message: impl Into<String>) -> AllocationError {
        AllocationError::InvalidInput(message.into())
    }
}
