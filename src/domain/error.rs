use color_eyre::eyre::{eyre, Report};
use thiserror::Error;

use super::MemberStoreError;

#[derive(Debug, Error)]
pub enum ResourceAPIError {
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(uuid::Uuid),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

impl From<MemberStoreError> for ResourceAPIError {
    fn from(error: MemberStoreError) -> Self {
        match error {
            MemberStoreError::MemberIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            MemberStoreError::ProjectIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            MemberStoreError::SkillIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            MemberStoreError::WorkHoursIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            e @ MemberStoreError::UnexpectedError(_) => {
                Self::UnexpectedError(eyre!(e))
            }
        }
    }
}
