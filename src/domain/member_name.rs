use super::ValidationError;
use serde::{Deserialize, Serialize};

const MAX_NAME_LENGTH: usize = 50;

/// A first or last name. Surrounding whitespace is discarded before the
/// length check, so a name made only of spaces is rejected as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    pub fn parse(field: &str, name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        match trimmed.chars().count() {
            0 => Err(ValidationError::new(format!("{field} cannot be empty"))),
            x if x > MAX_NAME_LENGTH => Err(ValidationError::new(format!(
                "Max {field} length is {MAX_NAME_LENGTH} characters"
            ))),
            _ => Ok(Self(trimmed.to_owned())),
        }
    }
}

impl AsRef<String> for MemberName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
