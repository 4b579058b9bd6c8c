use super::{SkillId, ValidationError};
use serde::{Deserialize, Serialize};

const MAX_SKILL_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: SkillId,
    pub name: SkillName,
}

impl Skill {
    pub fn new(name: SkillName) -> Self {
        Self {
            id: SkillId::default(),
            name,
        }
    }
}

/// Skill names are matched verbatim by the member filter, so no case
/// folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::new(
                "Skill name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SKILL_NAME_LENGTH {
            return Err(ValidationError::new(format!(
                "Max skill name length is {MAX_SKILL_NAME_LENGTH} characters"
            )));
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<String> for SkillName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
