use super::ValidationError;
use serde::{Deserialize, Serialize};

const MAX_PROJECT_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            0 => Err(ValidationError::new(
                "Project name cannot be empty".to_string(),
            )),
            x if x > MAX_PROJECT_NAME_LENGTH => Err(ValidationError::new(
                format!("Max name length is {MAX_PROJECT_NAME_LENGTH} characters"),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<String> for ProjectName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_project_names() {
    let valid_names = ["a".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed = ProjectName::parse(valid_name)
            .expect("Failed to parse valid project name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_blank_project_names() {
    for blank in ["", " \t "] {
        let result = ProjectName::parse(blank);
        assert_eq!(result.unwrap_err().as_ref(), "Project name cannot be empty");
    }
}

#[test]
fn test_long_project_names() {
    let result = ProjectName::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 255 characters"
    );
}
