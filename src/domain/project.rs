use super::{ProjectId, ProjectName};

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: ProjectName,
}

impl Project {
    pub fn new(name: ProjectName) -> Self {
        Self {
            id: ProjectId::default(),
            name,
        }
    }
}
