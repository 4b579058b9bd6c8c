mod assign_to_project;
mod delete_member;
mod get_member;
mod list_members;
mod new_member;
mod update_member;

pub use assign_to_project::*;
pub use delete_member::delete_member;
pub use get_member::get_member;
pub use list_members::*;
pub use new_member::new_member;
pub use update_member::update_member;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    projects::ProjectResponse, skills::SkillResponse,
    work_hours::WorkHoursResponse,
};
use crate::domain::{
    Member, MemberId, MemberName, MemberRecord, ProjectId, SkillId,
    ValidationError, WorkHoursId,
};

/// Body of `POST /members` and `PUT /members/{id}`. Missing names are
/// reported as validation errors rather than deserialization failures.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub skills: Vec<uuid::Uuid>,
    pub project: Option<uuid::Uuid>,
    pub manager_id: Option<uuid::Uuid>,
    pub workhours: Option<uuid::Uuid>,
    pub on_holidays_till: Option<NaiveDate>,
}

impl MemberRequest {
    pub fn into_record(self, id: MemberId) -> Result<MemberRecord, ValidationError> {
        let first_name = MemberName::parse("first_name", &self.first_name)?;
        let last_name = MemberName::parse("last_name", &self.last_name)?;

        let mut record = MemberRecord::new(first_name, last_name)
            .with_skills(self.skills.into_iter().map(SkillId::new).collect())
            .with_project(self.project.map(ProjectId::new))
            .with_manager(self.manager_id.map(MemberId::new))
            .with_work_hours(self.workhours.map(WorkHoursId::new))
            .with_holidays_till(self.on_holidays_till);
        record.id = id;
        record.validate()?;
        Ok(record)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: uuid::Uuid,
    pub first_name: String,
    pub last_name: String,
    pub skills: Vec<SkillResponse>,
    pub project: Option<ProjectResponse>,
    pub manager_id: Option<uuid::Uuid>,
    pub workhours: Option<WorkHoursResponse>,
    pub on_holidays_till: Option<NaiveDate>,
    pub available: bool,
}

impl MemberResponse {
    pub fn new(member: &Member, now: DateTime<Utc>) -> Self {
        Self {
            id: *member.id.as_ref(),
            first_name: member.first_name.as_ref().to_owned(),
            last_name: member.last_name.as_ref().to_owned(),
            skills: member.skills.iter().map(SkillResponse::from).collect(),
            project: member.project.as_ref().map(ProjectResponse::from),
            manager_id: member.manager_id.map(|id| *id.as_ref()),
            workhours: member.work_hours.as_ref().map(WorkHoursResponse::from),
            on_holidays_till: member.on_holidays_till,
            available: member.is_available(now),
        }
    }
}
