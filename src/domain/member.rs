use chrono::{DateTime, NaiveDate, Utc};

use super::{
    is_available, is_on_holiday, MemberId, MemberName, Project, ProjectId,
    Skill, SkillId, SkillName, ValidationError, WorkHours, WorkHoursId,
};

/// A member with every reference resolved, as returned by the stores.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: MemberName,
    pub last_name: MemberName,
    pub skills: Vec<Skill>,
    pub project: Option<Project>,
    pub manager_id: Option<MemberId>,
    pub work_hours: Option<WorkHours>,
    pub on_holidays_till: Option<NaiveDate>,
}

impl Member {
    pub fn is_on_holiday(&self, now: DateTime<Utc>) -> bool {
        is_on_holiday(now.date_naive(), self.on_holidays_till)
    }

    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        is_available(now.date_naive(), self.on_holidays_till)
    }

    /// The date the member is back from holiday, if they are away at `now`.
    pub fn available_from(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        self.on_holidays_till.filter(|_| self.is_on_holiday(now))
    }

    /// `None` when the member has no work hours: such a member is neither
    /// working nor off work.
    pub fn is_working(&self, now: DateTime<Utc>) -> Option<bool> {
        self.work_hours.as_ref().map(|hours| hours.is_working(now))
    }

    pub fn has_any_skill(&self, names: &[SkillName]) -> bool {
        self.skills.iter().any(|skill| names.contains(&skill.name))
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project.as_ref().map(|project| project.id)
    }
}

/// The persisted shape of a member: references are stored as ids.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
    pub id: MemberId,
    pub first_name: MemberName,
    pub last_name: MemberName,
    pub skills: Vec<SkillId>,
    pub project: Option<ProjectId>,
    pub manager_id: Option<MemberId>,
    pub work_hours: Option<WorkHoursId>,
    pub on_holidays_till: Option<NaiveDate>,
}

impl MemberRecord {
    pub fn new(first_name: MemberName, last_name: MemberName) -> Self {
        Self {
            id: MemberId::default(),
            first_name,
            last_name,
            skills: Vec::new(),
            project: None,
            manager_id: None,
            work_hours: None,
            on_holidays_till: None,
        }
    }

    pub fn with_skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills = Vec::with_capacity(skills.len());
        for skill in skills {
            if !self.skills.contains(&skill) {
                self.skills.push(skill);
            }
        }
        self
    }

    pub fn with_project(mut self, project: Option<ProjectId>) -> Self {
        self.project = project;
        self
    }

    pub fn with_manager(mut self, manager_id: Option<MemberId>) -> Self {
        self.manager_id = manager_id;
        self
    }

    pub fn with_work_hours(mut self, work_hours: Option<WorkHoursId>) -> Self {
        self.work_hours = work_hours;
        self
    }

    pub fn with_holidays_till(mut self, until: Option<NaiveDate>) -> Self {
        self.on_holidays_till = until;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.manager_id == Some(self.id) {
            return Err(ValidationError::new(
                "A member cannot be their own manager".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            skills: member.skills.iter().map(|skill| skill.id).collect(),
            project: member.project_id(),
            manager_id: member.manager_id,
            work_hours: member.work_hours.as_ref().map(|hours| hours.id),
            on_holidays_till: member.on_holidays_till,
        }
    }
}
