use super::{
    AssignmentOutcome, Member, MemberFilter, MemberId, MemberRecord, Project,
    ProjectId, Skill, SkillId, WorkHours, WorkHoursId,
};
use chrono::{DateTime, Utc};
use color_eyre::eyre::Report;
use thiserror::Error;

/// Members and their relations.
///
/// Every write checks that the referenced skills, project, work hours and
/// manager exist. `assign_to_project` reads, gates and writes as one atomic
/// step.
#[async_trait::async_trait]
pub trait MemberStore {
    async fn add_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member(&self, id: &MemberId) -> Result<Member, MemberStoreError>;
    async fn list_members(
        &self,
        filter: &MemberFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Member>, MemberStoreError>;
    async fn update_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError>;
    /// Members managed by the deleted member lose their manager.
    async fn delete_member(&mut self, id: &MemberId) -> Result<(), MemberStoreError>;
    async fn assign_to_project(
        &mut self,
        member_id: &MemberId,
        project_id: &ProjectId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentOutcome, MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Member not found: {0}")]
    MemberIDNotFound(MemberId),
    #[error("Project not found: {0}")]
    ProjectIDNotFound(ProjectId),
    #[error("Skill not found: {0}")]
    SkillIDNotFound(SkillId),
    #[error("Work hours not found: {0}")]
    WorkHoursIDNotFound(WorkHoursId),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MemberIDNotFound(a), Self::MemberIDNotFound(b)) => a == b,
            (Self::ProjectIDNotFound(a), Self::ProjectIDNotFound(b)) => a == b,
            (Self::SkillIDNotFound(a), Self::SkillIDNotFound(b)) => a == b,
            (Self::WorkHoursIDNotFound(a), Self::WorkHoursIDNotFound(b)) => {
                a == b
            }
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(&mut self, project: Project) -> Result<(), ProjectStoreError>;
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectStoreError>;
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectStoreError>;
    async fn update_project(&mut self, project: Project) -> Result<(), ProjectStoreError>;
    /// Members assigned to the project become unassigned.
    async fn delete_project(&mut self, id: &ProjectId) -> Result<(), ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found")]
    ProjectIDNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectIDNotFound, Self::ProjectIDNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait SkillStore {
    async fn add_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError>;
    async fn get_skill(&self, id: &SkillId) -> Result<Skill, SkillStoreError>;
    async fn list_skills(&self) -> Result<Vec<Skill>, SkillStoreError>;
    async fn update_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError>;
    /// The skill is also removed from every member holding it.
    async fn delete_skill(&mut self, id: &SkillId) -> Result<(), SkillStoreError>;
}

#[derive(Debug, Error)]
pub enum SkillStoreError {
    #[error("Skill not found")]
    SkillIDNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for SkillStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::SkillIDNotFound, Self::SkillIDNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait WorkHoursStore {
    async fn add_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError>;
    async fn get_work_hours(
        &self,
        id: &WorkHoursId,
    ) -> Result<WorkHours, WorkHoursStoreError>;
    async fn list_work_hours(&self) -> Result<Vec<WorkHours>, WorkHoursStoreError>;
    async fn update_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError>;
    /// Members referencing the work hours keep existing without them.
    async fn delete_work_hours(
        &mut self,
        id: &WorkHoursId,
    ) -> Result<(), WorkHoursStoreError>;
}

#[derive(Debug, Error)]
pub enum WorkHoursStoreError {
    #[error("Work hours not found")]
    WorkHoursIDNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for WorkHoursStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::WorkHoursIDNotFound, Self::WorkHoursIDNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
