use std::collections::HashMap;

use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;

use crate::domain::{
    decide_assignment, AssignmentDecision, AssignmentOutcome, Member,
    MemberFilter, MemberId, MemberRecord, MemberStore, MemberStoreError,
    Project, ProjectId, ProjectStore, ProjectStoreError, Skill, SkillId,
    SkillStore, SkillStoreError, WorkHours, WorkHoursId, WorkHoursStore,
    WorkHoursStoreError,
};

/// In-memory backend holding all four resources in one place, so deleting a
/// referenced resource can detach it from members in the same write.
#[derive(Default)]
pub struct HashmapResourceStore {
    members: HashMap<MemberId, MemberRecord>,
    projects: HashMap<ProjectId, Project>,
    skills: HashMap<SkillId, Skill>,
    work_hours: HashMap<WorkHoursId, WorkHours>,
}

impl HashmapResourceStore {
    fn check_references(
        &self,
        record: &MemberRecord,
    ) -> Result<(), MemberStoreError> {
        if let Some(id) =
            record.skills.iter().find(|id| !self.skills.contains_key(id))
        {
            return Err(MemberStoreError::SkillIDNotFound(*id));
        }
        if let Some(id) = record.project {
            if !self.projects.contains_key(&id) {
                return Err(MemberStoreError::ProjectIDNotFound(id));
            }
        }
        if let Some(id) = record.work_hours {
            if !self.work_hours.contains_key(&id) {
                return Err(MemberStoreError::WorkHoursIDNotFound(id));
            }
        }
        if let Some(id) = record.manager_id {
            if id != record.id && !self.members.contains_key(&id) {
                return Err(MemberStoreError::MemberIDNotFound(id));
            }
        }
        Ok(())
    }

    fn hydrate(&self, record: &MemberRecord) -> Result<Member, MemberStoreError> {
        let mut skills = record
            .skills
            .iter()
            .map(|id| {
                self.skills.get(id).cloned().ok_or_else(|| {
                    MemberStoreError::UnexpectedError(eyre!(
                        "member {} references missing skill {}",
                        record.id,
                        id
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        skills.sort_by_key(|s| (s.name.as_ref().to_owned(), *s.id.as_ref()));

        let project = record
            .project
            .map(|id| {
                self.projects.get(&id).cloned().ok_or_else(|| {
                    MemberStoreError::UnexpectedError(eyre!(
                        "member {} references missing project {}",
                        record.id,
                        id
                    ))
                })
            })
            .transpose()?;

        let work_hours = record
            .work_hours
            .map(|id| {
                self.work_hours.get(&id).cloned().ok_or_else(|| {
                    MemberStoreError::UnexpectedError(eyre!(
                        "member {} references missing work hours {}",
                        record.id,
                        id
                    ))
                })
            })
            .transpose()?;

        Ok(Member {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            skills,
            project,
            manager_id: record.manager_id,
            work_hours,
            on_holidays_till: record.on_holidays_till,
        })
    }
}

fn member_sort_key(member: &Member) -> (String, String, uuid::Uuid) {
    (
        member.last_name.as_ref().to_owned(),
        member.first_name.as_ref().to_owned(),
        *member.id.as_ref(),
    )
}

#[async_trait::async_trait]
impl MemberStore for HashmapResourceStore {
    async fn add_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError> {
        self.check_references(&member)?;
        let hydrated = self.hydrate(&member)?;
        self.members.insert(member.id, member);
        Ok(hydrated)
    }

    async fn get_member(&self, id: &MemberId) -> Result<Member, MemberStoreError> {
        let record = self
            .members
            .get(id)
            .ok_or(MemberStoreError::MemberIDNotFound(*id))?;
        self.hydrate(record)
    }

    async fn list_members(
        &self,
        filter: &MemberFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members = Vec::new();
        for record in self.members.values() {
            let member = self.hydrate(record)?;
            if filter.matches(&member, now) {
                members.push(member);
            }
        }
        members.sort_by_key(member_sort_key);
        Ok(members)
    }

    async fn update_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError> {
        if !self.members.contains_key(&member.id) {
            return Err(MemberStoreError::MemberIDNotFound(member.id));
        }
        self.check_references(&member)?;
        let hydrated = self.hydrate(&member)?;
        self.members.insert(member.id, member);
        Ok(hydrated)
    }

    async fn delete_member(&mut self, id: &MemberId) -> Result<(), MemberStoreError> {
        self.members
            .remove(id)
            .ok_or(MemberStoreError::MemberIDNotFound(*id))?;
        for record in self.members.values_mut() {
            if record.manager_id.as_ref() == Some(id) {
                record.manager_id = None;
            }
        }
        Ok(())
    }

    async fn assign_to_project(
        &mut self,
        member_id: &MemberId,
        project_id: &ProjectId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentOutcome, MemberStoreError> {
        let record = self
            .members
            .get(member_id)
            .ok_or(MemberStoreError::MemberIDNotFound(*member_id))?;
        if !self.projects.contains_key(project_id) {
            return Err(MemberStoreError::ProjectIDNotFound(*project_id));
        }

        match decide_assignment(record, now) {
            AssignmentDecision::Reject(rejection) => {
                Ok(AssignmentOutcome::Rejected(rejection))
            }
            AssignmentDecision::Assign => {
                let updated = record.clone().with_project(Some(*project_id));
                let hydrated = self.hydrate(&updated)?;
                self.members.insert(updated.id, updated);
                Ok(AssignmentOutcome::Assigned(hydrated))
            }
        }
    }
}

#[async_trait::async_trait]
impl ProjectStore for HashmapResourceStore {
    async fn add_project(&mut self, project: Project) -> Result<(), ProjectStoreError> {
        self.projects.insert(project.id, project);
        Ok(())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectStoreError> {
        self.projects
            .get(id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectIDNotFound)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by_key(|p| (p.name.as_ref().to_owned(), *p.id.as_ref()));
        Ok(projects)
    }

    async fn update_project(&mut self, project: Project) -> Result<(), ProjectStoreError> {
        match self.projects.get_mut(&project.id) {
            Some(existing) => {
                *existing = project;
                Ok(())
            }
            None => Err(ProjectStoreError::ProjectIDNotFound),
        }
    }

    async fn delete_project(&mut self, id: &ProjectId) -> Result<(), ProjectStoreError> {
        self.projects
            .remove(id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;
        for record in self.members.values_mut() {
            if record.project.as_ref() == Some(id) {
                record.project = None;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SkillStore for HashmapResourceStore {
    async fn add_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError> {
        self.skills.insert(skill.id, skill);
        Ok(())
    }

    async fn get_skill(&self, id: &SkillId) -> Result<Skill, SkillStoreError> {
        self.skills
            .get(id)
            .cloned()
            .ok_or(SkillStoreError::SkillIDNotFound)
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, SkillStoreError> {
        let mut skills: Vec<Skill> = self.skills.values().cloned().collect();
        skills.sort_by_key(|s| (s.name.as_ref().to_owned(), *s.id.as_ref()));
        Ok(skills)
    }

    async fn update_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError> {
        match self.skills.get_mut(&skill.id) {
            Some(existing) => {
                *existing = skill;
                Ok(())
            }
            None => Err(SkillStoreError::SkillIDNotFound),
        }
    }

    async fn delete_skill(&mut self, id: &SkillId) -> Result<(), SkillStoreError> {
        self.skills
            .remove(id)
            .ok_or(SkillStoreError::SkillIDNotFound)?;
        for record in self.members.values_mut() {
            record.skills.retain(|skill| skill != id);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkHoursStore for HashmapResourceStore {
    async fn add_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError> {
        self.work_hours.insert(work_hours.id, work_hours);
        Ok(())
    }

    async fn get_work_hours(
        &self,
        id: &WorkHoursId,
    ) -> Result<WorkHours, WorkHoursStoreError> {
        self.work_hours
            .get(id)
            .cloned()
            .ok_or(WorkHoursStoreError::WorkHoursIDNotFound)
    }

    async fn list_work_hours(&self) -> Result<Vec<WorkHours>, WorkHoursStoreError> {
        let mut work_hours: Vec<WorkHours> =
            self.work_hours.values().cloned().collect();
        work_hours.sort_by_key(|w| (w.start, w.end, *w.id.as_ref()));
        Ok(work_hours)
    }

    async fn update_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError> {
        match self.work_hours.get_mut(&work_hours.id) {
            Some(existing) => {
                *existing = work_hours;
                Ok(())
            }
            None => Err(WorkHoursStoreError::WorkHoursIDNotFound),
        }
    }

    async fn delete_work_hours(
        &mut self,
        id: &WorkHoursId,
    ) -> Result<(), WorkHoursStoreError> {
        self.work_hours
            .remove(id)
            .ok_or(WorkHoursStoreError::WorkHoursIDNotFound)?;
        for record in self.members.values_mut() {
            if record.work_hours.as_ref() == Some(id) {
                record.work_hours = None;
            }
        }
        Ok(())
    }
}
