use chrono::{DateTime, Utc};

use super::{Member, ProjectId, SkillName, ValidationError};

/// Conjunction of optional member predicates. An unset field imposes no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilter {
    pub skills: Option<Vec<SkillName>>,
    pub project: Option<ProjectId>,
    pub holidays: Option<bool>,
    pub is_working: Option<bool>,
}

impl MemberFilter {
    /// Parses a comma separated skill list. Blank entries are dropped and an
    /// empty list yields `None`.
    pub fn parse_skills(
        raw: Option<&str>,
    ) -> Result<Option<Vec<SkillName>>, ValidationError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let skills = raw
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(SkillName::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((!skills.is_empty()).then_some(skills))
    }

    pub fn skill_names(&self) -> Option<Vec<String>> {
        self.skills.as_ref().map(|skills| {
            skills.iter().map(|name| name.as_ref().to_owned()).collect()
        })
    }

    pub fn matches(&self, member: &Member, now: DateTime<Utc>) -> bool {
        if let Some(skills) = &self.skills {
            if !member.has_any_skill(skills) {
                return false;
            }
        }
        if let Some(project) = &self.project {
            if member.project_id().as_ref() != Some(project) {
                return false;
            }
        }
        if let Some(holidays) = self.holidays {
            if member.is_on_holiday(now) != holidays {
                return false;
            }
        }
        if let Some(is_working) = self.is_working {
            if member.is_working(now) != Some(is_working) {
                return false;
            }
        }
        true
    }
}
