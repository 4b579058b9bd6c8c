use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use color_eyre::eyre::eyre;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::{
    decide_assignment, parse_timezone, AssignmentDecision, AssignmentOutcome,
    Member, MemberFilter, MemberId, MemberName, MemberRecord, MemberStore,
    MemberStoreError, Project, ProjectId, ProjectName, Skill, SkillId,
    SkillName, ValidationError, WorkHours, WorkHoursId,
};

const SELECT_MEMBERS: &str = r#"
    SELECT m.id, m.first_name, m.last_name, m.manager_id, m.on_holidays_till,
           p.id AS project_id, p.name AS project_name,
           w.id AS work_hours_id, w.start_time, w.end_time, w.timezone
    FROM members m
    LEFT JOIN projects p ON p.id = m.project_id
    LEFT JOIN work_hours w ON w.id = m.work_hours_id
"#;

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    manager_id: Option<Uuid>,
    on_holidays_till: Option<NaiveDate>,
    project_id: Option<Uuid>,
    project_name: Option<String>,
    work_hours_id: Option<Uuid>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    timezone: Option<String>,
}

#[derive(sqlx::FromRow)]
struct MemberSkillRow {
    member_id: Uuid,
    skill_id: Uuid,
    name: String,
}

fn unexpected(e: sqlx::Error) -> MemberStoreError {
    MemberStoreError::UnexpectedError(e.into())
}

impl MemberRow {
    fn into_member(self, skills: Vec<Skill>) -> Result<Member, MemberStoreError> {
        let corrupt = |e: ValidationError| MemberStoreError::UnexpectedError(eyre!(e));

        let project = match (self.project_id, self.project_name) {
            (Some(id), Some(name)) => Some(Project {
                id: ProjectId::new(id),
                name: ProjectName::parse(&name).map_err(corrupt)?,
            }),
            _ => None,
        };

        let work_hours = match (
            self.work_hours_id,
            self.start_time,
            self.end_time,
            self.timezone,
        ) {
            (Some(id), Some(start), Some(end), Some(timezone)) => Some(WorkHours {
                id: WorkHoursId::new(id),
                start,
                end,
                timezone: parse_timezone(Some(&timezone)).map_err(corrupt)?,
            }),
            _ => None,
        };

        Ok(Member {
            id: MemberId::new(self.id),
            first_name: MemberName::parse("first_name", &self.first_name)
                .map_err(corrupt)?,
            last_name: MemberName::parse("last_name", &self.last_name)
                .map_err(corrupt)?,
            skills,
            project,
            manager_id: self.manager_id.map(MemberId::new),
            work_hours,
            on_holidays_till: self.on_holidays_till,
        })
    }
}

async fn hydrate(
    conn: &mut PgConnection,
    rows: Vec<MemberRow>,
) -> Result<Vec<Member>, MemberStoreError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let member_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let skill_rows = sqlx::query_as::<_, MemberSkillRow>(
        r#"
            SELECT ms.member_id, s.id AS skill_id, s.name
            FROM member_skills ms
            INNER JOIN skills s ON s.id = ms.skill_id
            WHERE ms.member_id = ANY($1)
            ORDER BY s.name, s.id
        "#,
    )
    .bind(member_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(unexpected)?;

    let mut skills_by_member = HashMap::<Uuid, Vec<Skill>>::new();
    for row in skill_rows {
        let name = SkillName::parse(&row.name)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
        skills_by_member.entry(row.member_id).or_default().push(Skill {
            id: SkillId::new(row.skill_id),
            name,
        });
    }

    rows.into_iter()
        .map(|row| {
            let skills = skills_by_member.remove(&row.id).unwrap_or_default();
            row.into_member(skills)
        })
        .collect()
}

async fn fetch_member(
    conn: &mut PgConnection,
    id: &MemberId,
    for_update: bool,
) -> Result<Member, MemberStoreError> {
    let lock = if for_update { "FOR UPDATE OF m" } else { "" };
    let sql = format!("{SELECT_MEMBERS} WHERE m.id = $1 {lock}");
    let row = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(id.as_ref())
        .fetch_optional(&mut *conn)
        .await
        .map_err(unexpected)?
        .ok_or(MemberStoreError::MemberIDNotFound(*id))?;

    hydrate(conn, vec![row])
        .await?
        .pop()
        .ok_or(MemberStoreError::MemberIDNotFound(*id))
}

async fn exists(
    conn: &mut PgConnection,
    table: &str,
    id: &Uuid,
) -> Result<bool, MemberStoreError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(unexpected)
}

async fn check_references(
    conn: &mut PgConnection,
    record: &MemberRecord,
) -> Result<(), MemberStoreError> {
    if !record.skills.is_empty() {
        let ids: Vec<Uuid> = record.skills.iter().map(|id| *id.as_ref()).collect();
        let found: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM skills WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut *conn)
                .await
                .map_err(unexpected)?;
        if let Some(missing) =
            record.skills.iter().find(|id| !found.contains(id.as_ref()))
        {
            return Err(MemberStoreError::SkillIDNotFound(*missing));
        }
    }
    if let Some(id) = record.project {
        if !exists(conn, "projects", id.as_ref()).await? {
            return Err(MemberStoreError::ProjectIDNotFound(id));
        }
    }
    if let Some(id) = record.work_hours {
        if !exists(conn, "work_hours", id.as_ref()).await? {
            return Err(MemberStoreError::WorkHoursIDNotFound(id));
        }
    }
    if let Some(id) = record.manager_id {
        if id != record.id && !exists(conn, "members", id.as_ref()).await? {
            return Err(MemberStoreError::MemberIDNotFound(id));
        }
    }
    Ok(())
}

async fn replace_skills(
    conn: &mut PgConnection,
    record: &MemberRecord,
) -> Result<(), MemberStoreError> {
    sqlx::query("DELETE FROM member_skills WHERE member_id = $1")
        .bind(record.id.as_ref())
        .execute(&mut *conn)
        .await
        .map_err(unexpected)?;

    let skill_ids: Vec<Uuid> =
        record.skills.iter().map(|id| *id.as_ref()).collect();
    sqlx::query(
        r#"
            INSERT INTO member_skills (member_id, skill_id)
            SELECT $1, UNNEST($2::uuid[])
        "#,
    )
    .bind(record.id.as_ref())
    .bind(skill_ids)
    .execute(&mut *conn)
    .await
    .map_err(unexpected)?;
    Ok(())
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        check_references(&mut tx, &member).await?;

        sqlx::query(
            r#"
            INSERT INTO members
                (id, first_name, last_name, project_id, manager_id, work_hours_id, on_holidays_till)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.first_name.as_ref())
        .bind(member.last_name.as_ref())
        .bind(member.project.map(|id| *id.as_ref()))
        .bind(member.manager_id.map(|id| *id.as_ref()))
        .bind(member.work_hours.map(|id| *id.as_ref()))
        .bind(member.on_holidays_till)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        replace_skills(&mut tx, &member).await?;
        let created = fetch_member(&mut tx, &member.id, false).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(created)
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn get_member(&self, id: &MemberId) -> Result<Member, MemberStoreError> {
        let mut conn = self.pool.acquire().await.map_err(unexpected)?;
        fetch_member(&mut conn, id, false).await
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn list_members(
        &self,
        filter: &MemberFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut conn = self.pool.acquire().await.map_err(unexpected)?;
        // Project and skills narrow the rows in SQL; the full filter runs
        // afterwards since the time predicates depend on each member's zone.
        let sql = format!(
            r#"{SELECT_MEMBERS}
            WHERE ($1::uuid IS NULL OR m.project_id = $1)
              AND ($2::text[] IS NULL OR EXISTS (
                    SELECT 1 FROM member_skills ms
                    INNER JOIN skills s ON s.id = ms.skill_id
                    WHERE ms.member_id = m.id AND s.name = ANY($2)))
            ORDER BY m.last_name, m.first_name, m.id"#
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(filter.project.map(|id| *id.as_ref()))
            .bind(filter.skill_names())
            .fetch_all(&mut *conn)
            .await
            .map_err(unexpected)?;

        let mut members = hydrate(&mut conn, rows).await?;
        members.retain(|member| filter.matches(member, now));
        Ok(members)
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        member: MemberRecord,
    ) -> Result<Member, MemberStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        if !exists(&mut tx, "members", member.id.as_ref()).await? {
            return Err(MemberStoreError::MemberIDNotFound(member.id));
        }
        check_references(&mut tx, &member).await?;

        sqlx::query(
            r#"
            UPDATE members
            SET first_name = $2, last_name = $3, project_id = $4,
                manager_id = $5, work_hours_id = $6, on_holidays_till = $7
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.first_name.as_ref())
        .bind(member.last_name.as_ref())
        .bind(member.project.map(|id| *id.as_ref()))
        .bind(member.manager_id.map(|id| *id.as_ref()))
        .bind(member.work_hours.map(|id| *id.as_ref()))
        .bind(member.on_holidays_till)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        replace_skills(&mut tx, &member).await?;
        let updated = fetch_member(&mut tx, &member.id, false).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(updated)
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(&mut self, id: &MemberId) -> Result<(), MemberStoreError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberIDNotFound(*id));
        }
        Ok(())
    }

    #[tracing::instrument(name = "Assigning member to project in PostgreSQL", skip_all)]
    async fn assign_to_project(
        &mut self,
        member_id: &MemberId,
        project_id: &ProjectId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentOutcome, MemberStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let member = fetch_member(&mut tx, member_id, true).await?;
        if !exists(&mut tx, "projects", project_id.as_ref()).await? {
            return Err(MemberStoreError::ProjectIDNotFound(*project_id));
        }

        let outcome = match decide_assignment(&MemberRecord::from(&member), now) {
            AssignmentDecision::Reject(rejection) => {
                AssignmentOutcome::Rejected(rejection)
            }
            AssignmentDecision::Assign => {
                sqlx::query("UPDATE members SET project_id = $2 WHERE id = $1")
                    .bind(member_id.as_ref())
                    .bind(project_id.as_ref())
                    .execute(&mut *tx)
                    .await
                    .map_err(unexpected)?;
                AssignmentOutcome::Assigned(
                    fetch_member(&mut tx, member_id, false).await?,
                )
            }
        };

        tx.commit().await.map_err(unexpected)?;
        Ok(outcome)
    }
}
