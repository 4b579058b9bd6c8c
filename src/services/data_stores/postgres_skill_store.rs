use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Skill, SkillId, SkillName, SkillStore, SkillStoreError};

pub struct PostgresSkillStore {
    pool: PgPool,
}

impl PostgresSkillStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SkillRow {
    id: Uuid,
    name: String,
}

fn to_skill(row: SkillRow) -> Result<Skill, SkillStoreError> {
    let name = SkillName::parse(&row.name)
        .map_err(|e| SkillStoreError::UnexpectedError(eyre!(e)))?;
    Ok(Skill {
        id: SkillId::new(row.id),
        name,
    })
}

#[async_trait::async_trait]
impl SkillStore for PostgresSkillStore {
    #[tracing::instrument(name = "Adding skill to PostgreSQL", skip_all)]
    async fn add_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError> {
        sqlx::query("INSERT INTO skills (id, name) VALUES ($1, $2)")
            .bind(skill.id.as_ref())
            .bind(skill.name.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| SkillStoreError::UnexpectedError(e.into()))?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting skill from PostgreSQL", skip_all)]
    async fn get_skill(&self, id: &SkillId) -> Result<Skill, SkillStoreError> {
        let row = sqlx::query_as::<_, SkillRow>("SELECT id, name FROM skills WHERE id = $1")
            .bind(id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SkillStoreError::UnexpectedError(e.into()))?
            .ok_or(SkillStoreError::SkillIDNotFound)?;
        to_skill(row)
    }

    #[tracing::instrument(name = "Getting skill list from PostgreSQL", skip_all)]
    async fn list_skills(&self) -> Result<Vec<Skill>, SkillStoreError> {
        let rows = sqlx::query_as::<_, SkillRow>("SELECT id, name FROM skills ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SkillStoreError::UnexpectedError(e.into()))?;
        rows.into_iter().map(to_skill).collect()
    }

    #[tracing::instrument(name = "Updating skill in PostgreSQL", skip_all)]
    async fn update_skill(&mut self, skill: Skill) -> Result<(), SkillStoreError> {
        let result = sqlx::query("UPDATE skills SET name = $2 WHERE id = $1")
            .bind(skill.id.as_ref())
            .bind(skill.name.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| SkillStoreError::UnexpectedError(e.into()))?;

        match result.rows_affected() {
            0 => Err(SkillStoreError::SkillIDNotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(name = "Deleting skill from PostgreSQL", skip_all)]
    async fn delete_skill(&mut self, id: &SkillId) -> Result<(), SkillStoreError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| SkillStoreError::UnexpectedError(e.into()))?;

        match result.rows_affected() {
            0 => Err(SkillStoreError::SkillIDNotFound),
            _ => Ok(()),
        }
    }
}
