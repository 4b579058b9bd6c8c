use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Project, ProjectId, ProjectName, ProjectStore, ProjectStoreError,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = ProjectStoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: ProjectId::new(row.id),
            name: ProjectName::parse(&row.name)
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        })
    }
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(&mut self, project: Project) -> Result<(), ProjectStoreError> {
        sqlx::query("INSERT INTO projects (id, name) VALUES ($1, $2)")
            .bind(project.id.as_ref())
            .bind(project.name.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(e.into()))?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectStoreError> {
        sqlx::query_as::<_, ProjectRow>("SELECT id, name FROM projects WHERE id = $1")
            .bind(id.as_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => ProjectStoreError::ProjectIDNotFound,
                e => ProjectStoreError::UnexpectedError(e.into()),
            })?
            .try_into()
    }

    #[tracing::instrument(name = "Getting project list from PostgreSQL", skip_all)]
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        sqlx::query_as::<_, ProjectRow>("SELECT id, name FROM projects ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(e.into()))?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(&mut self, project: Project) -> Result<(), ProjectStoreError> {
        let result = sqlx::query("UPDATE projects SET name = $2 WHERE id = $1")
            .bind(project.id.as_ref())
            .bind(project.name.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting project from PostgreSQL", skip_all)]
    async fn delete_project(&mut self, id: &ProjectId) -> Result<(), ProjectStoreError> {
        // members.project_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        Ok(())
    }
}
