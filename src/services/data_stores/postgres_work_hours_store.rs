use chrono::NaiveTime;
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    parse_timezone, WorkHours, WorkHoursId, WorkHoursStore, WorkHoursStoreError,
};

pub struct PostgresWorkHoursStore {
    pool: PgPool,
}

impl PostgresWorkHoursStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WorkHoursRow {
    id: Uuid,
    start_time: NaiveTime,
    end_time: NaiveTime,
    timezone: String,
}

impl TryFrom<WorkHoursRow> for WorkHours {
    type Error = WorkHoursStoreError;

    fn try_from(row: WorkHoursRow) -> Result<Self, Self::Error> {
        let timezone = parse_timezone(Some(&row.timezone))
            .map_err(|e| WorkHoursStoreError::UnexpectedError(eyre!(e)))?;
        Ok(WorkHours {
            id: WorkHoursId::new(row.id),
            start: row.start_time,
            end: row.end_time,
            timezone,
        })
    }
}

#[async_trait::async_trait]
impl WorkHoursStore for PostgresWorkHoursStore {
    #[tracing::instrument(name = "Adding work hours to PostgreSQL", skip_all)]
    async fn add_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError> {
        sqlx::query(
            r#"
            INSERT INTO work_hours (id, start_time, end_time, timezone)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(work_hours.id.as_ref())
        .bind(work_hours.start)
        .bind(work_hours.end)
        .bind(work_hours.timezone.name())
        .execute(&self.pool)
        .await
        .map_err(|e| WorkHoursStoreError::UnexpectedError(e.into()))?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting work hours from PostgreSQL", skip_all)]
    async fn get_work_hours(
        &self,
        id: &WorkHoursId,
    ) -> Result<WorkHours, WorkHoursStoreError> {
        sqlx::query_as::<_, WorkHoursRow>(
            "SELECT id, start_time, end_time, timezone FROM work_hours WHERE id = $1",
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => WorkHoursStoreError::WorkHoursIDNotFound,
            e => WorkHoursStoreError::UnexpectedError(e.into()),
        })?
        .try_into()
    }

    #[tracing::instrument(name = "Getting work hours list from PostgreSQL", skip_all)]
    async fn list_work_hours(&self) -> Result<Vec<WorkHours>, WorkHoursStoreError> {
        sqlx::query_as::<_, WorkHoursRow>(
            r#"
            SELECT id, start_time, end_time, timezone
            FROM work_hours
            ORDER BY start_time, end_time, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| WorkHoursStoreError::UnexpectedError(e.into()))?
        .into_iter()
        .map(WorkHours::try_from)
        .collect()
    }

    #[tracing::instrument(name = "Updating work hours in PostgreSQL", skip_all)]
    async fn update_work_hours(
        &mut self,
        work_hours: WorkHours,
    ) -> Result<(), WorkHoursStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE work_hours SET start_time = $2, end_time = $3, timezone = $4
            WHERE id = $1
            "#,
        )
        .bind(work_hours.id.as_ref())
        .bind(work_hours.start)
        .bind(work_hours.end)
        .bind(work_hours.timezone.name())
        .execute(&self.pool)
        .await
        .map_err(|e| WorkHoursStoreError::UnexpectedError(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(WorkHoursStoreError::WorkHoursIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting work hours from PostgreSQL", skip_all)]
    async fn delete_work_hours(
        &mut self,
        id: &WorkHoursId,
    ) -> Result<(), WorkHoursStoreError> {
        // members.work_hours_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM work_hours WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| WorkHoursStoreError::UnexpectedError(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(WorkHoursStoreError::WorkHoursIDNotFound);
        }
        Ok(())
    }
}
