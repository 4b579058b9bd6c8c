use axum::{extract::State, http::StatusCode};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use super::{
    extract::{Json, Path},
    ListResponse,
};
use crate::{
    domain::{
        format_time_of_day, parse_time_of_day, parse_timezone, ResourceAPIError,
        ValidationError, WorkHours, WorkHoursId, WorkHoursStoreError,
    },
    AppState,
};

/// Times are `HH:MM` or `HH:MM:SS`; a missing timezone means UTC.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkHoursRequest {
    pub start: String,
    pub end: String,
    pub timezone: Option<String>,
}

impl WorkHoursRequest {
    pub fn into_work_hours(self, id: WorkHoursId) -> Result<WorkHours, ValidationError> {
        Ok(WorkHours {
            id,
            start: parse_time_of_day("start", &self.start)?,
            end: parse_time_of_day("end", &self.end)?,
            timezone: parse_timezone(self.timezone.as_deref())?,
        })
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursResponse {
    pub id: uuid::Uuid,
    pub start: String,
    pub end: String,
    pub timezone: String,
}

impl From<&WorkHours> for WorkHoursResponse {
    fn from(work_hours: &WorkHours) -> Self {
        Self {
            id: *work_hours.id.as_ref(),
            start: format_time_of_day(&work_hours.start),
            end: format_time_of_day(&work_hours.end),
            timezone: work_hours.timezone.name().to_owned(),
        }
    }
}

impl WorkHoursStoreError {
    fn into_api_error(self, id: &WorkHoursId) -> ResourceAPIError {
        match self {
            WorkHoursStoreError::WorkHoursIDNotFound => {
                ResourceAPIError::IDNotFoundError(*id.as_ref())
            }
            e => ResourceAPIError::UnexpectedError(eyre!(e)),
        }
    }
}

#[tracing::instrument(name = "Get work hours list route handler", skip_all)]
pub async fn list_work_hours(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ListResponse<WorkHoursResponse>>), ResourceAPIError> {
    let work_hours = state
        .work_hours_store
        .read()
        .await
        .list_work_hours()
        .await
        .map_err(|e| ResourceAPIError::UnexpectedError(eyre!(e)))?;

    let results: Vec<WorkHoursResponse> =
        work_hours.iter().map(WorkHoursResponse::from).collect();
    Ok((StatusCode::OK, Json(results.into())))
}

#[tracing::instrument(name = "Get work hours route handler", skip_all)]
pub async fn get_work_hours(
    State(state): State<AppState>,
    Path(work_hours_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<WorkHoursResponse>), ResourceAPIError> {
    let work_hours_id = WorkHoursId::new(work_hours_id);
    let work_hours = state
        .work_hours_store
        .read()
        .await
        .get_work_hours(&work_hours_id)
        .await
        .map_err(|e| e.into_api_error(&work_hours_id))?;

    Ok((StatusCode::OK, Json(WorkHoursResponse::from(&work_hours))))
}

#[tracing::instrument(name = "Create new work hours route handler", skip_all)]
pub async fn new_work_hours(
    State(state): State<AppState>,
    Json(request): Json<WorkHoursRequest>,
) -> Result<(StatusCode, Json<WorkHoursResponse>), ResourceAPIError> {
    let work_hours = request.into_work_hours(WorkHoursId::default())?;

    state
        .work_hours_store
        .write()
        .await
        .add_work_hours(work_hours.clone())
        .await
        .map_err(|e| e.into_api_error(&work_hours.id))?;

    Ok((StatusCode::CREATED, Json(WorkHoursResponse::from(&work_hours))))
}

#[tracing::instrument(name = "Update work hours route handler", skip_all)]
pub async fn update_work_hours(
    State(state): State<AppState>,
    Path(work_hours_id): Path<uuid::Uuid>,
    Json(request): Json<WorkHoursRequest>,
) -> Result<(StatusCode, Json<WorkHoursResponse>), ResourceAPIError> {
    let work_hours = request.into_work_hours(WorkHoursId::new(work_hours_id))?;

    state
        .work_hours_store
        .write()
        .await
        .update_work_hours(work_hours.clone())
        .await
        .map_err(|e| e.into_api_error(&work_hours.id))?;

    Ok((StatusCode::OK, Json(WorkHoursResponse::from(&work_hours))))
}

#[tracing::instrument(name = "Delete work hours route handler", skip_all)]
pub async fn delete_work_hours(
    State(state): State<AppState>,
    Path(work_hours_id): Path<uuid::Uuid>,
) -> Result<StatusCode, ResourceAPIError> {
    let work_hours_id = WorkHoursId::new(work_hours_id);

    state
        .work_hours_store
        .write()
        .await
        .delete_work_hours(&work_hours_id)
        .await
        .map_err(|e| e.into_api_error(&work_hours_id))?;

    Ok(StatusCode::NO_CONTENT)
}
