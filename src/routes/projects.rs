use axum::{extract::State, http::StatusCode};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use super::{
    extract::{Json, Path},
    ListResponse,
};
use crate::{
    domain::{
        Project, ProjectId, ProjectName, ProjectStoreError, ResourceAPIError,
    },
    AppState,
};

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectRequest {
    pub name: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: uuid::Uuid,
    pub name: String,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id.as_ref(),
            name: project.name.as_ref().to_owned(),
        }
    }
}

fn map_store_error(
    project_id: ProjectId,
) -> impl FnOnce(ProjectStoreError) -> ResourceAPIError {
    move |e| match e {
        ProjectStoreError::ProjectIDNotFound => {
            ResourceAPIError::IDNotFoundError(*project_id.as_ref())
        }
        e => ResourceAPIError::UnexpectedError(eyre!(e)),
    }
}

#[tracing::instrument(name = "Get project list route handler", skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ListResponse<ProjectResponse>>), ResourceAPIError> {
    let projects = state
        .project_store
        .read()
        .await
        .list_projects()
        .await
        .map_err(|e| ResourceAPIError::UnexpectedError(eyre!(e)))?;

    let results: Vec<ProjectResponse> =
        projects.iter().map(ProjectResponse::from).collect();
    Ok((StatusCode::OK, Json(results.into())))
}

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<ProjectResponse>), ResourceAPIError> {
    let project_id = ProjectId::new(project_id);
    tracing::debug!("project_id: {}", project_id);

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(map_store_error(project_id))?;

    Ok((StatusCode::OK, Json(ProjectResponse::from(&project))))
}

#[tracing::instrument(name = "Create new project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    Json(request): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ResourceAPIError> {
    let project = Project::new(ProjectName::parse(&request.name)?);

    state
        .project_store
        .write()
        .await
        .add_project(project.clone())
        .await
        .map_err(|e| ResourceAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

#[tracing::instrument(name = "Update project route handler", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<uuid::Uuid>,
    Json(request): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ResourceAPIError> {
    let project = Project {
        id: ProjectId::new(project_id),
        name: ProjectName::parse(&request.name)?,
    };

    state
        .project_store
        .write()
        .await
        .update_project(project.clone())
        .await
        .map_err(map_store_error(project.id))?;

    Ok((StatusCode::OK, Json(ProjectResponse::from(&project))))
}

#[tracing::instrument(name = "Delete project route handler", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<uuid::Uuid>,
) -> Result<StatusCode, ResourceAPIError> {
    let project_id = ProjectId::new(project_id);

    state
        .project_store
        .write()
        .await
        .delete_project(&project_id)
        .await
        .map_err(map_store_error(project_id))?;

    Ok(StatusCode::NO_CONTENT)
}
