use axum::{extract::State, http::StatusCode};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use super::{
    extract::{Json, Path},
    ListResponse,
};
use crate::{
    domain::{ResourceAPIError, Skill, SkillId, SkillName, SkillStoreError},
    AppState,
};

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillRequest {
    pub name: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: uuid::Uuid,
    pub name: String,
}

impl From<&Skill> for SkillResponse {
    fn from(skill: &Skill) -> Self {
        Self {
            id: *skill.id.as_ref(),
            name: skill.name.as_ref().to_owned(),
        }
    }
}

fn api_error(skill_id: &SkillId, e: SkillStoreError) -> ResourceAPIError {
    match e {
        SkillStoreError::SkillIDNotFound => {
            ResourceAPIError::IDNotFoundError(*skill_id.as_ref())
        }
        e => ResourceAPIError::UnexpectedError(eyre!(e)),
    }
}

#[tracing::instrument(name = "Get skill list route handler", skip_all)]
pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ListResponse<SkillResponse>>), ResourceAPIError> {
    let skills = state
        .skill_store
        .read()
        .await
        .list_skills()
        .await
        .map_err(|e| ResourceAPIError::UnexpectedError(eyre!(e)))?;

    let results: Vec<SkillResponse> = skills.iter().map(SkillResponse::from).collect();
    Ok((StatusCode::OK, Json(results.into())))
}

#[tracing::instrument(name = "Get skill route handler", skip_all)]
pub async fn get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<SkillResponse>), ResourceAPIError> {
    let skill_id = SkillId::new(skill_id);
    let skill = state
        .skill_store
        .read()
        .await
        .get_skill(&skill_id)
        .await
        .map_err(|e| api_error(&skill_id, e))?;

    Ok((StatusCode::OK, Json(SkillResponse::from(&skill))))
}

#[tracing::instrument(name = "Create new skill route handler", skip_all)]
pub async fn new_skill(
    State(state): State<AppState>,
    Json(request): Json<SkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), ResourceAPIError> {
    let skill = Skill::new(SkillName::parse(&request.name)?);

    state
        .skill_store
        .write()
        .await
        .add_skill(skill.clone())
        .await
        .map_err(|e| api_error(&skill.id, e))?;

    Ok((StatusCode::CREATED, Json(SkillResponse::from(&skill))))
}

#[tracing::instrument(name = "Update skill route handler", skip_all)]
pub async fn update_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<uuid::Uuid>,
    Json(request): Json<SkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), ResourceAPIError> {
    let skill = Skill {
        id: SkillId::new(skill_id),
        name: SkillName::parse(&request.name)?,
    };

    state
        .skill_store
        .write()
        .await
        .update_skill(skill.clone())
        .await
        .map_err(|e| api_error(&skill.id, e))?;

    Ok((StatusCode::OK, Json(SkillResponse::from(&skill))))
}

#[tracing::instrument(name = "Delete skill route handler", skip_all)]
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<uuid::Uuid>,
) -> Result<StatusCode, ResourceAPIError> {
    let skill_id = SkillId::new(skill_id);
    tracing::debug!("skill_id: {}", skill_id);

    state
        .skill_store
        .write()
        .await
        .delete_skill(&skill_id)
        .await
        .map_err(|e| api_error(&skill_id, e))?;

    Ok(StatusCode::NO_CONTENT)
}
