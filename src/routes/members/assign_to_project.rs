use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MemberResponse;
use crate::{
    domain::{AssignmentOutcome, MemberId, ProjectId, ResourceAPIError},
    routes::extract::{Json, Path},
    AppState,
};

#[derive(Debug, PartialEq, Deserialize)]
pub struct AssignToProjectRequest {
    #[serde(default)]
    pub id: String,
}

/// Body returned with 409 when the assignment gate refuses the member.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRejectedResponse {
    pub status: String,
    pub member_id: uuid::Uuid,
    pub on_holidays_till: NaiveDate,
    pub reason: String,
}

#[tracing::instrument(name = "Assign member to project route handler", skip_all)]
pub async fn assign_to_project(
    State(state): State<AppState>,
    Path(member_id): Path<uuid::Uuid>,
    Json(request): Json<AssignToProjectRequest>,
) -> Result<Response, ResourceAPIError> {
    let member_id = MemberId::new(member_id);
    let project_id = ProjectId::parse(&request.id)?;
    let now = state.clock.now();

    let outcome = state
        .member_store
        .write()
        .await
        .assign_to_project(&member_id, &project_id, now)
        .await?;

    let response = match outcome {
        AssignmentOutcome::Assigned(member) => {
            tracing::info!("assigned member {} to project {}", member_id, project_id);
            (StatusCode::OK, Json(MemberResponse::new(&member, now))).into_response()
        }
        AssignmentOutcome::Rejected(rejection) => {
            tracing::info!(
                "refused to assign member {} on holiday until {}",
                member_id,
                rejection.on_holidays_till
            );
            let body = AssignmentRejectedResponse {
                status: "rejected".to_string(),
                member_id: *rejection.member_id.as_ref(),
                on_holidays_till: rejection.on_holidays_till,
                reason: rejection.reason(),
            };
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
    };

    Ok(response)
}
