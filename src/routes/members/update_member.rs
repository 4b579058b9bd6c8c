use axum::{extract::State, http::StatusCode};

use super::{MemberRequest, MemberResponse};
use crate::{
    domain::{MemberId, ResourceAPIError},
    routes::extract::{Json, Path},
    AppState,
};

/// Full replacement: fields missing from the body are cleared.
#[tracing::instrument(name = "Update member route handler", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<uuid::Uuid>,
    Json(request): Json<MemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ResourceAPIError> {
    let record = request.into_record(MemberId::new(member_id))?;

    let member = state
        .member_store
        .write()
        .await
        .update_member(record)
        .await?;

    let response = Json(MemberResponse::new(&member, state.clock.now()));
    Ok((StatusCode::OK, response))
}
