use axum::{extract::State, http::StatusCode};

use super::MemberResponse;
use crate::{
    domain::{MemberId, ResourceAPIError},
    routes::extract::{Json, Path},
    AppState,
};

#[tracing::instrument(name = "Get member route handler", skip_all)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<uuid::Uuid>,
) -> Result<(StatusCode, Json<MemberResponse>), ResourceAPIError> {
    let member_id = MemberId::new(member_id);
    tracing::debug!("member_id: {}", member_id);

    let member = state
        .member_store
        .read()
        .await
        .get_member(&member_id)
        .await?;

    let response = Json(MemberResponse::new(&member, state.clock.now()));
    Ok((StatusCode::OK, response))
}
