use axum::{extract::State, http::StatusCode};

use super::{MemberRequest, MemberResponse};
use crate::{
    domain::{MemberId, ResourceAPIError},
    routes::extract::Json,
    AppState,
};

#[tracing::instrument(name = "Create new member route handler", skip_all)]
pub async fn new_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ResourceAPIError> {
    let record = request.into_record(MemberId::default())?;

    let member = state
        .member_store
        .write()
        .await
        .add_member(record)
        .await?;
    tracing::info!("created member {}", member.id);

    let response = Json(MemberResponse::new(&member, state.clock.now()));
    Ok((StatusCode::CREATED, response))
}
