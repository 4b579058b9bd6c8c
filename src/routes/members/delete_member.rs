use axum::{extract::State, http::StatusCode};

use crate::{
    domain::{MemberId, ResourceAPIError},
    routes::extract::Path,
    AppState,
};

#[tracing::instrument(name = "Delete member route handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<uuid::Uuid>,
) -> Result<StatusCode, ResourceAPIError> {
    let member_id = MemberId::new(member_id);

    state
        .member_store
        .write()
        .await
        .delete_member(&member_id)
        .await?;
    tracing::info!("deleted member {}", member_id);

    Ok(StatusCode::NO_CONTENT)
}
