use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use super::MemberResponse;
use crate::{
    domain::{MemberFilter, ProjectId, ResourceAPIError, ValidationError},
    routes::{
        extract::{Json, Query},
        ListResponse,
    },
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListMembersQueryParams {
    pub skills: Option<String>,
    pub project: Option<String>,
    pub holidays: Option<String>,
    pub is_working: Option<String>,
}

impl TryFrom<ListMembersQueryParams> for MemberFilter {
    type Error = ValidationError;

    fn try_from(params: ListMembersQueryParams) -> Result<Self, Self::Error> {
        Ok(MemberFilter {
            skills: MemberFilter::parse_skills(params.skills.as_deref())?,
            project: params
                .project
                .as_deref()
                .map(ProjectId::parse)
                .transpose()?,
            holidays: parse_flag("holidays", params.holidays.as_deref())?,
            is_working: parse_flag("is_working", params.is_working.as_deref())?,
        })
    }
}

fn parse_flag(name: &str, raw: Option<&str>) -> Result<Option<bool>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        "" => Ok(None),
        other => Err(ValidationError::new(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

#[tracing::instrument(name = "List members route handler", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<ListMembersQueryParams>,
) -> Result<(StatusCode, Json<ListResponse<MemberResponse>>), ResourceAPIError> {
    let filter = MemberFilter::try_from(params)?;
    tracing::debug!("filter: {:?}", filter);
    let now = state.clock.now();

    let members = state
        .member_store
        .read()
        .await
        .list_members(&filter, now)
        .await?;

    let results = members
        .iter()
        .map(|member| MemberResponse::new(member, now))
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ListResponse::from(results))))
}
