//! Linking a faculty member to a public scholar profile.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use facip_scholar::ProfileRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::{Caller, RequestId};
use crate::store::ScholarLink;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) const UPDATED_MESSAGE: &str = "Google Scholar profile updated successfully";

#[derive(Debug, Deserialize)]
pub(super) struct UpdateScholarRequest {
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateScholarResponse {
    message: &'static str,
    profile_url: String,
    scholar_data: ProfileRecord,
}

fn parse_faculty_id(req_id: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::new(
            req_id,
            "validation_error",
            format!("faculty id must be a UUID, got '{raw}'"),
        )
    })
}

fn forbidden(req_id: &str, faculty_id: Uuid) -> ApiError {
    ApiError::new(
        req_id,
        "forbidden",
        format!("caller may not access the scholar profile of faculty {faculty_id}"),
    )
}

/// Runs the extractor against the submitted URL and stores the outcome.
///
/// Only the faculty member bound to the caller's token may update the link.
/// Answers 200 even when extraction failed: the failure record is the payload.
pub(super) async fn update_scholar_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(caller): Extension<Caller>,
    Path(faculty_id): Path<String>,
    Json(body): Json<UpdateScholarRequest>,
) -> Result<Json<ApiResponse<UpdateScholarResponse>>, ApiError> {
    let faculty_id = parse_faculty_id(&req_id.0, &faculty_id)?;
    if !caller.may_update(faculty_id) {
        return Err(forbidden(&req_id.0, faculty_id));
    }

    let record = state.scholar.extract(&body.profile_url).await;
    tracing::info!(
        %faculty_id,
        url = %body.profile_url,
        success = record.is_success(),
        "scholar profile refreshed"
    );

    let replaced = state
        .store
        .upsert(ScholarLink {
            faculty_id,
            profile_url: body.profile_url.clone(),
            scholar_data: record.clone(),
            updated_at: Utc::now(),
        })
        .await;
    if replaced.is_some() {
        tracing::debug!(%faculty_id, "replaced previous scholar link");
    }

    Ok(Json(ApiResponse {
        data: UpdateScholarResponse {
            message: UPDATED_MESSAGE,
            profile_url: body.profile_url,
            scholar_data: record,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_scholar_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(caller): Extension<Caller>,
    Path(faculty_id): Path<String>,
) -> Result<Json<ApiResponse<ScholarLink>>, ApiError> {
    let faculty_id = parse_faculty_id(&req_id.0, &faculty_id)?;
    if !caller.may_view(faculty_id) {
        return Err(forbidden(&req_id.0, faculty_id));
    }

    let link = state.store.get(faculty_id).await.ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("no scholar profile linked for faculty {faculty_id}"),
        )
    })?;

    Ok(Json(ApiResponse {
        data: link,
        meta: ResponseMeta::new(req_id.0),
    }))
}
