//! Creator lookup and the handlers that choose which creator is tracked.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use notefollow_core::{view::profile_url, Creator, Dataset};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_tracker_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct StartTrackingRequest {
    pub creator_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChangeCreatorRequest {
    pub creator_id: String,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct CreatorPreview {
    id: String,
    nickname: String,
    urlname: String,
    follower_count: i64,
    profile_image_url: Option<String>,
    profile_url: String,
}

impl From<Creator> for CreatorPreview {
    fn from(creator: Creator) -> Self {
        Self {
            profile_url: profile_url(&creator.urlname),
            id: creator.id,
            nickname: creator.nickname,
            urlname: creator.urlname,
            follower_count: creator.follower_count,
            profile_image_url: creator.profile_image_url,
        }
    }
}

/// GET /api/v1/creators/{creator_id}: look a creator up without tracking.
pub(super) async fn preview_creator(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(creator_id): Path<String>,
) -> Result<Json<ApiResponse<CreatorPreview>>, ApiError> {
    let creator = state
        .tracker
        .check_profile(&creator_id)
        .await
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(creator.into(), req_id.0)))
}

/// POST /api/v1/tracking: first-time setup.
///
/// Refuses with `conflict` when a dataset already exists; switching creators
/// goes through `PUT /api/v1/creator`.
pub(super) async fn start_tracking(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<StartTrackingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Dataset>>), ApiError> {
    let dataset = state
        .tracker
        .start_tracking(&body.creator_id)
        .await
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(dataset, req_id.0)),
    ))
}

/// PUT /api/v1/creator: replace the tracked creator, discarding its records.
pub(super) async fn change_creator(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ChangeCreatorRequest>,
) -> Result<Json<ApiResponse<Dataset>>, ApiError> {
    let dataset = state
        .tracker
        .change_creator(&body.creator_id, body.confirm)
        .await
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(dataset, req_id.0)))
}
