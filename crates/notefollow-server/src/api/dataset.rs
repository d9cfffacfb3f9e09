use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use notefollow_core::DashboardView;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_tracker_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ImportSummary {
    creator_id: String,
    records: usize,
    warnings: Vec<String>,
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let view = state
        .tracker
        .dashboard()
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(view, req_id.0)))
}

/// POST /api/v1/refresh: fetch today's count and return the updated dashboard.
pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let rid = &req_id.0;
    let dataset = state
        .tracker
        .refresh()
        .await
        .map_err(|e| map_tracker_error(rid.clone(), &e))?;

    let view = DashboardView::build(&dataset, state.tracker.today());
    Ok(Json(ApiResponse::new(view, req_id.0)))
}

/// GET /api/v1/export: the raw dataset as a JSON download.
pub(super) async fn export_dataset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let export = state
        .tracker
        .export()
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    let mut response = export.bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    Ok(response)
}

/// POST /api/v1/import?confirm=true: replace the dataset with an export.
pub(super) async fn import_dataset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ConfirmQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<ImportSummary>>, ApiError> {
    let imported = state
        .tracker
        .import(&body, query.confirm)
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    let summary = ImportSummary {
        records: imported.dataset.records.len(),
        creator_id: imported.dataset.creator_id,
        warnings: imported.warnings.iter().map(ToString::to_string).collect(),
    };
    Ok(Json(ApiResponse::new(summary, req_id.0)))
}

/// DELETE /api/v1/dataset?confirm=true
pub(super) async fn reset_dataset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state
        .tracker
        .reset(query.confirm)
        .map_err(|e| map_tracker_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "deleted": true }),
        req_id.0,
    )))
}
