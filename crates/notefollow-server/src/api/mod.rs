mod creator;
mod dataset;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use notefollow_client::{ClientError, NoteClient};
use notefollow_storage::FileStore;
use notefollow_tracker::{Tracker, TrackerError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

pub type ServerTracker = Tracker<FileStore, NoteClient>;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<ServerTracker>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    busy: bool,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_tracker_error(request_id: String, error: &TrackerError) -> ApiError {
    match error {
        TrackerError::EmptyCreatorId | TrackerError::ConfirmationRequired { .. } => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        TrackerError::Import(_) => {
            tracing::warn!(error = %error, "import rejected");
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        TrackerError::NotTracking => ApiError::new(request_id, "not_found", error.to_string()),
        TrackerError::Busy => ApiError::new(request_id, "conflict", error.to_string()),
        TrackerError::AlreadyTracking { creator_id } => ApiError::new(
            request_id,
            "conflict",
            format!("already tracking '{creator_id}'; use PUT /api/v1/creator to switch"),
        ),
        TrackerError::Fetch(ClientError::NotFound { creator_id }) => ApiError::new(
            request_id,
            "not_found",
            format!("creator '{creator_id}' was not found"),
        ),
        TrackerError::Fetch(e) => {
            tracing::warn!(error = %e, "profile fetch failed");
            ApiError::new(request_id, "bad_gateway", "failed to fetch creator profile")
        }
        TrackerError::Export(_) | TrackerError::Persistence(_) => {
            tracing::error!(error = %error, "storage operation failed");
            ApiError::new(request_id, "internal_error", "storage operation failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/creators/{creator_id}", get(creator::preview_creator))
        .route("/api/v1/tracking", post(creator::start_tracking))
        .route("/api/v1/creator", put(creator::change_creator))
        .route("/api/v1/dashboard", get(dataset::get_dashboard))
        .route("/api/v1/refresh", post(dataset::refresh))
        .route("/api/v1/export", get(dataset::export_dataset))
        .route("/api/v1/import", post(dataset::import_dataset))
        .route("/api/v1/dataset", delete(dataset::reset_dataset))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            busy: state.tracker.is_busy(),
        },
        req_id.0,
    ))
}
