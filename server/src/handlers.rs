use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use imgopt_core::params::RawRequestParams;
use imgopt_core::TransformError;

use crate::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps a pipeline failure onto `{"error": ...}` with a 400 or 500 status.
pub struct ApiError(TransformError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            log::debug!("Rejected request: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            log::warn!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// GET /api/opt
///
/// Query:
/// - rel | abs | url: source (bucket-relative path or absolute URL)
/// - w: width (required), h: height (0 = proportional)
/// - c: crop, g: grayscale (`"true"` to enable)
/// - f: auto|jpeg|png|webp|avif (default auto, which consults `Accept`)
/// - b: blur sigma
pub async fn optimize(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let raw = RawRequestParams::from_pairs(pairs).with_accept(accept);

    let image = state.pipeline.run(&raw).await.map_err(ApiError)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, image.content_type)],
        image.body,
    )
        .into_response())
}
