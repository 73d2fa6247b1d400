use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use bomview_utils::{BomViewError, ErrorResponse};
use tracing::warn;

/// Handler error rendered as an `ErrorResponse` body
#[derive(Debug)]
pub struct ApiError(pub BomViewError);

impl From<BomViewError> for ApiError {
    fn from(error: BomViewError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!(code = self.0.error_code(), error = %self.0, "Request failed");
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
