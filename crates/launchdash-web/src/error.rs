//! HTTP mapping for dashboard errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use launchdash_common::DashError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Dash(#[from] DashError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Dash(DashError::InvalidRange { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Dash(DashError::UnknownSite(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
