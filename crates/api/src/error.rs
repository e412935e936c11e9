//! Error types shared by all handlers.
//!
//! Every endpoint fails independently; an error here never carries state
//! across requests. Responses are a JSON object with a single `error` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("assistant unavailable: {0}")]
    AgentUnavailable(String),
    #[error("generated SQL rejected: {0}")]
    SqlRejected(String),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::SqlRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::AgentUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Db(_)) {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
