//! Custom error types for the blog service

use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::uploads::UploadError;

/// Closed set of failures a blog endpoint can report
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request was understood but its content is not acceptable
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The request body exceeds the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The addressed record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record store or the upload directory could not serve the request
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApiError {
    /// Machine readable kind, stable across releases
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed(_) => "validation_failed",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::NotFound(_) => "not_found",
            ApiError::StoreUnavailable(_) => "store_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::ValidationFailed(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::NotFound(msg)
            | ApiError::StoreUnavailable(msg) => msg,
        }
    }

    /// Map an extractor rejection, keeping "too large" apart from "malformed"
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::ValidationFailed(message)
        }
    }
}

impl From<common::error::DatabaseError> for ApiError {
    fn from(err: common::error::DatabaseError) -> Self {
        tracing::error!("Record store failure: {}", err);
        let message = if err.is_unreachable() {
            "Database unreachable"
        } else {
            "Database error"
        };
        ApiError::StoreUnavailable(message.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Upload storage failure: {}", err);
        ApiError::StoreUnavailable("File storage error".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::rejected(err.status(), format!("Failed to process multipart: {}", err))
    }
}

impl From<UploadError<MultipartError>> for ApiError {
    fn from(err: UploadError<MultipartError>) -> Self {
        match err {
            UploadError::Source(err) => err.into(),
            UploadError::Io(err) => err.into(),
        }
    }
}

/// Error body returned by every blog endpoint
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// One of `validation_failed`, `payload_too_large`, `not_found`, `store_unavailable`
    #[schema(example = "not_found")]
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.message(),
        }));

        (self.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
