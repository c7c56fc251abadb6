//! Response Envelope
//!
//! Every `/api/v1` response is wrapped as `{code, data, msg}`. Errors carry
//! `data: null` and the status code mirrored in `code`.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::directory::{DirectoryError, ErrorKind};

pub const SUCCESS_MSG: &str = "success";
pub const INVALID_REQUEST_MSG: &str = "Validation error: Invalid request data";
pub const INTERNAL_ERROR_MSG: &str = "Internal server error";
pub const MISSING_EMAIL_MSG: &str = "Email is required for update";

/// `{code, data, msg}` envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: Option<T>,
    pub msg: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            data: Some(data),
            msg: SUCCESS_MSG.to_string(),
        }
    }
}

impl ApiResponse<()> {
    /// 200 with `data: null`
    pub fn empty(msg: impl Into<String>) -> Self {
        Self {
            code: 200,
            data: None,
            msg: msg.into(),
        }
    }

    pub fn error(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            msg: msg.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Handler failure, rendered as an error envelope
#[derive(Debug)]
pub enum ApiError {
    /// Raised by the directory engine
    Directory(DirectoryError),
    /// Body, path or query could not be decoded or is out of range
    InvalidRequest(String),
    /// `PUT` body without an email
    MissingEmail,
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Directory(e) => e.status_code(),
            ApiError::InvalidRequest(_) | ApiError::MissingEmail => 400,
        }
    }

    /// Client-facing message; internal details are never exposed
    pub fn message(&self) -> String {
        match self {
            ApiError::Directory(e) if e.kind() == ErrorKind::Internal => INTERNAL_ERROR_MSG.to_string(),
            ApiError::Directory(e) => e.to_string(),
            ApiError::InvalidRequest(_) => INVALID_REQUEST_MSG.to_string(),
            ApiError::MissingEmail => MISSING_EMAIL_MSG.to_string(),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        ApiError::Directory(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Directory(e) if !e.is_client_error() => {
                error!(error = %e, "directory operation failed");
            }
            ApiError::InvalidRequest(detail) => {
                warn!(detail = %detail, "rejected malformed request");
            }
            other => {
                warn!(status = other.status_code(), msg = %other.message(), "request failed");
            }
        }

        ApiResponse::error(self.status_code(), self.message()).into_response()
    }
}

/// Converts a handler panic into the 500 envelope
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "handler panicked");

    ApiResponse::error(500, INTERNAL_ERROR_MSG).into_response()
}
