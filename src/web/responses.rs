//! HTTP response types and utilities
//!
//! Every endpoint answers with the same [`ApiResponse`] envelope so clients
//! can tell success from failure without inspecting the status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::{AppError, AppResult};
use crate::models::{MigrationReportRow, MigrationSummary};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(self)).into_response()
    }
}

/// Body returned by the origin update and delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReportResponse {
    pub rows: Vec<MigrationReportRow>,
    pub summary: MigrationSummary,
}

impl From<Vec<MigrationReportRow>> for MigrationReportResponse {
    fn from(rows: Vec<MigrationReportRow>) -> Self {
        let summary = MigrationSummary::from_rows(&rows);
        Self { rows, summary }
    }
}

/// Helper function to convert AppResult to HTTP response
pub fn handle_result<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => ok(data).into_response(),
        Err(error) => handle_error(error),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
        ),
        AppError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database operation failed".to_string(),
        ),
        AppError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Data access failed".to_string(),
        ),
        AppError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", message),
        ),
    };

    if !error.is_client_error() {
        error!("Request failed: {}", error);
    }

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}
