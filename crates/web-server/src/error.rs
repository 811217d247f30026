use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Analytics(AnalyticsError::EmptyInput) => StatusCode::NOT_FOUND,
            AppError::Analytics(AnalyticsError::DataIntegrity(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(DbError::NotFound { table, id }) => {
                format!("No record {id} in {table}")
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                "An internal database error occurred".to_string()
            }
            AppError::Analytics(AnalyticsError::EmptyInput) => {
                "No marks found for the student.".to_string()
            }
            AppError::Analytics(err @ AnalyticsError::DataIntegrity(_)) => {
                tracing::error!(error = %err, "Inconsistent mark data.");
                err.to_string()
            }
            AppError::NotFound(message) | AppError::Conflict(message) => message,
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
