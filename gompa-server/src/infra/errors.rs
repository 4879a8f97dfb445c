use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;

use gompa_core::{CatalogError, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Extra structured detail, e.g. per-field validation messages.
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "message": self.message,
            "status": self.status.as_u16(),
        });
        if let Some(details) = self.details {
            error["details"] = details;
        }

        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let fields = serde_json::to_value(&err.fields).unwrap_or(Value::Null);
        Self::unprocessable(err.to_string()).with_details(json!({ "fields": fields }))
    }
}

// Fetch failures never reach the client verbatim.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::not_found(format!("{msg} not found")),
            CatalogError::Validation(validation) => validation.into(),
            CatalogError::Unauthorized => Self::unauthorized("Admin access required"),
            CatalogError::Fetch(msg) => {
                tracing::error!(error = %msg, "catalog fetch failed");
                Self::internal("Catalog is temporarily unavailable")
            }
            CatalogError::Internal(msg) => {
                tracing::error!(error = %msg, "internal catalog error");
                Self::internal("Internal server error")
            }
        }
    }
}
