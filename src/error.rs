//!
//! # Error Handling
//!
//! This module defines `AppError`, the single error type shared by the repositories,
//! the services and the HTTP layer. Services raise the domain variants (`NotFound`,
//! `DuplicateEmail`, `ValidationError`) and handlers simply propagate them with `?`.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so every variant turns into
//! a JSON body of the shape `{"status": 404, "error": "Not Found", "message": "..."}`.
//! Validation failures additionally carry an `errors` array with one entry per field.
//! Storage and hashing failures are logged and answered with a generic 500 message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Convenience alias used by every fallible operation in the crate.
pub type AppResult<T> = Result<T, AppError>;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, PartialEq)]
pub enum AppError {
    /// Authentication is missing or failed (HTTP 401).
    Unauthorized(String),
    /// The request could not be parsed, e.g. malformed JSON (HTTP 400).
    BadRequest(String),
    /// The requested task or user does not exist (HTTP 404).
    NotFound(String),
    /// Another user already owns the email address (HTTP 409).
    DuplicateEmail,
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the database driver (HTTP 500).
    DatabaseError(String),
    /// Input failed validation (HTTP 400). Each entry reads `"field: message"`.
    ValidationError(Vec<String>),
}

impl AppError {
    pub fn task_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Task {} not found", id))
    }

    pub fn user_not_found(id: i64) -> Self {
        AppError::NotFound(format!("User {} not found", id))
    }

    /// Builds a validation error for a single field.
    pub fn invalid(field: &str, message: &str) -> Self {
        AppError::ValidationError(vec![format!("{}: {}", field, message)])
    }

    /// The message that is safe to show to API clients.
    fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::ValidationError(_) => "Validation failed".to_string(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DuplicateEmail => write!(f, "Conflict: Email already exists"),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(errors) => {
                write!(f, "Validation Error: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        let mut body = json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.public_message(),
        });
        if let AppError::ValidationError(errors) = self {
            body["errors"] = json!(errors);
        }

        HttpResponse::build(status).json(body)
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Flattens `validator::ValidationErrors` into sorted `"field: message"` entries.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();
        AppError::ValidationError(messages)
    }
}

/// Hashing failures are server-side; the detail is logged, not returned.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Failed to hash password: {}", error))
    }
}
