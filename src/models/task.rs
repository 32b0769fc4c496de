use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier assigned by the repository on insert.
    pub id: i64,
    pub title: String,
    /// Starts out `false`, flipped only by the toggle operation.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a task. The repository assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Must contain at least one non-whitespace character, at most 255 characters.
    #[serde(default)]
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom = "validate_not_blank"
    )]
    pub title: String,
}

/// Rejects empty and whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
        }
    }
}

impl Task {
    /// Returns the task with its completion flag flipped and `updated_at` refreshed.
    pub fn toggled(mut self) -> Self {
        self.completed = !self.completed;
        self.updated_at = Utc::now();
        self
    }
}
