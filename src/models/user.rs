use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

lazy_static! {
    // Letters, spaces, apostrophes and hyphens, starting with a letter.
    static ref NAME_REGEX: Regex = Regex::new(r"^\p{L}[\p{L} '\-]*$").unwrap();
}

/// A stored user. Not `Serialize`; API responses go through `UserResponse`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    /// Trimmed and lower-cased, unique across users.
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a user. The repository assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Payload for creating a user, used by `POST /api/users` and `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "must be between 6 and 128 characters"))]
    pub password: String,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        regex(path = "NAME_REGEX", message = "may only contain letters, spaces, apostrophes and hyphens")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        regex(path = "NAME_REGEX", message = "may only contain letters, spaces, apostrophes and hyphens")
    )]
    pub last_name: Option<String>,
}

/// Body of `PUT /api/users/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128, message = "must be between 6 and 128 characters"))]
    pub password: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        regex(path = "NAME_REGEX", message = "may only contain letters, spaces, apostrophes and hyphens")
    )]
    pub first_name: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        regex(path = "NAME_REGEX", message = "may only contain letters, spaces, apostrophes and hyphens")
    )]
    pub last_name: Option<String>,
}

/// Query of `GET /api/users/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub email: String,
}

/// Public representation of a user; never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
