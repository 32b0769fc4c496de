pub mod extractors;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserResponse;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use password::{BcryptPasswordEncoder, PasswordEncoder};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// User's password. Only presence is checked here; the hash comparison decides the rest.
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Response body of a successful login or registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT for subsequent `Authorization: Bearer` headers.
    pub token: String,
    /// The authenticated user, without password.
    pub user: UserResponse,
}
