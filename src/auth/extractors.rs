use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::verify_token;
use crate::config::AuthConfig;
use crate::error::AppError;

/// The id of the user named by a valid `Authorization: Bearer <token>` header.
///
/// Requires `web::Data<AuthConfig>` in the app data. A missing or invalid token
/// rejects the request with `AppError::Unauthorized`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUserId(pub i64);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Into::into))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUserId, AppError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| AppError::InternalServerError("AuthConfig is not registered".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

    let claims = verify_token(token.trim(), config)?;
    Ok(AuthenticatedUserId(claims.sub))
}
