use crate::{
    auth::{generate_token, AuthResponse, AuthenticatedUserId, LoginRequest},
    config::AuthConfig,
    error::AppError,
    models::{CreateUser, UserResponse},
    services::UserService,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a user with the same rules as `POST /api/users` and returns a token for it.
#[post("/register")]
pub async fn register(
    service: web::Data<UserService>,
    auth: web::Data<AuthConfig>,
    register_data: web::Json<CreateUser>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = service.create_user(register_data.into_inner()).await?;
    let token = generate_token(user.id, &auth)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Login user
///
/// Checks the credentials and returns a token plus the user. Malformed credentials,
/// unknown emails and wrong passwords all get the same 401 answer.
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    auth: web::Data<AuthConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    if let Err(errors) = login_data.validate() {
        log::debug!("Rejected malformed login: {}", errors);
        return Err(invalid_credentials());
    }

    let user = service
        .authenticate_user(&login_data.email, &login_data.password)
        .await?
        .ok_or_else(invalid_credentials)?;

    let token = generate_token(user.id, &auth)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

/// The user named by the bearer token.
#[get("/me")]
pub async fn me(
    service: web::Data<UserService>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = service
        .find_by_id(user_id.0)
        .await
        .map_err(|error| match error {
            // The token outlived its user.
            AppError::NotFound(_) => AppError::Unauthorized("Invalid token".into()),
            other => other,
        })?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
