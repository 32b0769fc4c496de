use crate::{
    error::AppError,
    models::{CreateUser, PageQuery, SearchQuery, UpdateUser, UserResponse},
    services::UserService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Creates a user.
///
/// ## Request Body:
/// `{"email", "password", "firstName", "lastName"}`; see `CreateUser` for the rules.
///
/// ## Responses:
/// - `201 Created`: the new user, without password.
/// - `400 Bad Request`: validation failed; `errors` lists each field.
/// - `409 Conflict`: the email is already registered.
#[post("")]
pub async fn create_user(
    service: web::Data<UserService>,
    user_data: web::Json<CreateUser>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    let user = service.create_user(user_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Lists users.
///
/// Without `page` and `size` the whole list is returned as an array. With either
/// parameter the response is a page object (`content`, `totalElements`, `totalPages`,
/// `number`, `size`, `first`, `last`).
#[get("")]
pub async fn get_users(
    service: web::Data<UserService>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    if query.is_paged() {
        let page = service
            .get_users_page(query.page(), query.size())
            .await?
            .map(UserResponse::from);
        return Ok(HttpResponse::Ok().json(page));
    }

    let users: Vec<UserResponse> = service
        .get_all_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Users whose email contains `?email=`, ignoring case.
#[get("/search")]
pub async fn search_users(
    service: web::Data<UserService>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let users: Vec<UserResponse> = service
        .search_by_email(&query.email)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user = service.find_by_id(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Updates any subset of `email`, `password`, `firstName` and `lastName`.
///
/// ## Responses:
/// - `200 OK`: the updated user.
/// - `400 Bad Request`: a present field failed validation.
/// - `404 Not Found`: no user with that id.
/// - `409 Conflict`: the new email belongs to another user.
#[put("/{id}")]
pub async fn update_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
    user_data: web::Json<UpdateUser>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    let user = service
        .update_user(user_id.into_inner(), user_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/{id}")]
pub async fn delete_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    service.delete_user(user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
