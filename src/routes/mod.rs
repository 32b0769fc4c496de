pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use crate::error::AppError;
use actix_web::web;

/// Registers the `/api` routes and turns extractor failures into `AppError` bodies.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .service(
                web::scope("/tasks")
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_completed_count)
                    .service(tasks::get_task)
                    .service(tasks::toggle_task)
                    .service(tasks::delete_task),
            )
            .service(
                // `/search` must be registered before `/{id}`.
                web::scope("/users")
                    .service(users::create_user)
                    .service(users::get_users)
                    .service(users::search_users)
                    .service(users::get_user)
                    .service(users::update_user)
                    .service(users::delete_user),
            )
            .service(
                web::scope("/auth")
                    .service(auth::login)
                    .service(auth::register)
                    .service(auth::me),
            ),
    );
}
