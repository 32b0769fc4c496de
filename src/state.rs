//! Wiring of repositories, services and settings into actix application data.

use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::auth::{BcryptPasswordEncoder, PasswordEncoder};
use crate::config::AuthConfig;
use crate::repository::{
    InMemoryTaskRepository, InMemoryUserRepository, PgTaskRepository, PgUserRepository,
    TaskRepository, UserRepository,
};
use crate::services::{TaskService, UserService};

/// Everything a handler can extract with `web::Data<…>`.
#[derive(Clone)]
pub struct AppState {
    pub tasks: web::Data<TaskService>,
    pub users: web::Data<UserService>,
    pub auth: web::Data<AuthConfig>,
}

impl AppState {
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        user_repository: Arc<dyn UserRepository>,
        encoder: Arc<dyn PasswordEncoder>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            tasks: web::Data::new(TaskService::new(task_repository)),
            users: web::Data::new(UserService::new(user_repository, encoder)),
            auth: web::Data::new(auth),
        }
    }

    /// Services backed by Postgres.
    pub fn postgres(pool: PgPool, auth: AuthConfig) -> Self {
        let encoder = Arc::new(BcryptPasswordEncoder::new(auth.bcrypt_cost));
        Self::new(
            Arc::new(PgTaskRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            encoder,
            auth,
        )
    }

    /// Services backed by process memory; contents are lost on exit.
    pub fn in_memory(auth: AuthConfig) -> Self {
        let encoder = Arc::new(BcryptPasswordEncoder::new(auth.bcrypt_cost));
        Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            encoder,
            auth,
        )
    }

    /// Registers the services and auth settings as app data.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tasks.clone())
            .app_data(self.users.clone())
            .app_data(self.auth.clone());
    }
}
