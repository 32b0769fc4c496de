#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Task tracking and user management over HTTP. Handlers in `routes` call the"]
#![doc = "services in `services`, which enforce the business rules on top of the"]
#![doc = "repository traits in `repository` (Postgres or in-memory)."]
#![doc = "The binary (`main.rs`) reads `Config`, builds an `AppState` and serves it."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
