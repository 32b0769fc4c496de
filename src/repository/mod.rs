//! Persistence traits for tasks and users.
//!
//! Services depend on `Arc<dyn TaskRepository>` / `Arc<dyn UserRepository>` only. Two
//! backends implement them: Postgres (`postgres`) and an in-memory store (`memory`)
//! used when no database is configured and by the HTTP tests.
//!
//! Identifiers are always assigned by the repository on insert.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewTask, NewUser, Task, User};

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Task>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>>;

    /// Inserts a task with `completed = false` and returns it with its new id.
    async fn insert(&self, task: NewTask) -> AppResult<Task>;

    /// Persists the title and completion flag of an existing task.
    /// Fails with `NotFound` when the row no longer exists.
    async fn save(&self, task: Task) -> AppResult<Task>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn count_by_completed(&self, completed: bool) -> AppResult<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// A window of users ordered by id.
    async fn find_page(&self, offset: u64, limit: u64) -> AppResult<Vec<User>>;

    async fn count(&self) -> AppResult<u64>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Users whose email contains `fragment`, case-insensitively, ordered by id.
    async fn search_by_email(&self, fragment: &str) -> AppResult<Vec<User>>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Fails with `DuplicateEmail` when the email is already taken.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Persists email, password hash and names of an existing user.
    /// Fails with `NotFound` for a missing row and `DuplicateEmail` on an email collision.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
