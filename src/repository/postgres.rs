use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{NewTask, NewUser, Task, User};
use crate::repository::{TaskRepository, UserRepository};

const TASK_COLUMNS: &str = "id, title, completed, created_at, updated_at";
const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, created_at, updated_at";

/// SQLSTATE reported by Postgres for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all(&self) -> AppResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks ORDER BY id",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn insert(&self, task: NewTask) -> AppResult<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, completed) VALUES ($1, FALSE) RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.title)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn save(&self, task: Task) -> AppResult<Task> {
        let saved = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET title = $2, completed = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.id)
        .bind(&task.title)
        .bind(task.completed)
        .fetch_optional(&self.pool)
        .await?;
        saved.ok_or_else(|| AppError::task_not_found(task.id))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_completed(&self, completed: bool) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE completed = $1")
            .bind(completed)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translates a violated `users_email_key` constraint into `DuplicateEmail`.
///
/// The service checks for an existing email before writing, but two concurrent requests
/// can both pass that check; the constraint decides which one wins.
fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::DuplicateEmail;
        }
    }
    error.into()
}

/// Escapes LIKE wildcards so a search fragment is matched literally.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_page(&self, offset: u64, limit: u64) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn search_by_email(&self, fragment: &str) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email ILIKE $1 ORDER BY id",
            USER_COLUMNS
        ))
        .bind(like_pattern(fragment))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let saved = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;
        saved.ok_or_else(|| AppError::user_not_found(user.id))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
