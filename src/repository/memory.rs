use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{NewTask, NewUser, Task, User};
use crate::repository::{TaskRepository, UserRepository};

/// Rows keyed by id plus the next id to hand out. Ids are never reused.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory implementation of `TaskRepository` (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Table<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_all(&self) -> AppResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.rows.get(&id).cloned())
    }

    async fn insert(&self, task: NewTask) -> AppResult<Task> {
        let mut tasks = self.tasks.write().await;
        let now = Utc::now();
        let task = Task {
            id: tasks.allocate_id(),
            title: task.title,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        tasks.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn save(&self, mut task: Task) -> AppResult<Task> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .rows
            .get_mut(&task.id)
            .ok_or_else(|| AppError::task_not_found(task.id))?;
        task.created_at = stored.created_at;
        task.updated_at = Utc::now();
        *stored = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.rows.remove(&id).is_some())
    }

    async fn count_by_completed(&self, completed: bool) -> AppResult<u64> {
        let tasks = self.tasks.read().await;
        let count = tasks
            .rows
            .values()
            .filter(|t| t.completed == completed)
            .count();
        Ok(count as u64)
    }
}

/// In-memory implementation of `UserRepository` (for development/testing).
///
/// Enforces the same email uniqueness as the `users_email_key` constraint.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().cloned().collect())
    }

    async fn find_page(&self, offset: u64, limit: u64) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let users = self.users.read().await;
        Ok(users.rows.len() as u64)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn search_by_email(&self, fragment: &str) -> AppResult<Vec<User>> {
        let needle = fragment.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .filter(|u| u.email.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.rows.values().any(|u| u.email == email))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: users.allocate_id(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: now,
            updated_at: now,
        };
        users.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .rows
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::DuplicateEmail);
        }

        let stored = users
            .rows
            .get_mut(&user.id)
            .ok_or_else(|| AppError::user_not_found(user.id))?;
        user.created_at = stored.created_at;
        user.updated_at = Utc::now();
        *stored = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.rows.remove(&id).is_some())
    }
}
