use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewTask, Task};
use crate::repository::TaskRepository;

/// Business rules for tasks.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_tasks(&self) -> AppResult<Vec<Task>> {
        self.repository.find_all().await
    }

    pub async fn get_task(&self, id: i64) -> AppResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::task_not_found(id))
    }

    /// Creates an open task. Blank titles are rejected.
    pub async fn create_task(&self, title: &str) -> AppResult<Task> {
        if title.trim().is_empty() {
            return Err(AppError::invalid("title", "must not be blank"));
        }

        let task = self.repository.insert(NewTask::new(title)).await?;
        log::info!("Created task {}", task.id);
        Ok(task)
    }

    pub async fn toggle_task_completion(&self, id: i64) -> AppResult<Task> {
        let task = self.get_task(id).await?;
        let task = self.repository.save(task.toggled()).await?;
        log::info!("Task {} marked completed={}", task.id, task.completed);
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> AppResult<()> {
        let task = self.get_task(id).await?;
        if !self.repository.delete(task.id).await? {
            // Removed concurrently between the lookup and the delete.
            return Err(AppError::task_not_found(id));
        }
        log::info!("Deleted task {}", id);
        Ok(())
    }

    pub async fn get_completed_task_count(&self) -> AppResult<u64> {
        self.repository.count_by_completed(true).await
    }
}
