use crate::{error::AppError, models::CreateTaskRequest, services::TaskService};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists every task ordered by id.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
#[get("")]
pub async fn get_tasks(service: web::Data<TaskService>) -> Result<impl Responder, AppError> {
    let tasks = service.get_all_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates an open task.
///
/// ## Request Body:
/// `{"title": "..."}`. The title must contain a non-whitespace character and is
/// stored trimmed.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with `completed: false`.
/// - `400 Bad Request`: missing, blank or overly long title.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = service.create_task(&task_data.title).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Number of completed tasks, as `{"completed": n}`.
#[get("/completed/count")]
pub async fn get_completed_count(
    service: web::Data<TaskService>,
) -> Result<impl Responder, AppError> {
    let completed = service.get_completed_task_count().await?;
    Ok(HttpResponse::Ok().json(json!({ "completed": completed })))
}

/// Retrieves a task by id.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: no task with that id.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = service.get_task(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Flips the completion flag of a task.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no task with that id.
#[put("/{id}/toggle")]
pub async fn toggle_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = service.toggle_task_completion(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no task with that id.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    service.delete_task(task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryTaskRepository, TaskRepository};
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_blank_title_never_reaches_storage() {
        let repository = InMemoryTaskRepository::new();
        let service = TaskService::new(Arc::new(repository.clone()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .service(web::scope("/tasks").service(create_task).service(get_completed_count)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/tasks")
            .set_json(json!({ "title": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        assert!(repository.find_all().await.unwrap().is_empty());

        let req = test::TestRequest::post()
            .uri("/tasks")
            .set_json(json!({ "title": "  Write report  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["title"], "Write report");
        assert_eq!(created["completed"], false);

        let req = test::TestRequest::get().uri("/tasks/completed/count").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "completed": 0 }));
    }
}
