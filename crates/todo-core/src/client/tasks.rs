//! Task endpoints.

use serde::de::IgnoredAny;
use todo_shared::dto::{TaskCompletion, TaskCreate, TaskUpdate};

use super::{ApiClient, RequestOptions};
use crate::domain::{Task, TaskStatistics};
use crate::error::ClientError;

impl ApiClient {
    /// GET /tasks/
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.fetch("/tasks/", RequestOptions::get()).await
    }

    /// POST /tasks/
    pub async fn create_task(&self, task: &TaskCreate) -> Result<Task, ClientError> {
        self.fetch("/tasks/", RequestOptions::post().json(task)?).await
    }

    /// GET /tasks/{id}
    pub async fn get_task(&self, id: i64) -> Result<Task, ClientError> {
        self.fetch(&format!("/tasks/{id}"), RequestOptions::get()).await
    }

    /// PUT /tasks/{id}
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, ClientError> {
        self.fetch(&format!("/tasks/{id}"), RequestOptions::put().json(update)?)
            .await
    }

    /// DELETE /tasks/{id}, answered with 204.
    pub async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        self.request::<IgnoredAny>(&format!("/tasks/{id}"), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// PATCH /tasks/{id}/complete
    pub async fn toggle_task_completion(
        &self,
        id: i64,
        completed: bool,
    ) -> Result<Task, ClientError> {
        let body = TaskCompletion { completed };
        self.fetch(
            &format!("/tasks/{id}/complete"),
            RequestOptions::patch().json(&body)?,
        )
        .await
    }

    /// GET /tasks/statistics
    pub async fn task_statistics(&self) -> Result<TaskStatistics, ClientError> {
        self.fetch("/tasks/statistics", RequestOptions::get()).await
    }
}
