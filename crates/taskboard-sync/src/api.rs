/*
[INPUT]:  TaskboardClient or any other Task API implementation
[OUTPUT]: Object-safe async trait the controller calls through
[POS]:    Seam between the sync controller and the HTTP adapter
[UPDATE]: When the controller needs a new endpoint
*/

use std::sync::Arc;

use async_trait::async_trait;
use taskboard_adapter::{
    CreatedTask, Credentials, NewTaskRequest, Result, SigninResponse, Task, TaskboardClient,
    UpdateTaskRequest,
};

/// Remote operations the controller depends on
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse>;

    async fn signup(&self, credentials: &Credentials) -> Result<()>;

    /// Empty `search` means unfiltered
    async fn list_tasks(&self, token: &str, search: &str) -> Result<Vec<Task>>;

    async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<CreatedTask>;

    async fn update_task(&self, token: &str, req: &UpdateTaskRequest) -> Result<()>;

    async fn delete_task(&self, token: &str, id: &str) -> Result<()>;

    async fn mark_done(&self, token: &str, id: &str) -> Result<()>;
}

#[async_trait]
impl TaskApi for TaskboardClient {
    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse> {
        TaskboardClient::signin(self, credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<()> {
        TaskboardClient::signup(self, credentials).await
    }

    async fn list_tasks(&self, token: &str, search: &str) -> Result<Vec<Task>> {
        TaskboardClient::list_tasks(self, token, search).await
    }

    async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<CreatedTask> {
        TaskboardClient::create_task(self, token, req).await
    }

    async fn update_task(&self, token: &str, req: &UpdateTaskRequest) -> Result<()> {
        TaskboardClient::update_task(self, token, req).await
    }

    async fn delete_task(&self, token: &str, id: &str) -> Result<()> {
        TaskboardClient::delete_task(self, token, id).await
    }

    async fn mark_done(&self, token: &str, id: &str) -> Result<()> {
        TaskboardClient::mark_done(self, token, id).await
    }
}

#[async_trait]
impl<T: TaskApi + ?Sized> TaskApi for Arc<T> {
    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse> {
        (**self).signin(credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<()> {
        (**self).signup(credentials).await
    }

    async fn list_tasks(&self, token: &str, search: &str) -> Result<Vec<Task>> {
        (**self).list_tasks(token, search).await
    }

    async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<CreatedTask> {
        (**self).create_task(token, req).await
    }

    async fn update_task(&self, token: &str, req: &UpdateTaskRequest) -> Result<()> {
        (**self).update_task(token, req).await
    }

    async fn delete_task(&self, token: &str, id: &str) -> Result<()> {
        (**self).delete_task(token, id).await
    }

    async fn mark_done(&self, token: &str, id: &str) -> Result<()> {
        (**self).mark_done(token, id).await
    }
}
