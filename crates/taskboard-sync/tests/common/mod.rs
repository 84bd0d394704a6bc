/*
[INPUT]:  Scripted responses for the task API
[OUTPUT]: In-memory TaskApi fake that records every call
[POS]:    Test infrastructure - shared across controller tests
[UPDATE]: When TaskApi gains methods
*/

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use taskboard_adapter::{
    CreatedTask, Credentials, NewTaskRequest, Result, SigninResponse, Task, TaskboardError,
    UpdateTaskRequest,
};
use taskboard_sync::{MemoryTokenStore, TaskApi, TaskSyncController};

pub const TOKEN: &str = "test-jwt-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Signin(String),
    Signup(String),
    List(String),
    Create(NewTaskRequest),
    Update(UpdateTaskRequest),
    Delete(String),
    Done(String),
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<Call>,
    tasks: Vec<Task>,
    next_id: u64,
    /// (status, message) returned by the next call of each kind
    fail_auth: Option<(u16, String)>,
    fail_list: Option<(u16, String)>,
    fail_mutation: Option<(u16, String)>,
}

/// Server stand-in. Clones share state so a test can inspect it after
/// handing one to the controller.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

pub type TestController = TaskSyncController<FakeApi, MemoryTokenStore>;

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = Self::default();
        {
            let mut inner = api.lock();
            inner.next_id = tasks.len() as u64 + 100;
            inner.tasks = tasks;
        }
        api
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn stored_tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn remove_task(&self, id: &str) {
        self.lock().tasks.retain(|t| t.id != id);
    }

    pub fn fail_next_auth(&self, code: u16, message: &str) {
        self.lock().fail_auth = Some((code, message.to_string()));
    }

    pub fn fail_next_list(&self, code: u16, message: &str) {
        self.lock().fail_list = Some((code, message.to_string()));
    }

    pub fn fail_next_mutation(&self, code: u16, message: &str) {
        self.lock().fail_mutation = Some((code, message.to_string()));
    }
}

fn api_error((code, message): (u16, String)) -> TaskboardError {
    TaskboardError::Api { code, message }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse> {
        let mut inner = self.lock();
        inner.calls.push(Call::Signin(credentials.username.clone()));
        if let Some(failure) = inner.fail_auth.take() {
            return Err(api_error(failure));
        }
        Ok(SigninResponse {
            token: TOKEN.to_string(),
            token_type: None,
            expires_in: None,
        })
    }

    async fn signup(&self, credentials: &Credentials) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(Call::Signup(credentials.username.clone()));
        match inner.fail_auth.take() {
            Some(failure) => Err(api_error(failure)),
            None => Ok(()),
        }
    }

    async fn list_tasks(&self, _token: &str, search: &str) -> Result<Vec<Task>> {
        let mut inner = self.lock();
        inner.calls.push(Call::List(search.to_string()));
        if let Some(failure) = inner.fail_list.take() {
            return Err(api_error(failure));
        }
        Ok(inner
            .tasks
            .iter()
            .filter(|t| search.is_empty() || t.title.contains(search) || t.comment.contains(search))
            .cloned()
            .collect())
    }

    async fn create_task(&self, _token: &str, req: &NewTaskRequest) -> Result<CreatedTask> {
        let mut inner = self.lock();
        inner.calls.push(Call::Create(req.clone()));
        if let Some(failure) = inner.fail_mutation.take() {
            return Err(api_error(failure));
        }
        inner.next_id += 1;
        let id = inner.next_id.to_string();
        inner.tasks.push(Task {
            id: id.clone(),
            title: req.title.clone(),
            date: req.date.clone(),
            repeat: req.repeat.clone(),
            comment: req.comment.clone(),
        });
        Ok(CreatedTask { id })
    }

    async fn update_task(&self, _token: &str, req: &UpdateTaskRequest) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(Call::Update(req.clone()));
        if let Some(failure) = inner.fail_mutation.take() {
            return Err(api_error(failure));
        }
        let Some(task) = inner.tasks.iter_mut().find(|t| t.id == req.id) else {
            return Err(api_error((404, "Task not found".to_string())));
        };
        task.title = req.title.clone();
        task.date = req.date.clone();
        task.repeat = req.repeat.clone();
        task.comment = req.comment.clone();
        Ok(())
    }

    async fn delete_task(&self, _token: &str, id: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(Call::Delete(id.to_string()));
        if let Some(failure) = inner.fail_mutation.take() {
            return Err(api_error(failure));
        }
        inner.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn mark_done(&self, _token: &str, id: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(Call::Done(id.to_string()));
        if let Some(failure) = inner.fail_mutation.take() {
            return Err(api_error(failure));
        }
        let Some(index) = inner.tasks.iter().position(|t| t.id == id) else {
            return Err(api_error((404, "Task not found".to_string())));
        };
        if inner.tasks[index].repeat.is_empty() {
            inner.tasks.remove(index);
        }
        Ok(())
    }
}

pub fn task(id: &str, title: &str, date: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        repeat: String::new(),
        comment: String::new(),
    }
}

/// Controller already holding a session token
pub fn signed_in(api: &FakeApi) -> (TestController, MemoryTokenStore) {
    let store = MemoryTokenStore::with_token(TOKEN);
    let controller = TaskSyncController::new(api.clone(), store.clone());
    (controller, store)
}

/// Controller with an empty store
pub fn signed_out(api: &FakeApi) -> (TestController, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    let controller = TaskSyncController::new(api.clone(), store.clone());
    (controller, store)
}
